use serde::{Deserialize, Serialize};

/// Which of the two paired grids a cell belongs to. The index is the `a` bit of
/// the variable encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum GridId {
    A,
    B,
}

impl GridId {
    pub fn all() -> [GridId; 2] {
        [GridId::A, GridId::B]
    }

    pub fn index(&self) -> usize {
        match self {
            GridId::A => 0,
            GridId::B => 1,
        }
    }

    pub fn from_index(index: usize) -> GridId {
        match index {
            0 => GridId::A,
            1 => GridId::B,
            _ => panic!("grid index must be 0 or 1, got {}", index),
        }
    }

    pub fn other(&self) -> GridId {
        match self {
            GridId::A => GridId::B,
            GridId::B => GridId::A,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub struct Cell {
    pub grid: GridId,
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(grid: GridId, row: usize, col: usize) -> Self {
        Self { grid, row, col }
    }

    /// The cell at the same position in the other grid.
    pub fn twin(&self) -> Self {
        Self {
            grid: self.grid.other(),
            ..*self
        }
    }

    #[cfg(test)]
    /// Parse a cell of the form "A[0,3]".
    pub fn parse(s: &str) -> Self {
        let grid = match s.chars().next().unwrap() {
            'A' => GridId::A,
            'B' => GridId::B,
            other => panic!("unknown grid {}", other),
        };
        let coords = s[2..s.len() - 1]
            .split(',')
            .map(|n| n.trim().parse::<usize>().unwrap())
            .collect::<Vec<_>>();
        Self::new(grid, coords[0], coords[1])
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}[{},{}]", self.grid, self.row, self.col)
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}
