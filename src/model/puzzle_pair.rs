use itertools::Itertools;

use super::{Cell, Dimension, GridId};
use crate::error::InputError;

/// Two k² × k² grids sharing cell positions. A value of 0 marks an empty cell.
#[derive(Clone, PartialEq, Eq)]
pub struct PuzzlePair {
    dimension: Dimension,
    grids: [Vec<Vec<u8>>; 2], // [grid][row][col]
}

impl std::fmt::Debug for PuzzlePair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let side = self.dimension.side();
        let width = if side >= 10 { 2 } else { 1 };
        let mut output = String::new();
        output.push('\n');

        for grid in GridId::all() {
            for (row, values) in self.grids[grid.index()].iter().enumerate() {
                output.push_str(&format!("{:?}{:<2}|", grid, row));
                for chunk in values.chunks(self.dimension.k) {
                    let cells = chunk
                        .iter()
                        .map(|&v| match v {
                            0 => format!("{:>width$}", ".", width = width),
                            v => format!("{:>width$}", v, width = width),
                        })
                        .join(" ");
                    output.push_str(&cells);
                    output.push('|');
                }
                output.push('\n');
            }
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}

impl PuzzlePair {
    /// An empty pair: every cell of both grids is 0.
    pub fn new(dimension: Dimension) -> Self {
        let side = dimension.side();
        Self {
            dimension,
            grids: [vec![vec![0; side]; side], vec![vec![0; side]; side]],
        }
    }

    pub fn from_grids(
        dimension: Dimension,
        grid_a: Vec<Vec<u8>>,
        grid_b: Vec<Vec<u8>>,
    ) -> Result<Self, InputError> {
        let side = dimension.side();
        for (offset, grid) in [(0, &grid_a), (side, &grid_b)] {
            if grid.len() != side {
                return Err(InputError::RowCount {
                    expected: 2 * side,
                    found: offset + grid.len(),
                });
            }
            for (row, values) in grid.iter().enumerate() {
                if values.len() != side {
                    return Err(InputError::ColumnCount {
                        row: offset + row,
                        expected: side,
                        found: values.len(),
                    });
                }
                if let Some(col) = values.iter().position(|&v| v as usize > side) {
                    return Err(InputError::DigitOutOfRange {
                        row: offset + row,
                        col,
                        value: values[col] as i64,
                        max: side,
                    });
                }
            }
        }
        Ok(Self {
            dimension,
            grids: [grid_a, grid_b],
        })
    }

    /// Inverse of [`PuzzlePair::rows`]: the first k² rows form grid A, the next k² grid B.
    pub fn from_rows(dimension: Dimension, mut rows: Vec<Vec<u8>>) -> Result<Self, InputError> {
        let side = dimension.side();
        if rows.len() != 2 * side {
            return Err(InputError::RowCount {
                expected: 2 * side,
                found: rows.len(),
            });
        }
        let grid_b = rows.split_off(side);
        Self::from_grids(dimension, rows, grid_b)
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn get(&self, cell: Cell) -> u8 {
        self.grids[cell.grid.index()][cell.row][cell.col]
    }

    pub fn is_empty(&self, cell: Cell) -> bool {
        self.get(cell) == 0
    }

    pub fn set(&mut self, cell: Cell, digit: u8) {
        assert!(
            digit >= 1 && digit <= self.dimension.max_digit(),
            "digit {} out of range for {}",
            digit,
            cell
        );
        self.grids[cell.grid.index()][cell.row][cell.col] = digit;
    }

    pub fn clear(&mut self, cell: Cell) {
        self.grids[cell.grid.index()][cell.row][cell.col] = 0;
    }

    pub fn clear_all(&mut self) {
        for grid in self.grids.iter_mut() {
            for row in grid.iter_mut() {
                row.fill(0);
            }
        }
    }

    /// Every cell position of both grids; grid A row-major, then grid B.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let side = self.dimension.side();
        GridId::all()
            .into_iter()
            .flat_map(move |grid| {
                (0..side).flat_map(move |row| (0..side).map(move |col| Cell::new(grid, row, col)))
            })
    }

    pub fn filled_cells(&self) -> Vec<Cell> {
        self.cells().filter(|&cell| !self.is_empty(cell)).collect()
    }

    pub fn filled_count(&self) -> usize {
        self.grids
            .iter()
            .flatten()
            .flatten()
            .filter(|&&v| v != 0)
            .count()
    }

    pub fn is_complete(&self) -> bool {
        self.filled_count() == 2 * self.dimension.cells_per_grid()
    }

    pub fn grid(&self, grid: GridId) -> &[Vec<u8>] {
        &self.grids[grid.index()]
    }

    /// The 2·k² stacked rows, grid A first.
    pub fn rows(&self) -> impl Iterator<Item = &Vec<u8>> {
        self.grids[0].iter().chain(self.grids[1].iter())
    }

    /// Checks a complete pair against every rule: rows, columns, blocks, the two
    /// diagonals when enabled, and that the grids never agree on a cell.
    pub fn is_valid_solution(&self, diagonal: bool) -> bool {
        if !self.is_complete() {
            return false;
        }
        let side = self.dimension.side();
        let k = self.dimension.k;

        let is_permutation = |values: Vec<u8>| -> bool {
            values.into_iter().sorted().eq(1..=side as u8)
        };

        for grid in self.grids.iter() {
            for i in 0..side {
                if !is_permutation(grid[i].clone()) {
                    return false;
                }
                if !is_permutation((0..side).map(|r| grid[r][i]).collect()) {
                    return false;
                }
                let (block_row, block_col) = (i / k * k, i % k * k);
                let block = (0..k)
                    .cartesian_product(0..k)
                    .map(|(r, c)| grid[block_row + r][block_col + c])
                    .collect();
                if !is_permutation(block) {
                    return false;
                }
            }
            if diagonal {
                if !is_permutation((0..side).map(|i| grid[i][i]).collect()) {
                    return false;
                }
                if !is_permutation((0..side).map(|i| grid[i][side - 1 - i]).collect()) {
                    return false;
                }
            }
        }

        self.grids[0]
            .iter()
            .flatten()
            .zip(self.grids[1].iter().flatten())
            .all(|(a, b)| a != b)
    }

    #[cfg(test)]
    /// Parse 2·k² rows of whitespace separated digits ('.' or 0 for empty).
    /// Blank lines, separator lines and '|' characters are ignored, so both
    /// rendered output and hand written boards can be read back.
    pub fn parse(input: &str, dimension: Dimension) -> Self {
        let rows = input
            .lines()
            .map(|line| line.replace('|', " "))
            .filter(|line| !line.trim().is_empty() && !line.trim_start().starts_with('-'))
            .map(|line| {
                line.split_whitespace()
                    .map(|cell| match cell {
                        "." => 0,
                        digit => digit.parse::<u8>().unwrap(),
                    })
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        Self::from_rows(dimension, rows).unwrap()
    }
}
