use crate::model::{Cell, Dimension, GridId, PuzzlePair};

use super::oracle::Model;

/// A propositional variable, numbered from 1.
pub type Var = u32;
/// A signed DIMACS-style literal: `v` asserts the variable, `-v` negates it.
pub type Literal = i32;

/// Maps (grid, row, col, digit) onto the dense variable space
/// `v = a·k⁶ + i·k⁴ + j·k² + m` and back.
#[derive(Debug, Clone, Copy)]
pub struct VarEncoder {
    dimension: Dimension,
    k2: usize,
    k4: usize,
    k6: usize,
}

impl VarEncoder {
    pub fn new(dimension: Dimension) -> Self {
        let k2 = dimension.side();
        Self {
            dimension,
            k2,
            k4: k2 * k2,
            k6: k2 * k2 * k2,
        }
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn var_count(&self) -> usize {
        2 * self.k6
    }

    pub fn encode(&self, cell: Cell, digit: u8) -> Var {
        assert!(
            cell.row < self.k2 && cell.col < self.k2,
            "cell {} outside a {}x{} grid",
            cell,
            self.k2,
            self.k2
        );
        assert!(
            digit >= 1 && digit as usize <= self.k2,
            "digit {} outside 1..={}",
            digit,
            self.k2
        );
        (cell.grid.index() * self.k6 + cell.row * self.k4 + cell.col * self.k2 + digit as usize)
            as Var
    }

    pub fn decode(&self, var: Var) -> (Cell, u8) {
        assert!(
            self.contains(var),
            "variable {} outside 1..={}",
            var,
            self.var_count()
        );
        let offset = var as usize - 1;
        let grid = GridId::from_index(offset / self.k6);
        let row = offset % self.k6 / self.k4;
        let col = offset % self.k4 / self.k2;
        let digit = (offset % self.k2 + 1) as u8;
        (Cell::new(grid, row, col), digit)
    }

    pub fn contains(&self, var: Var) -> bool {
        var >= 1 && var as usize <= self.var_count()
    }

    pub fn positive(&self, cell: Cell, digit: u8) -> Literal {
        self.encode(cell, digit) as Literal
    }

    pub fn negative(&self, cell: Cell, digit: u8) -> Literal {
        -self.positive(cell, digit)
    }

    /// One positive literal per non-empty cell of `pair`; empty cells contribute nothing.
    pub fn assumptions(&self, pair: &PuzzlePair) -> Vec<Literal> {
        pair.filled_cells()
            .into_iter()
            .map(|cell| self.positive(cell, pair.get(cell)))
            .collect()
    }

    /// Writes every true cell variable of `model` into `pair`. Variables outside the
    /// cell space are ignored.
    pub fn decode_model(&self, model: &Model, pair: &mut PuzzlePair) {
        for var in model.true_vars().filter(|&var| self.contains(var)) {
            let (cell, digit) = self.decode(var);
            pair.set(cell, digit);
        }
    }
}
