use itertools::Itertools;
use log::{debug, trace};

use super::encoder::{Literal, VarEncoder};
use crate::model::{Cell, Dimension, GridId};

/// A disjunction of literals.
pub type Clause = Vec<Literal>;

/// Number of clauses emitted per constraint family.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConstraintStats {
    pub cell: usize,
    pub row: usize,
    pub column: usize,
    pub block: usize,
    pub diagonal: usize,
    pub cross_grid: usize,
}

impl ConstraintStats {
    pub fn total(&self) -> usize {
        self.cell + self.row + self.column + self.block + self.diagonal + self.cross_grid
    }
}

/// Pairwise "exactly one of `literals`": one at-least-one clause followed by a
/// binary clause forbidding every pair.
pub fn exactly_one(literals: &[Literal]) -> impl Iterator<Item = Clause> + '_ {
    std::iter::once(literals.to_vec()).chain(
        literals
            .iter()
            .tuple_combinations()
            .map(|(&a, &b)| vec![-a, -b]),
    )
}

/// Emits the CNF for a sudoku pair. Clause order is deterministic: all families of
/// grid A, then all families of grid B, then the cross-grid clauses.
pub struct ConstraintBuilder {
    encoder: VarEncoder,
    diagonal: bool,
    clauses: Vec<Clause>,
    stats: ConstraintStats,
}

impl ConstraintBuilder {
    pub fn new(encoder: VarEncoder, diagonal: bool) -> Self {
        Self {
            encoder,
            diagonal,
            clauses: Vec::new(),
            stats: ConstraintStats::default(),
        }
    }

    /// The complete clause set for both grids plus the cross-grid rule.
    pub fn build(dimension: Dimension, diagonal: bool) -> (Vec<Clause>, ConstraintStats) {
        let mut builder = Self::new(VarEncoder::new(dimension), diagonal);
        for grid in GridId::all() {
            builder.add_grid_constraints(grid);
        }
        builder.add_cross_grid_constraints();
        builder.finish()
    }

    pub fn finish(self) -> (Vec<Clause>, ConstraintStats) {
        debug!(
            target: "constraint_builder",
            "Built {} clauses over {} variables (k={}, diagonal={}): {:?}",
            self.clauses.len(),
            self.encoder.var_count(),
            self.encoder.dimension().k,
            self.diagonal,
            self.stats
        );
        (self.clauses, self.stats)
    }

    /// Cell, row, column, block and (if enabled) diagonal families for one grid.
    pub fn add_grid_constraints(&mut self, grid: GridId) {
        self.stats.cell += self.add_cell_constraints(grid);
        let (rows, columns) = self.add_row_and_column_constraints(grid);
        self.stats.row += rows;
        self.stats.column += columns;
        self.stats.block += self.add_block_constraints(grid);
        if self.diagonal {
            self.stats.diagonal += self.add_diagonal_constraints(grid);
        }
        trace!(
            target: "constraint_builder",
            "Grid {:?} done, {} clauses so far",
            grid,
            self.clauses.len()
        );
    }

    /// The two grids never hold the same digit at the same position.
    pub fn add_cross_grid_constraints(&mut self) {
        let side = self.encoder.dimension().side();
        let before = self.clauses.len();
        for row in 0..side {
            for col in 0..side {
                for digit in 1..=side as u8 {
                    let a = Cell::new(GridId::A, row, col);
                    self.clauses.push(vec![
                        self.encoder.negative(a, digit),
                        self.encoder.negative(a.twin(), digit),
                    ]);
                }
            }
        }
        self.stats.cross_grid += self.clauses.len() - before;
    }

    fn add_exactly_one(&mut self, literals: &[Literal]) -> usize {
        let before = self.clauses.len();
        self.clauses.extend(exactly_one(literals));
        self.clauses.len() - before
    }

    fn add_cell_constraints(&mut self, grid: GridId) -> usize {
        let side = self.encoder.dimension().side();
        let mut added = 0;
        for row in 0..side {
            for col in 0..side {
                let cell = Cell::new(grid, row, col);
                let literals = (1..=side as u8)
                    .map(|digit| self.encoder.positive(cell, digit))
                    .collect::<Vec<_>>();
                added += self.add_exactly_one(&literals);
            }
        }
        added
    }

    fn add_row_and_column_constraints(&mut self, grid: GridId) -> (usize, usize) {
        let side = self.encoder.dimension().side();
        let (mut rows, mut columns) = (0, 0);
        for i in 0..side {
            for digit in 1..=side as u8 {
                let row_literals = (0..side)
                    .map(|j| self.encoder.positive(Cell::new(grid, i, j), digit))
                    .collect::<Vec<_>>();
                let column_literals = (0..side)
                    .map(|j| self.encoder.positive(Cell::new(grid, j, i), digit))
                    .collect::<Vec<_>>();
                rows += self.add_exactly_one(&row_literals);
                columns += self.add_exactly_one(&column_literals);
            }
        }
        (rows, columns)
    }

    fn add_block_constraints(&mut self, grid: GridId) -> usize {
        let k = self.encoder.dimension().k;
        let mut added = 0;
        for (block_row, block_col) in (0..k).cartesian_product(0..k) {
            for digit in 1..=(k * k) as u8 {
                let literals = (0..k)
                    .cartesian_product(0..k)
                    .map(|(i, j)| {
                        let cell = Cell::new(grid, block_row * k + i, block_col * k + j);
                        self.encoder.positive(cell, digit)
                    })
                    .collect::<Vec<_>>();
                added += self.add_exactly_one(&literals);
            }
        }
        added
    }

    fn add_diagonal_constraints(&mut self, grid: GridId) -> usize {
        let side = self.encoder.dimension().side();
        let mut added = 0;
        for digit in 1..=side as u8 {
            let main = (0..side)
                .map(|i| self.encoder.positive(Cell::new(grid, i, i), digit))
                .collect::<Vec<_>>();
            let anti = (0..side)
                .map(|i| self.encoder.positive(Cell::new(grid, i, side - 1 - i), digit))
                .collect::<Vec<_>>();
            added += self.add_exactly_one(&main);
            added += self.add_exactly_one(&anti);
        }
        added
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use test_context::test_context;

    use super::*;
    use crate::tests::UsingLogger;

    #[test]
    fn test_exactly_one() {
        let clauses = exactly_one(&[1, 2, 3]).collect::<Vec<_>>();
        assert_eq!(
            clauses,
            vec![vec![1, 2, 3], vec![-1, -2], vec![-1, -3], vec![-2, -3]]
        );
        assert_eq!(exactly_one(&[7]).collect::<Vec<_>>(), vec![vec![7]]);
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_clause_counts_k2(_: &mut UsingLogger) {
        let dim = Dimension::new(2).unwrap();
        // exactly-one over 4 literals: 1 + 6 clauses, 16 groups per family per grid
        let (clauses, stats) = ConstraintBuilder::build(dim, false);
        assert_eq!(stats.cell, 2 * 16 * 7);
        assert_eq!(stats.row, 2 * 16 * 7);
        assert_eq!(stats.column, 2 * 16 * 7);
        assert_eq!(stats.block, 2 * 16 * 7);
        assert_eq!(stats.diagonal, 0);
        assert_eq!(stats.cross_grid, 64);
        assert_eq!(clauses.len(), 960);
        assert_eq!(stats.total(), clauses.len());

        let (clauses, stats) = ConstraintBuilder::build(dim, true);
        assert_eq!(stats.diagonal, 2 * 2 * 4 * 7);
        assert_eq!(clauses.len(), 1072);
    }

    #[test]
    fn test_clause_counts_k3() {
        let dim = Dimension::new(3).unwrap();
        let (clauses, stats) = ConstraintBuilder::build(dim, true);
        assert_eq!(stats.cell, 2 * 81 * 37);
        assert_eq!(stats.cross_grid, 729);
        assert_eq!(stats.diagonal, 2 * 18 * 37);
        assert_eq!(clauses.len(), 26037);
    }

    #[test]
    fn test_deterministic_order() {
        let dim = Dimension::new(2).unwrap();
        let (first, _) = ConstraintBuilder::build(dim, true);
        let (second, _) = ConstraintBuilder::build(dim, true);
        assert_eq!(first, second);
    }

    #[test]
    fn test_cross_grid_clauses_present_without_diagonal() {
        let dim = Dimension::new(2).unwrap();
        let encoder = VarEncoder::new(dim);
        let (clauses, _) = ConstraintBuilder::build(dim, false);
        let clauses: HashSet<Clause> = clauses.into_iter().collect();
        for row in 0..4 {
            for col in 0..4 {
                for digit in 1..=4 {
                    let a = Cell::new(GridId::A, row, col);
                    let clause = vec![encoder.negative(a, digit), encoder.negative(a.twin(), digit)];
                    assert!(clauses.contains(&clause), "missing {:?}", clause);
                }
            }
        }
    }

    #[test]
    fn test_all_literals_in_range() {
        let dim = Dimension::new(2).unwrap();
        let encoder = VarEncoder::new(dim);
        let (clauses, _) = ConstraintBuilder::build(dim, true);
        for literal in clauses.iter().flatten() {
            assert!(encoder.contains(literal.unsigned_abs()));
        }
    }
}
