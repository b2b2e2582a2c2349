use crate::error::InputError;

/// Largest supported block size. Pairwise cardinality constraints grow with k⁸,
/// so anything above this is impractical for the oracle.
pub const MAX_K: usize = 6;

/// The block size `k` of a sudoku pair; each grid is k² × k².
#[readonly::make]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimension {
    pub k: usize,
}

impl Default for Dimension {
    fn default() -> Self {
        Dimension { k: 3 }
    }
}

impl Dimension {
    pub fn new(k: usize) -> Result<Self, InputError> {
        if k == 0 || k > MAX_K {
            return Err(InputError::InvalidDimension { k, max: MAX_K });
        }
        Ok(Self { k })
    }

    /// Number of rows, columns and digits of a single grid.
    pub fn side(&self) -> usize {
        self.k * self.k
    }

    pub fn cells_per_grid(&self) -> usize {
        self.side() * self.side()
    }

    /// Size of the propositional variable space covering both grids.
    pub fn var_count(&self) -> usize {
        2 * self.cells_per_grid() * self.side()
    }

    pub fn max_digit(&self) -> u8 {
        self.side() as u8
    }

    /// Top-left (row, col) of the block containing `(row, col)`.
    pub fn block_origin(&self, row: usize, col: usize) -> (usize, usize) {
        (row - row % self.k, col - col % self.k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes() {
        let dim = Dimension::new(3).unwrap();
        assert_eq!(dim.side(), 9);
        assert_eq!(dim.cells_per_grid(), 81);
        assert_eq!(dim.var_count(), 2 * 729);
        assert_eq!(dim.max_digit(), 9);
        assert_eq!(dim.block_origin(4, 8), (3, 6));
    }

    #[test]
    fn test_rejects_out_of_range_k() {
        assert!(matches!(
            Dimension::new(0),
            Err(InputError::InvalidDimension { k: 0, .. })
        ));
        assert!(Dimension::new(MAX_K + 1).is_err());
        assert_eq!(Dimension::new(MAX_K).unwrap().k, MAX_K);
    }
}
