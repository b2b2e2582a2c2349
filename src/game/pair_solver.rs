use log::{debug, info};

use crate::{
    error::OracleError,
    model::{Dimension, PuzzlePair},
    solver::{ConstraintBuilder, SatOracle, VarEncoder, VarisatOracle},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    Solved(PuzzlePair),
    NoSolution,
}

/// Completes partially filled pairs with a single oracle query each. Uniqueness of
/// the completion is not checked.
pub struct PairSolver<O: SatOracle> {
    encoder: VarEncoder,
    oracle: O,
}

impl PairSolver<VarisatOracle> {
    pub fn with_varisat(dimension: Dimension, diagonal: bool) -> Result<Self, OracleError> {
        Self::new(dimension, diagonal, VarisatOracle::new())
    }
}

impl<O: SatOracle> PairSolver<O> {
    pub fn new(dimension: Dimension, diagonal: bool, mut oracle: O) -> Result<Self, OracleError> {
        let (clauses, _) = ConstraintBuilder::build(dimension, diagonal);
        if let Err(err) = oracle.load(&clauses) {
            oracle.release();
            return Err(err);
        }
        Ok(Self {
            encoder: VarEncoder::new(dimension),
            oracle,
        })
    }

    pub fn solve(&mut self, partial: &PuzzlePair) -> Result<SolveOutcome, OracleError> {
        assert_eq!(
            partial.dimension(),
            self.encoder.dimension(),
            "puzzle dimension does not match the solver"
        );
        let assumptions = self.encoder.assumptions(partial);
        debug!(
            target: "pair_solver",
            "Solving with {} givens",
            assumptions.len()
        );

        match self.oracle.solve(&assumptions)? {
            Some(model) => {
                let mut solution = partial.clone();
                self.encoder.decode_model(&model, &mut solution);
                info!(target: "pair_solver", "Found a completion");
                Ok(SolveOutcome::Solved(solution))
            }
            None => {
                info!(target: "pair_solver", "No completion exists");
                Ok(SolveOutcome::NoSolution)
            }
        }
    }
}

impl<O: SatOracle> Drop for PairSolver<O> {
    fn drop(&mut self) {
        self.oracle.release();
    }
}
