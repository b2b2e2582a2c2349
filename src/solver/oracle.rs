use log::{debug, trace};
use varisat::{ExtendFormula, Lit, Solver};

use super::constraint_builder::Clause;
use super::encoder::{Literal, Var};
use crate::error::OracleError;

/// A satisfying assignment, reduced to the variables it sets true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    true_vars: Vec<Var>, // sorted
}

impl Model {
    pub fn from_literals(literals: impl IntoIterator<Item = Literal>) -> Self {
        let mut true_vars = literals
            .into_iter()
            .filter(|&literal| literal > 0)
            .map(|literal| literal as Var)
            .collect::<Vec<_>>();
        true_vars.sort_unstable();
        true_vars.dedup();
        Self { true_vars }
    }

    pub fn true_vars(&self) -> impl Iterator<Item = Var> + '_ {
        self.true_vars.iter().copied()
    }

    pub fn is_true(&self, var: Var) -> bool {
        self.true_vars.binary_search(&var).is_ok()
    }
}

/// An incremental SAT engine: clauses accumulate across `load` calls and every
/// `solve` sees all of them together with its own assumptions.
///
/// `solve` returning `Ok(None)` means unsatisfiable under the assumptions; that is
/// an ordinary answer, not an error.
pub trait SatOracle {
    fn load(&mut self, clauses: &[Clause]) -> Result<(), OracleError>;

    fn solve(&mut self, assumptions: &[Literal]) -> Result<Option<Model>, OracleError>;

    /// Frees solver resources. Later calls to `load`/`solve` fail with
    /// `OracleError::Released`; releasing twice is a no-op.
    fn release(&mut self);
}

/// [`SatOracle`] backed by the varisat CDCL solver.
pub struct VarisatOracle {
    solver: Option<Solver<'static>>,
    clauses: usize,
    queries: usize,
}

impl Default for VarisatOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl VarisatOracle {
    pub fn new() -> Self {
        Self {
            solver: Some(Solver::new()),
            clauses: 0,
            queries: 0,
        }
    }

    pub fn clause_count(&self) -> usize {
        self.clauses
    }

    pub fn query_count(&self) -> usize {
        self.queries
    }

    pub fn is_released(&self) -> bool {
        self.solver.is_none()
    }

    fn to_lits(literals: &[Literal]) -> Vec<Lit> {
        literals
            .iter()
            .map(|&literal| Lit::from_dimacs(literal as isize))
            .collect()
    }
}

impl SatOracle for VarisatOracle {
    fn load(&mut self, clauses: &[Clause]) -> Result<(), OracleError> {
        let solver = self.solver.as_mut().ok_or(OracleError::Released)?;
        for clause in clauses {
            solver.add_clause(&Self::to_lits(clause));
        }
        self.clauses += clauses.len();
        debug!(
            target: "oracle",
            "Loaded {} clauses ({} total)",
            clauses.len(),
            self.clauses
        );
        Ok(())
    }

    fn solve(&mut self, assumptions: &[Literal]) -> Result<Option<Model>, OracleError> {
        let solver = self.solver.as_mut().ok_or(OracleError::Released)?;
        self.queries += 1;
        solver.assume(&Self::to_lits(assumptions));
        let satisfiable = solver
            .solve()
            .map_err(|err| OracleError::Backend(err.to_string()))?;
        trace!(
            target: "oracle",
            "Query #{} with {} assumptions: {}",
            self.queries,
            assumptions.len(),
            if satisfiable { "SAT" } else { "UNSAT" }
        );
        if !satisfiable {
            return Ok(None);
        }
        let model = solver
            .model()
            .ok_or_else(|| OracleError::Backend("satisfiable without a model".to_string()))?;
        Ok(Some(Model::from_literals(
            model.iter().map(|lit| lit.to_dimacs() as Literal),
        )))
    }

    fn release(&mut self) {
        if self.solver.take().is_some() {
            debug!(
                target: "oracle",
                "Released solver after {} queries over {} clauses",
                self.queries,
                self.clauses
            );
        }
    }
}

impl Drop for VarisatOracle {
    fn drop(&mut self) {
        self.release();
    }
}
