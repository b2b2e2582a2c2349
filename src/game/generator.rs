use std::time::Instant;

use log::{info, trace};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, RngCore, SeedableRng};

use crate::{
    error::{GenerationError, OracleError},
    model::{Cell, Dimension, GenerationStats, GridId, PuzzlePair},
    solver::{ConstraintBuilder, Literal, SatOracle, VarEncoder, VarisatOracle},
};

/// Random seed sets tried in phase 1 before giving up.
pub const DEFAULT_MAX_SEED_ATTEMPTS: usize = 10_000;

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub dimension: Dimension,
    pub diagonal: bool,
    pub max_seed_attempts: usize,
    /// RNG seed; a fresh one is drawn when absent.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            dimension: Dimension::default(),
            diagonal: false,
            max_seed_attempts: DEFAULT_MAX_SEED_ATTEMPTS,
            seed: None,
        }
    }
}

pub struct GeneratedPuzzle {
    /// The complete pair found in phase 1.
    pub solution: PuzzlePair,
    /// The minimized pair; its only completion is `solution`.
    pub puzzle: PuzzlePair,
    pub stats: GenerationStats,
}

/// One generation session. Owns its oracle and its RNG; the oracle is released
/// when the generator is dropped.
pub struct PuzzleGenerator<O: SatOracle> {
    encoder: VarEncoder,
    oracle: O,
    rng: StdRng,
    diagonal: bool,
    max_seed_attempts: usize,
    stats: GenerationStats,
}

impl PuzzleGenerator<VarisatOracle> {
    pub fn with_varisat(config: &GeneratorConfig) -> Result<Self, GenerationError> {
        Self::new(config, VarisatOracle::new())
    }
}

impl<O: SatOracle> PuzzleGenerator<O> {
    pub fn new(config: &GeneratorConfig, mut oracle: O) -> Result<Self, GenerationError> {
        let seed = config.seed.unwrap_or_else(|| rand::rng().next_u64());
        let (clauses, _) = ConstraintBuilder::build(config.dimension, config.diagonal);
        if let Err(err) = oracle.load(&clauses) {
            oracle.release();
            return Err(err.into());
        }

        let mut stats = GenerationStats::new(seed, config.dimension.k, config.diagonal);
        stats.clauses = clauses.len();
        info!(
            target: "generator",
            "New session: k={}, diagonal={}, seed={}, {} clauses",
            config.dimension.k,
            config.diagonal,
            seed,
            clauses.len()
        );

        Ok(Self {
            encoder: VarEncoder::new(config.dimension),
            oracle,
            rng: StdRng::seed_from_u64(seed),
            diagonal: config.diagonal,
            max_seed_attempts: config.max_seed_attempts,
            stats,
        })
    }

    pub fn seed(&self) -> u64 {
        self.stats.seed
    }

    pub fn stats(&self) -> &GenerationStats {
        &self.stats
    }

    /// Phase 1 followed by phase 2.
    pub fn generate(&mut self) -> Result<GeneratedPuzzle, GenerationError> {
        let started = Instant::now();
        let solution = self.generate_solution()?;
        let puzzle = self.minimize(&solution)?;

        self.stats.givens = puzzle.filled_count();
        self.stats.elapsed = started.elapsed();
        info!(
            target: "generator",
            "Generated puzzle {} with {} givens in {:?} ({} oracle queries)",
            self.stats.puzzle_id,
            self.stats.givens,
            self.stats.elapsed,
            self.stats.oracle_queries
        );

        Ok(GeneratedPuzzle {
            solution,
            puzzle,
            stats: self.stats.clone(),
        })
    }

    /// Phase 1: seed random cells until the oracle finds a completion, then decode
    /// the model into a full pair.
    pub fn generate_solution(&mut self) -> Result<PuzzlePair, GenerationError> {
        let mut working = PuzzlePair::new(self.encoder.dimension());
        for attempt in 1..=self.max_seed_attempts {
            let assumptions = self.random_seed_assumptions(&mut working);
            self.stats.seed_attempts = attempt;
            self.stats.oracle_queries += 1;

            if let Some(model) = self.oracle.solve(&assumptions)? {
                self.encoder.decode_model(&model, &mut working);
                info!(
                    target: "generator",
                    "Found a complete pair after {} seed attempts",
                    attempt
                );
                debug_assert!(
                    working.is_valid_solution(self.diagonal),
                    "oracle model violates the rules: {:?}",
                    working
                );
                return Ok(working);
            }
            trace!(
                target: "generator",
                "Seed set of {} cells is contradictory, retrying",
                assumptions.len()
            );
        }
        Err(GenerationError::SeedAttemptsExhausted {
            attempts: self.max_seed_attempts,
        })
    }

    /// Resets `working`, then writes between k² and 2k² random digits into random
    /// cells. Returns one assumption per seed; later seeds may overwrite earlier ones
    /// in `working` and may contradict each other.
    pub(crate) fn random_seed_assumptions(&mut self, working: &mut PuzzlePair) -> Vec<Literal> {
        working.clear_all();
        let side = self.encoder.dimension().side();
        let count = self.rng.random_range(side..=2 * side);
        let mut assumptions = Vec::with_capacity(count);
        for _ in 0..count {
            let grid = GridId::from_index(self.rng.random_range(0..2));
            let row = self.rng.random_range(0..side);
            let col = self.rng.random_range(0..side);
            let digit = self.rng.random_range(1..=side as u8);
            let cell = Cell::new(grid, row, col);
            working.set(cell, digit);
            assumptions.push(self.encoder.positive(cell, digit));
        }
        assumptions
    }

    /// Phase 2: visit every given in random order and clear it unless that would let
    /// the puzzle complete differently. The result is irreducible for this visiting
    /// order, not necessarily minimum.
    pub fn minimize(&mut self, solution: &PuzzlePair) -> Result<PuzzlePair, OracleError> {
        let mut puzzle = solution.clone();
        let mut cells = puzzle.filled_cells();
        cells.shuffle(&mut self.rng);

        for cell in cells {
            let digit = puzzle.get(cell);
            puzzle.clear(cell);
            if self.has_alternate_completion(&puzzle, cell, digit)? {
                puzzle.set(cell, digit);
                self.stats.cells_restored += 1;
                trace!(target: "generator", "Keeping {} = {}", cell, digit);
            } else {
                self.stats.cells_removed += 1;
                trace!(target: "generator", "Removed {} = {}", cell, digit);
            }
        }

        info!(
            target: "generator",
            "Minimized: removed {}, kept {}",
            self.stats.cells_removed,
            self.stats.cells_restored
        );
        Ok(puzzle)
    }

    /// Whether the givens of `pair` admit a completion where `cell` does not hold
    /// `digit`. `cell` is expected to be empty in `pair`.
    pub fn has_alternate_completion(
        &mut self,
        pair: &PuzzlePair,
        cell: Cell,
        digit: u8,
    ) -> Result<bool, OracleError> {
        let mut assumptions = self.encoder.assumptions(pair);
        assumptions.push(self.encoder.negative(cell, digit));
        self.stats.oracle_queries += 1;
        Ok(self.oracle.solve(&assumptions)?.is_some())
    }
}

impl<O: SatOracle> Drop for PuzzleGenerator<O> {
    fn drop(&mut self) {
        self.oracle.release();
    }
}
