pub mod generator;
pub mod pair_solver;
pub mod settings;

pub use generator::{GeneratedPuzzle, GeneratorConfig, PuzzleGenerator, DEFAULT_MAX_SEED_ATTEMPTS};
pub use pair_solver::{PairSolver, SolveOutcome};
pub use settings::Settings;
