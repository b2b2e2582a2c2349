mod cell;
mod dimension;
mod generation_stats;
mod puzzle_pair;

pub use cell::{Cell, GridId};
pub use dimension::{Dimension, MAX_K};
pub use generation_stats::GenerationStats;
pub use puzzle_pair::PuzzlePair;
