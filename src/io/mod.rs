pub mod csv;
pub mod render;

pub use self::csv::{format_pair, parse_pair, read_pair, write_pair, SOLUTION_CSV_FILE};
pub use render::{emit_solution, render_grid, render_pair, OutputFormat};
