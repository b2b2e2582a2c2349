use std::io::Write;
use std::path::Path;

use itertools::Itertools;

use super::csv::{write_pair, SOLUTION_CSV_FILE};
use crate::model::{GridId, PuzzlePair};

/// How the solver presents a completed pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Digits with `|` between blocks and `-` lines between block rows.
    #[default]
    Pretty,
    /// Space separated digits only.
    Plain,
    /// Both grids written to [`SOLUTION_CSV_FILE`].
    Csv,
}

impl OutputFormat {
    pub fn index(&self) -> u8 {
        match self {
            OutputFormat::Pretty => 0,
            OutputFormat::Plain => 1,
            OutputFormat::Csv => 2,
        }
    }

    pub fn from_index(index: u8) -> Option<OutputFormat> {
        match index {
            0 => Some(OutputFormat::Pretty),
            1 => Some(OutputFormat::Plain),
            2 => Some(OutputFormat::Csv),
            _ => None,
        }
    }
}

fn format_digit(digit: u8, side: usize) -> String {
    if side >= 10 {
        format!("{:>2}", digit)
    } else {
        digit.to_string()
    }
}

/// Renders one grid of `pair` in `Pretty` or `Plain` layout.
pub fn render_grid(pair: &PuzzlePair, grid: GridId, format: OutputFormat) -> String {
    let dimension = pair.dimension();
    let (k, side) = (dimension.k, dimension.side());
    let pretty = format == OutputFormat::Pretty;
    let separator_width = 2 * side + 2 * k - 3 + if k > 3 { side } else { 0 };

    let mut output = String::new();
    for (i, row) in pair.grid(grid).iter().enumerate() {
        let line = if pretty {
            row.chunks(k)
                .map(|block| block.iter().map(|&d| format_digit(d, side)).join(" "))
                .join(" | ")
        } else {
            row.iter().map(|&d| format_digit(d, side)).join(" ")
        };
        output.push_str(&line);
        output.push('\n');
        if pretty && (i + 1) % k == 0 && i + 1 != side {
            output.push_str(&"-".repeat(separator_width));
            output.push('\n');
        }
    }
    output
}

/// Grid A, a blank line, then grid B.
pub fn render_pair(pair: &PuzzlePair, format: OutputFormat) -> String {
    format!(
        "{}\n{}",
        render_grid(pair, GridId::A, format),
        render_grid(pair, GridId::B, format)
    )
}

/// Presents a solved pair: printed to `out` for the console formats, or written to
/// [`SOLUTION_CSV_FILE`] (truncated first) for `Csv`.
pub fn emit_solution(
    pair: &PuzzlePair,
    format: OutputFormat,
    out: &mut dyn Write,
) -> std::io::Result<()> {
    match format {
        OutputFormat::Csv => write_pair(Path::new(SOLUTION_CSV_FILE), pair),
        _ => out.write_all(render_pair(pair, format).as_bytes()),
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;
    use crate::model::{Cell, Dimension};
    use crate::tests::valid_pair_k2;

    #[test]
    fn test_format_index() {
        for format in [OutputFormat::Pretty, OutputFormat::Plain, OutputFormat::Csv] {
            assert_eq!(OutputFormat::from_index(format.index()), Some(format));
        }
        assert_eq!(OutputFormat::from_index(3), None);
    }

    #[test]
    fn test_pretty_k2() {
        let rendered = render_grid(&valid_pair_k2(), GridId::A, OutputFormat::Pretty);
        assert_eq!(
            rendered,
            "\
1 2 | 3 4
3 4 | 1 2
---------
2 1 | 4 3
4 3 | 2 1
"
        );
    }

    #[test]
    fn test_plain_pair() {
        let rendered = render_pair(&valid_pair_k2(), OutputFormat::Plain);
        assert_eq!(
            rendered,
            "\
1 2 3 4
3 4 1 2
2 1 4 3
4 3 2 1

2 1 4 3
4 3 2 1
1 2 3 4
3 4 1 2
"
        );
    }

    #[test]
    fn test_pretty_k3_separator_width() {
        let dim = Dimension::new(3).unwrap();
        let mut pair = PuzzlePair::new(dim);
        pair.set(Cell::parse("A[0,0]"), 9);
        let rendered = render_grid(&pair, GridId::A, OutputFormat::Pretty);
        let lines = rendered.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "9 0 0 | 0 0 0 | 0 0 0");
        assert_eq!(lines[3], "-".repeat(21));
        assert_eq!(lines[0].len(), 21);
    }

    #[test]
    fn test_wide_digits_are_padded() {
        let dim = Dimension::new(4).unwrap();
        let mut pair = PuzzlePair::new(dim);
        pair.set(Cell::parse("B[0,0]"), 7);
        pair.set(Cell::parse("B[0,1]"), 16);
        let plain = render_grid(&pair, GridId::B, OutputFormat::Plain);
        assert!(plain.starts_with(" 7 16  0"));

        let pretty = render_grid(&pair, GridId::B, OutputFormat::Pretty);
        let lines = pretty.lines().collect::<Vec<_>>();
        // 16 two-character cells, 15 spaces, 3 "| " separators
        assert_eq!(lines[0].len(), 16 * 2 + 15 + 6);
        assert_eq!(lines[4], "-".repeat(2 * 16 + 8 - 3 + 16));
    }

    #[test]
    fn test_rendered_output_parses_back() {
        let pair = valid_pair_k2();
        let rendered = render_pair(&pair, OutputFormat::Pretty);
        assert_eq!(PuzzlePair::parse(&rendered, pair.dimension()), pair);
    }

    #[test]
    #[serial]
    fn test_emit_csv_writes_fixed_file() {
        let dir = tempfile::tempdir().unwrap();
        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();

        std::fs::write(SOLUTION_CSV_FILE, "stale\n".repeat(30)).unwrap();
        let mut out = Vec::new();
        let result = emit_solution(&valid_pair_k2(), OutputFormat::Csv, &mut out);
        let written = std::fs::read_to_string(SOLUTION_CSV_FILE);

        std::env::set_current_dir(previous).unwrap();
        result.unwrap();
        assert!(out.is_empty());
        let written = written.unwrap();
        assert_eq!(written.lines().count(), 8);
        assert!(written.starts_with("1,2,3,4\n"));
    }

    #[test]
    fn test_emit_console() {
        let mut out = Vec::new();
        emit_solution(&valid_pair_k2(), OutputFormat::Plain, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 9);
    }
}
