use std::fs;
use std::path::Path;

use itertools::Itertools;
use log::debug;

use crate::error::InputError;
use crate::model::{Dimension, PuzzlePair};

/// File the solver's CSV output mode writes to, in the working directory.
pub const SOLUTION_CSV_FILE: &str = "sudoku_soln.csv";

/// Parses 2·k² comma separated rows of k² integers: grid A's rows, then grid B's.
/// Blank lines are skipped and cells are trimmed.
pub fn parse_pair(contents: &str, dimension: Dimension) -> Result<PuzzlePair, InputError> {
    let side = dimension.side();
    let lines = contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>();
    if lines.len() != 2 * side {
        return Err(InputError::RowCount {
            expected: 2 * side,
            found: lines.len(),
        });
    }

    let mut rows = Vec::with_capacity(lines.len());
    for (row, line) in lines.iter().enumerate() {
        let cells = line.split(',').map(str::trim).collect::<Vec<_>>();
        if cells.len() != side {
            return Err(InputError::ColumnCount {
                row,
                expected: side,
                found: cells.len(),
            });
        }
        let mut values = Vec::with_capacity(side);
        for (col, cell) in cells.into_iter().enumerate() {
            let value = cell
                .parse::<i64>()
                .map_err(|_| InputError::NotAnInteger {
                    row,
                    col,
                    value: cell.to_string(),
                })?;
            if value < 0 || value as usize > side {
                return Err(InputError::DigitOutOfRange {
                    row,
                    col,
                    value,
                    max: side,
                });
            }
            values.push(value as u8);
        }
        rows.push(values);
    }
    PuzzlePair::from_rows(dimension, rows)
}

pub fn read_pair(path: &Path, dimension: Dimension) -> Result<PuzzlePair, InputError> {
    let contents = fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let pair = parse_pair(&contents, dimension)?;
    debug!(
        target: "csv",
        "Read {} givens from {}",
        pair.filled_count(),
        path.display()
    );
    Ok(pair)
}

pub fn format_pair(pair: &PuzzlePair) -> String {
    pair.rows()
        .map(|row| row.iter().join(","))
        .map(|line| line + "\n")
        .collect()
}

/// Creates or truncates `path` (and any missing parent directories) and writes
/// both grids.
pub fn write_pair(path: &Path, pair: &PuzzlePair) -> std::io::Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    fs::write(path, format_pair(pair))?;
    debug!(
        target: "csv",
        "Wrote {} givens to {}",
        pair.filled_count(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{PairSolver, SolveOutcome};
    use crate::tests::valid_pair_k2;

    fn k2() -> Dimension {
        Dimension::new(2).unwrap()
    }

    #[test]
    fn test_format() {
        let pair = valid_pair_k2();
        let formatted = format_pair(&pair);
        assert_eq!(formatted.lines().count(), 8);
        assert!(formatted.starts_with("1,2,3,4\n3,4,1,2\n"));
    }

    #[test]
    fn test_parse_tolerates_padding_and_crlf() {
        let input = "1, 2,0,4\r\n0,0,0,0\r\n\r\n0,0,0,0\r\n0,0,0,0\r\n0,0,0,0\r\n0,0,0,0\r\n0,0,0,0\r\n0,0,0, 3\r\n";
        let pair = parse_pair(input, k2()).unwrap();
        assert_eq!(pair.filled_count(), 4);
        assert_eq!(pair.rows().next().unwrap(), &vec![1, 2, 0, 4]);
        assert_eq!(pair.rows().last().unwrap(), &vec![0, 0, 0, 3]);
    }

    #[test]
    fn test_parse_errors() {
        let row = "0,0,0,0\n";
        assert!(matches!(
            parse_pair(&row.repeat(7), k2()),
            Err(InputError::RowCount { expected: 8, found: 7 })
        ));

        let input = format!("{}0,0,0\n{}", row.repeat(2), row.repeat(5));
        assert!(matches!(
            parse_pair(&input, k2()),
            Err(InputError::ColumnCount { row: 2, expected: 4, found: 3 })
        ));

        let input = format!("{}0,x,0,0\n", row.repeat(7));
        assert!(matches!(
            parse_pair(&input, k2()),
            Err(InputError::NotAnInteger { row: 7, col: 1, .. })
        ));

        let input = format!("0,0,0,5\n{}", row.repeat(7));
        assert!(matches!(
            parse_pair(&input, k2()),
            Err(InputError::DigitOutOfRange { row: 0, col: 3, value: 5, max: 4 })
        ));

        let input = format!("{}-1,0,0,0\n", row.repeat(7));
        assert!(matches!(
            parse_pair(&input, k2()),
            Err(InputError::DigitOutOfRange { value: -1, .. })
        ));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_pair(&dir.path().join("nope.csv"), k2());
        assert!(matches!(result, Err(InputError::Io { .. })));
    }

    #[test]
    fn test_round_trip_through_solver() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cases").join("solved.csv");
        let pair = valid_pair_k2();
        write_pair(&path, &pair).unwrap();

        let read_back = read_pair(&path, k2()).unwrap();
        assert_eq!(read_back, pair);

        let mut solver = PairSolver::with_varisat(k2(), false).unwrap();
        assert_eq!(
            solver.solve(&read_back).unwrap(),
            SolveOutcome::Solved(pair)
        );
    }

    #[test]
    fn test_write_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "garbage\n".repeat(20)).unwrap();
        write_pair(&path, &valid_pair_k2()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 8);
    }
}
