use std::path::PathBuf;

use thiserror::Error;

/// A supplied partial puzzle could not be turned into a `PuzzlePair`.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("row {row}: expected {expected} columns, found {found}")]
    ColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("row {row}, column {col}: {value:?} is not an integer")]
    NotAnInteger {
        row: usize,
        col: usize,
        value: String,
    },

    #[error("row {row}, column {col}: digit {value} is outside 0..={max}")]
    DigitOutOfRange {
        row: usize,
        col: usize,
        value: i64,
        max: usize,
    },

    #[error("k must be between 1 and {max}, got {k}")]
    InvalidDimension { k: usize, max: usize },
}

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("oracle session already released")]
    Released,

    #[error("SAT backend failure: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("no consistent random seed set found after {attempts} attempts")]
    SeedAttemptsExhausted { attempts: usize },
}
