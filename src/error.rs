//! Errors raised while reading sale records.
//!
//! The index and search code is total and never fails; everything here comes
//! from the record source.

use thiserror::Error;

/// Record source errors. Any of these aborts the experiment run.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Failed to open or read the input
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed delimited text
    #[error("CSV error on line {line}: {source}")]
    Csv {
        line: u64,
        #[source]
        source: csv::Error,
    },

    /// Row has fewer fields than a sale record needs
    #[error("line {line}: expected {expected} fields, found {found}")]
    MissingColumns {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// A numeric field did not parse
    #[error("line {line}: invalid {field} {value:?}")]
    Field {
        line: u64,
        field: &'static str,
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, SourceError>;
