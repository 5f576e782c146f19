use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the vocabulary loader and the batch loader.
///
/// Missing inference signals (no city, no year, no category) are never
/// errors; those fields simply stay `None`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("header has {found} columns; expected 10 (base) or 14 (extended)")]
    UnsupportedSchema { found: usize },

    #[error("line {line}: key {value:?} is not an integer")]
    InvalidKey { line: u64, value: String },

    #[error("line {line}: unknown category {name:?}")]
    UnknownCategory { line: u64, name: String },

    #[error("vocabulary line {line}: expected \"province,city\", got {content:?}")]
    MalformedVocabulary { line: usize, content: String },

    #[error("no CSV inputs found under {}", path.display())]
    NoInputs { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, Error>;
