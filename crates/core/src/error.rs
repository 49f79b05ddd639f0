//! Error types for gobench-core

use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

/// Result type alias for gobench-core operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("could not parse loop count in line {line:?}")]
    InvalidIterations {
        line: String,
        #[source]
        source: ParseIntError,
    },

    #[error("could not parse ns per op in line {line:?}")]
    InvalidNsPerOp {
        line: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read directory: {path}")]
    DirReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("XML error: {0}")]
    XmlError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Regex error: {0}")]
    RegexError(#[from] regex::Error),
}
