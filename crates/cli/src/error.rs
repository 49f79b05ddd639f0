//! Error types for the gobench binaries

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Core error: {0}")]
    Core(#[from] gobench_core::Error),

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Invalid configuration: {0}")]
    Validation(String),

    #[error("could not run benchmarks `{command}`: {status}: {stderr}")]
    Bench {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("Failed to start `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
