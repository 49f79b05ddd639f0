//! Configuration validation for CLI arguments

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Unwrap a flag that has no default
pub fn require<T>(value: Option<T>, flag: &str) -> Result<T> {
    value.ok_or_else(|| Error::Validation(format!("--{} is required", flag)))
}

/// Reject zero for counts that must be positive
pub fn validate_non_zero(value: usize, flag: &str) -> Result<()> {
    if value == 0 {
        return Err(Error::Validation(format!(
            "invalid value `0` for --{}",
            flag
        )));
    }
    Ok(())
}

pub fn validate_not_empty(value: &str, flag: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(format!("--{} cannot be empty", flag)));
    }
    Ok(())
}

/// Validate that a path exists and is a directory
pub fn validate_dir_exists(path: &Path, description: &str) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        Error::Validation(format!(
            "could not verify {} {}: {}",
            description,
            path.display(),
            e
        ))
    })?;

    if !metadata.is_dir() {
        return Err(Error::Validation(format!(
            "{} is not a directory: {}",
            description,
            path.display()
        )));
    }

    Ok(())
}

/// Validate that a directory exists or can be created
pub fn validate_dir_writable(path: &Path, description: &str) -> Result<()> {
    if path.exists() && !path.is_dir() {
        return Err(Error::Validation(format!(
            "{} exists but is not a directory: {}",
            description,
            path.display()
        )));
    }

    std::fs::create_dir_all(path).map_err(|e| {
        Error::Validation(format!(
            "Cannot create {}: {}: {}",
            description,
            path.display(),
            e
        ))
    })
}

/// Split a comma separated commit list, dropping empty entries
pub fn parse_commit_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|commit| !commit.is_empty())
        .map(str::to_string)
        .collect()
}

/// Output file required when writing CSV
pub fn require_out_for_csv(out: Option<&PathBuf>, csv: bool) -> Result<()> {
    if csv && out.is_none() {
        return Err(Error::Validation(
            "--out is required with --output-in-csv".to_string(),
        ));
    }
    Ok(())
}
