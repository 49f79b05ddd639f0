//! Aggregation of many benchmark runs stored as `<step>-bench-out-<commit>` files

use crate::data::HistoricPkgBench;
use crate::error::{Error, Result};
use crate::parser::{read_output, GoBenchParser};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const SEPARATOR: &str = "-bench-out-";

/// Name of the file holding the raw output of one step
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct HistoryFileName {
    pub step: usize,
    pub commit: String,
}

impl HistoryFileName {
    pub fn new(step: usize, commit: impl Into<String>) -> Self {
        Self {
            step,
            commit: commit.into(),
        }
    }

    /// Recover step and commit from a file name; `None` if it is not one of ours.
    pub fn parse(file_name: &str) -> Option<Self> {
        let (step, commit) = file_name.split_once(SEPARATOR)?;

        if step.is_empty() || !step.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if commit.is_empty() || commit.chars().any(char::is_whitespace) {
            return None;
        }

        Some(Self::new(step.parse().ok()?, commit))
    }
}

impl fmt::Display for HistoryFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.step, SEPARATOR, self.commit)
    }
}

/// List the step output files in `dir`, ordered by step index
pub fn list_step_files(dir: &Path) -> Result<Vec<(HistoryFileName, PathBuf)>> {
    let read_dir_error = |e: std::io::Error| Error::DirReadError {
        path: dir.display().to_string(),
        source: e,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_dir_error)? {
        let entry = entry.map_err(read_dir_error)?;
        let path = entry.path();

        if path.is_dir() {
            continue;
        }

        let Some(name) = entry.file_name().to_str().and_then(HistoryFileName::parse) else {
            debug!("Skipping {:?}: not a benchmark output file", path);
            continue;
        };

        files.push((name, path));
    }

    files.sort();
    Ok(files)
}

/// Parse every step output file in `dir` and merge the results.
///
/// A file that fails to parse is logged and left out; the remaining files
/// are still aggregated.
pub fn aggregate_dir(dir: &Path) -> Result<HistoricPkgBench> {
    aggregate_paths(list_step_files(dir)?)
}

/// Like [`aggregate_dir`], but only for the given step files of `dir`.
/// Other files in the directory are not read.
pub fn aggregate_files(dir: &Path, names: &[HistoryFileName]) -> Result<HistoricPkgBench> {
    let mut files: Vec<(HistoryFileName, PathBuf)> = names
        .iter()
        .map(|name| (name.clone(), dir.join(name.to_string())))
        .collect();
    files.sort();
    aggregate_paths(files)
}

fn aggregate_paths(files: Vec<(HistoryFileName, PathBuf)>) -> Result<HistoricPkgBench> {
    let parser = GoBenchParser::new()?;
    let mut historic = HistoricPkgBench::new();

    for (name, path) in files {
        info!("Parsing file: {}", path.display());

        let parsed = read_output(&path).and_then(|content| parser.parse(&content));

        match parsed {
            Ok(parsed) => historic.add_run(name.step, &name.commit, &parsed),
            Err(e) => warn!("Could not parse output for file {}: {}", name, e),
        }
    }

    Ok(historic)
}
