//! Invocation of `go test -bench`

use crate::error::{Error, Result};
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Parameters passed through to the benchmark tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchOptions {
    /// `-timeout`, e.g. `5m`
    pub timeout: String,
    /// `-count`
    pub count: u32,
    /// `-run` regex selecting tests to run alongside the benchmarks
    pub run_regex: String,
    /// `-bench` regex
    pub bench_regex: String,
    /// Package pattern, e.g. `./...`
    pub package: String,
}

impl Default for BenchOptions {
    fn default() -> Self {
        Self {
            timeout: "5m".to_string(),
            count: 1,
            run_regex: "^$".to_string(),
            bench_regex: "Benchmark".to_string(),
            package: "./...".to_string(),
        }
    }
}

/// Runs benchmarks in a checked-out repository and returns the raw output
pub trait BenchRunner {
    fn run(&self, repo_path: &Path, options: &BenchOptions) -> Result<Vec<u8>>;
}

/// [`BenchRunner`] that shells out to `go test`
#[derive(Debug, Clone)]
pub struct GoTest {
    program: String,
}

impl GoTest {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn args(options: &BenchOptions) -> Vec<String> {
        vec![
            "test".to_string(),
            format!("-timeout={}", options.timeout),
            format!("-count={}", options.count),
            format!("-run={}", options.run_regex),
            format!("-bench={}", options.bench_regex),
            options.package.clone(),
        ]
    }
}

impl Default for GoTest {
    fn default() -> Self {
        Self::new("go")
    }
}

impl BenchRunner for GoTest {
    fn run(&self, repo_path: &Path, options: &BenchOptions) -> Result<Vec<u8>> {
        let args = Self::args(options);
        let command = format!("{} {}", self.program, args.join(" "));
        debug!("Running `{}` in {}", command, repo_path.display());

        let output = Command::new(&self.program)
            .args(&args)
            .current_dir(repo_path)
            .output()
            .map_err(|e| Error::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(Error::Bench {
                command,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output.stdout)
    }
}
