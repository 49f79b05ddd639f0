//! Command-line arguments of the three binaries

use crate::chronos::{ChronosConfig, StepPlan};
use crate::error::Result;
use crate::runner::BenchOptions;
use crate::validation::{
    parse_commit_list, require, require_out_for_csv, validate_dir_exists, validate_dir_writable,
    validate_non_zero, validate_not_empty,
};
use clap::Parser;
use std::path::{Path, PathBuf};

/// gobench2json: convert go benchmark output to JSON
#[derive(Parser, Debug)]
#[command(name = "gobench2json")]
#[command(author, version, about, long_about = None)]
pub struct JsonArgs {
    /// A file containing the output of benchmarks
    #[arg(long, value_name = "FILE")]
    pub bench_file: Option<PathBuf>,

    /// The file to write the parsed values to (stdout if omitted)
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Pretty-print the JSON
    #[arg(long)]
    pub pretty: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl JsonArgs {
    pub fn bench_file(&self) -> Result<&Path> {
        require(self.bench_file.as_deref(), "bench-file")
    }
}

/// gobench2xml: convert go benchmark output to a JUnit-style XML report
#[derive(Parser, Debug)]
#[command(name = "gobench2xml")]
#[command(author, version, about, long_about = None)]
pub struct XmlArgs {
    /// A file containing the output of benchmarks
    #[arg(long, value_name = "FILE")]
    pub bench_file: Option<PathBuf>,

    /// The file to write the report to (stdout if omitted)
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Remove prefix of package name
    #[arg(long, default_value = "github.com/")]
    pub pkg_strip: String,

    /// The name to give the test-suite
    #[arg(long, default_value = "")]
    pub suite_name: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl XmlArgs {
    pub fn bench_file(&self) -> Result<&Path> {
        require(self.bench_file.as_deref(), "bench-file")
    }
}

/// gobenchchronos: benchmark a go repository across its history
#[derive(Parser, Debug)]
#[command(name = "gobenchchronos")]
#[command(author, version, about, long_about = None)]
pub struct ChronosArgs {
    /// Local location of the repo
    #[arg(long, value_name = "DIR")]
    pub repo: Option<PathBuf>,

    /// Location to write results to (stdout if omitted, JSON only)
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// The package to benchmark
    #[arg(long, default_value = "./...")]
    pub package: String,

    /// The value to pass to go test -bench
    #[arg(long, default_value = "Benchmark")]
    pub bench_regex: String,

    /// The value to pass to go test -run
    #[arg(long, default_value = "^$")]
    pub bench_run_regex: String,

    /// The value to pass to go test -timeout
    #[arg(long, default_value = "5m")]
    pub bench_timeout: String,

    /// The value to pass to go test -count
    #[arg(long, default_value_t = 1)]
    pub bench_count: u32,

    /// How many commits to move back by in every step
    #[arg(long, default_value_t = 1)]
    pub gco_step: usize,

    /// How many steps to benchmark, including the current revision
    #[arg(long, default_value_t = 10)]
    pub num_of_steps: usize,

    /// Comma separated commits to benchmark after the current revision;
    /// --gco-step and --num-of-steps are ignored when given
    #[arg(long, value_name = "LIST")]
    pub commits: Option<String>,

    /// Write the result to --out as CSV
    #[arg(long)]
    pub output_in_csv: bool,

    /// Keep the raw benchmark outputs in this directory
    #[arg(long, value_name = "DIR")]
    pub work_dir: Option<PathBuf>,

    /// Go binary used to run the benchmarks
    #[arg(long, env = "GOBENCH_GO", default_value = "go")]
    pub go: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl ChronosArgs {
    /// Check the arguments and build the driver configuration
    pub fn validate(&self) -> Result<ChronosConfig> {
        let repo = require(self.repo.clone(), "repo")?;

        validate_non_zero(self.bench_count as usize, "bench-count")?;
        validate_non_zero(self.gco_step, "gco-step")?;
        validate_non_zero(self.num_of_steps, "num-of-steps")?;
        validate_not_empty(&self.bench_timeout, "bench-timeout")?;
        validate_not_empty(&self.go, "go")?;
        require_out_for_csv(self.out.as_ref(), self.output_in_csv)?;
        validate_dir_exists(&repo, "repo location")?;
        if let Some(work_dir) = &self.work_dir {
            validate_dir_writable(work_dir, "work dir")?;
        }

        let commits = self
            .commits
            .as_deref()
            .map(parse_commit_list)
            .unwrap_or_default();
        let plan = if commits.is_empty() {
            StepPlan::Walk {
                step_size: self.gco_step,
                steps: self.num_of_steps,
            }
        } else {
            StepPlan::Commits(commits)
        };

        Ok(ChronosConfig {
            repo,
            plan,
            bench: BenchOptions {
                timeout: self.bench_timeout.clone(),
                count: self.bench_count,
                run_regex: self.bench_run_regex.clone(),
                bench_regex: self.bench_regex.clone(),
                package: self.package.clone(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn chronos(args: &[&str]) -> ChronosArgs {
        ChronosArgs::try_parse_from(std::iter::once("gobenchchronos").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_chronos_defaults() {
        let repo = TempDir::new().unwrap();
        let config = chronos(&["--repo", repo.path().to_str().unwrap()])
            .validate()
            .unwrap();

        assert_eq!(config.repo, repo.path());
        assert_eq!(config.plan, StepPlan::Walk { step_size: 1, steps: 10 });
        assert_eq!(config.bench, BenchOptions::default());
    }

    #[test]
    fn test_chronos_commit_list_wins() {
        let repo = TempDir::new().unwrap();
        let config = chronos(&[
            "--repo",
            repo.path().to_str().unwrap(),
            "--commits",
            "abc,def",
            "--gco-step",
            "3",
        ])
        .validate()
        .unwrap();

        assert_eq!(
            config.plan,
            StepPlan::Commits(vec!["abc".to_string(), "def".to_string()])
        );
    }

    #[test]
    fn test_chronos_rejects_bad_config() {
        let repo = TempDir::new().unwrap();
        let repo = repo.path().to_str().unwrap();

        assert!(chronos(&[]).validate().is_err());
        assert!(chronos(&["--repo", repo, "--bench-count", "0"]).validate().is_err());
        assert!(chronos(&["--repo", repo, "--gco-step", "0"]).validate().is_err());
        assert!(chronos(&["--repo", repo, "--num-of-steps", "0"]).validate().is_err());
        assert!(chronos(&["--repo", repo, "--output-in-csv"]).validate().is_err());
        assert!(chronos(&["--repo", "/definitely/not/here"]).validate().is_err());
    }

    #[test]
    fn test_json_args_require_bench_file() {
        let args = JsonArgs::try_parse_from(["gobench2json"]).unwrap();
        assert!(args.bench_file().is_err());

        let args = JsonArgs::try_parse_from(["gobench2json", "--bench-file", "in.txt"]).unwrap();
        assert_eq!(args.bench_file().unwrap(), Path::new("in.txt"));
    }

    #[test]
    fn test_xml_args_defaults() {
        let args = XmlArgs::try_parse_from(["gobench2xml", "--bench-file", "in.txt"]).unwrap();

        assert_eq!(args.pkg_strip, "github.com/");
        assert_eq!(args.suite_name, "");
        assert!(args.out.is_none());
    }
}
