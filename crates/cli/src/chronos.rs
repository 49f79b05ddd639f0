//! Benchmarking across a sequence of commits
//!
//! The driver records where the repository is, benchmarks each step of a
//! [`StepPlan`], always checks the original revision back out, and then
//! aggregates the step outputs it wrote.

use crate::error::{Error, Result};
use crate::runner::{BenchOptions, BenchRunner};
use crate::vcs::Vcs;
use gobench_core::{aggregate_files, HistoricPkgBench, HistoryFileName};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Which revisions to benchmark. Step 0 is always the revision checked out at start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepPlan {
    /// Step `i + 1` is `commits[i]`
    Commits(Vec<String>),
    /// Step `i` is `step_size * i` commits before the starting revision
    Walk { step_size: usize, steps: usize },
}

impl StepPlan {
    /// Revision to check out for each step after the first
    fn targets(&self, start: &str) -> Vec<(usize, String)> {
        match self {
            StepPlan::Commits(commits) => commits
                .iter()
                .enumerate()
                .map(|(i, commit)| (i + 1, commit.clone()))
                .collect(),
            StepPlan::Walk { step_size, steps } => (1..*steps)
                .map(|i| (i, format!("{}~{}", start, i * step_size)))
                .collect(),
        }
    }
}

/// Validated settings for one chronos run
#[derive(Debug, Clone)]
pub struct ChronosConfig {
    pub repo: PathBuf,
    pub plan: StepPlan,
    pub bench: BenchOptions,
}

/// Checks the saved revision back out when dropped, unless already restored.
struct RestoreGuard<'a, V: Vcs> {
    vcs: &'a V,
    repo: &'a Path,
    reference: String,
    armed: bool,
}

impl<'a, V: Vcs> RestoreGuard<'a, V> {
    fn restore(mut self) -> Result<()> {
        self.armed = false;
        info!("Restoring {}", self.reference);
        self.vcs.checkout(self.repo, &self.reference)
    }
}

impl<V: Vcs> Drop for RestoreGuard<'_, V> {
    fn drop(&mut self) {
        if self.armed {
            if let Err(e) = self.vcs.checkout(self.repo, &self.reference) {
                error!("Failed to restore {}: {}", self.reference, e);
            }
        }
    }
}

pub struct Chronos<'a, V: Vcs, R: BenchRunner> {
    vcs: &'a V,
    runner: &'a R,
    config: &'a ChronosConfig,
    output_dir: &'a Path,
}

impl<'a, V: Vcs, R: BenchRunner> Chronos<'a, V, R> {
    pub fn new(vcs: &'a V, runner: &'a R, config: &'a ChronosConfig, output_dir: &'a Path) -> Self {
        Self {
            vcs,
            runner,
            config,
            output_dir,
        }
    }

    /// Benchmark every step, restore the original revision and aggregate.
    ///
    /// Failed steps are logged and skipped. Fails if the starting revision
    /// cannot be determined or restored, or the outputs cannot be read back.
    pub fn run(&self) -> Result<HistoricPkgBench> {
        let repo = self.config.repo.as_path();

        let reference = self.vcs.restore_point(repo)?;
        let start = self.vcs.current_revision(repo)?;
        let guard = RestoreGuard {
            vcs: self.vcs,
            repo,
            reference,
            armed: true,
        };

        let written = self.run_steps(&start);
        info!("Benchmarked {} step(s)", written.len());

        let restored = guard.restore();
        // only this run's outputs; the directory may hold files from earlier runs
        let historic = aggregate_files(self.output_dir, &written)?;
        restored?;

        Ok(historic)
    }

    /// Benchmark every step, returning the output files that were written
    fn run_steps(&self, start: &str) -> Vec<HistoryFileName> {
        let mut written = Vec::new();

        match self.bench_step(0, None) {
            Ok(name) => written.push(name),
            Err(e) => warn!("Failed to benchmark on step 0: {}", e),
        }

        for (step, target) in self.config.plan.targets(start) {
            match self.bench_step(step, Some(&target)) {
                Ok(name) => written.push(name),
                Err(e) => warn!("Failed to benchmark on step {} ({}): {}", step, target, e),
            }
        }

        written
    }

    /// Check out `target` (if any), run the benchmarks and save the output
    fn bench_step(&self, step: usize, target: Option<&str>) -> Result<HistoryFileName> {
        let repo = self.config.repo.as_path();

        if let Some(target) = target {
            self.vcs.checkout(repo, target)?;
        }

        let commit = self.vcs.current_revision(repo)?;
        info!("Running benchmarks for: {}", commit);
        let output = self.runner.run(repo, &self.config.bench)?;

        let name = HistoryFileName::new(step, commit);
        let path = self.output_dir.join(name.to_string());
        std::fs::write(&path, output).map_err(|e| Error::FileWrite {
            path: path.display().to_string(),
            source: e,
        })?;

        Ok(name)
    }
}
