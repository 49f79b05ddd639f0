//! Data structures for parsed benchmark results

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single benchmark measurement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Benchmark {
    /// Step index of the run that produced this record (historical data only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<usize>,
    /// Commit the run was made at (historical data only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    /// Benchmark name, including any sub-benchmark path and GOMAXPROCS suffix
    pub name: String,
    /// Number of iterations the benchmark ran
    pub n: u64,
    /// Nanoseconds per operation
    pub ns_per_op: f64,
}

impl Benchmark {
    pub fn new(name: impl Into<String>, n: u64, ns_per_op: f64) -> Self {
        Self {
            id: None,
            commit: None,
            name: name.into(),
            n,
            ns_per_op,
        }
    }

    /// Copy of this measurement tagged with the step and commit it was taken at
    pub fn at_step(&self, step: usize, commit: &str) -> Self {
        Self {
            id: Some(step),
            commit: Some(commit.to_string()),
            ..self.clone()
        }
    }
}

/// Results of one benchmark run: package name to benchmarks in the order they were printed.
pub type ParsedBench = BTreeMap<String, Vec<Benchmark>>;

/// Results of many runs: package name to benchmark name to one record per run
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(transparent)]
pub struct HistoricPkgBench {
    packages: BTreeMap<String, BTreeMap<String, Vec<Benchmark>>>,
}

/// One flattened row of historical data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoricRecord<'a> {
    pub package: &'a str,
    pub benchmark: &'a Benchmark,
}

impl HistoricPkgBench {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge the results of one run, tagging each record with `step` and `commit`.
    ///
    /// Packages and benchmarks seen for the first time get new entries; existing
    /// sequences are only ever appended to.
    pub fn add_run(&mut self, step: usize, commit: &str, run: &ParsedBench) {
        for (package, benches) in run {
            let by_name = self.packages.entry(package.clone()).or_default();
            for bench in benches {
                by_name
                    .entry(bench.name.clone())
                    .or_default()
                    .push(bench.at_step(step, commit));
            }
        }
    }

    /// All records for one benchmark of one package
    pub fn get(&self, package: &str, benchmark: &str) -> Option<&[Benchmark]> {
        self.packages
            .get(package)
            .and_then(|by_name| by_name.get(benchmark))
            .map(Vec::as_slice)
    }

    pub fn contains_package(&self, package: &str) -> bool {
        self.packages.contains_key(package)
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Every record, ordered by package, then benchmark name, then insertion
    pub fn records(&self) -> impl Iterator<Item = HistoricRecord<'_>> {
        self.packages.iter().flat_map(|(package, by_name)| {
            by_name.values().flatten().map(move |benchmark| HistoricRecord {
                package: package.as_str(),
                benchmark,
            })
        })
    }
}
