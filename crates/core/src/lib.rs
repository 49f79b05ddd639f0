//! gobench-core - Parsing and aggregation of `go test -bench` output
//!
//! # Features
//!
//! - Classify benchmark output lines as package markers or results
//! - Fold one run into package -> benchmarks, or into a flat test report
//! - Merge many runs, one per commit, into historical series
//! - JSON, CSV and XML encoders

pub mod data;
pub mod error;
pub mod export;
pub mod history;
pub mod parser;
pub mod report;

pub use data::{Benchmark, HistoricPkgBench, HistoricRecord, ParsedBench};
pub use error::{Error, Result};
pub use export::{to_json, write_csv, CSV_HEADERS};
pub use history::{aggregate_dir, aggregate_files, list_step_files, HistoryFileName};
pub use parser::{
    parse_from_file, parse_from_string, parse_report_from_file, GoBenchParser, Line, ResultLine,
};
pub use report::{TestCase, TestSuite, TestSuites};
