//! gobench - Command-line front ends over gobench-core
//!
//! - `gobench2json`: one benchmark run to JSON
//! - `gobench2xml`: one benchmark run to a JUnit-style XML report
//! - `gobenchchronos`: benchmark a repository across commits and aggregate the history

pub mod args;
pub mod chronos;
pub mod error;
pub mod logging;
pub mod output;
pub mod runner;
pub mod validation;
pub mod vcs;

pub use error::{Error, Result};
