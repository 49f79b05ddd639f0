//! gobench2xml - convert `go test -bench` output to a JUnit-style XML report

use anyhow::{Context, Result};
use clap::Parser;
use gobench::{args::XmlArgs, logging, output};
use gobench_core::parse_report_from_file;
use tracing::{debug, info};

fn main() -> Result<()> {
    let args = XmlArgs::parse();
    logging::init(args.verbose);

    let bench_file = args.bench_file()?;
    info!("Parsing benchmark output from {:?}", bench_file);

    let report = parse_report_from_file(bench_file, &args.suite_name, &args.pkg_strip)
        .context("Could not parse bench output")?;
    debug!("Report has {} test case(s)", report.suite.tests.len());

    let xml = report.to_xml().context("Could not produce xml bench output")?;
    output::write_output(args.out.as_deref(), &xml)
        .context("Could not produce xml output file")?;

    Ok(())
}
