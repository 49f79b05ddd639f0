//! gobench2json - convert `go test -bench` output to JSON

use anyhow::{Context, Result};
use clap::Parser;
use gobench::{args::JsonArgs, logging, output};
use gobench_core::{parse_from_file, to_json};
use tracing::{debug, info};

fn main() -> Result<()> {
    let args = JsonArgs::parse();
    logging::init(args.verbose);

    let bench_file = args.bench_file()?;
    info!("Parsing benchmark output from {:?}", bench_file);

    let parsed = parse_from_file(bench_file).context("Could not parse input")?;
    debug!("Parsed {} package(s)", parsed.len());

    let json = to_json(&parsed, args.pretty).context("Could not encode JSON")?;
    output::write_output(args.out.as_deref(), &json).context("Could not write output")?;

    Ok(())
}
