//! gobenchchronos - benchmark a go repository across its commit history

use anyhow::{Context, Result};
use clap::Parser;
use gobench::{
    args::ChronosArgs,
    chronos::Chronos,
    logging,
    output::{self, ScratchDir},
    runner::GoTest,
    vcs::Git,
};
use gobench_core::to_json;
use tracing::info;

fn main() -> Result<()> {
    let args = ChronosArgs::parse();
    logging::init(args.verbose);

    let config = args.validate()?;
    let scratch = ScratchDir::new(args.work_dir.clone())
        .context("Could not create temporary location")?;
    info!("Writing benchmark outputs to {}", scratch.path().display());

    let runner = GoTest::new(args.go.as_str());
    let historic = Chronos::new(&Git, &runner, &config, scratch.path())
        .run()
        .context("Could not run chronos")?;

    match args.out.as_deref() {
        Some(out) if args.output_in_csv => {
            output::write_csv_file(out, &historic).context("Failed to write output")?
        }
        out => {
            let json = to_json(&historic, args.pretty).context("Could not encode JSON")?;
            output::write_output(out, &json).context("Failed to write output")?
        }
    }

    Ok(())
}
