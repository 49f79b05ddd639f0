//! JSON and CSV encoders for parsed and historical results

use crate::data::HistoricPkgBench;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// Column headers of the historical CSV export
pub const CSV_HEADERS: [&str; 6] = ["ID", "pkg", "commit", "name", "n", "ns_per_op"];

pub fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Write one row per historical record, preceded by [`CSV_HEADERS`]
pub fn write_csv<W: Write>(historic: &HistoricPkgBench, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    writer.write_record(CSV_HEADERS)?;
    for record in historic.records() {
        let bench = record.benchmark;
        writer.write_record([
            bench.id.map(|id| id.to_string()).unwrap_or_default(),
            record.package.to_string(),
            bench.commit.clone().unwrap_or_default(),
            bench.name.clone(),
            bench.n.to_string(),
            bench.ns_per_op.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
