//! Output destinations and the scratch directory for raw step outputs

use crate::error::{Error, Result};
use gobench_core::{write_csv, HistoricPkgBench};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write `contents` to `out`, or to stdout when no file was given
pub fn write_output(out: Option<&Path>, contents: &str) -> Result<()> {
    let Some(path) = out else {
        println!("{}", contents);
        return Ok(());
    };

    std::fs::write(path, contents).map_err(|e| Error::FileWrite {
        path: path.display().to_string(),
        source: e,
    })
}

/// Write historical results as CSV, replacing any existing file
pub fn write_csv_file(path: &Path, historic: &HistoricPkgBench) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::FileWrite {
        path: path.display().to_string(),
        source: e,
    })?;
    write_csv(historic, BufWriter::new(file))?;
    Ok(())
}

/// Where step outputs are written: a caller-chosen directory that is kept,
/// or a temporary one removed on drop.
#[derive(Debug)]
pub enum ScratchDir {
    Kept(PathBuf),
    Temporary(TempDir),
}

impl ScratchDir {
    pub fn new(work_dir: Option<PathBuf>) -> Result<Self> {
        match work_dir {
            Some(dir) => {
                std::fs::create_dir_all(&dir).map_err(|e| Error::FileWrite {
                    path: dir.display().to_string(),
                    source: e,
                })?;
                Ok(Self::Kept(dir))
            }
            None => Ok(Self::Temporary(
                tempfile::Builder::new().prefix("gobenchchronos").tempdir()?,
            )),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Kept(dir) => dir,
            Self::Temporary(dir) => dir.path(),
        }
    }
}
