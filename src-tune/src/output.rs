//! Files written at the end of a tuning run
//!
//! Every output path is resolved and created before the optimizer starts, so a
//! missing `PDTUNE_DIR` or an unwritable path fails without running a single
//! simulation.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use pdtune_env::{get_records_dir, EnvError};

use crate::cli::Args;
use crate::tuner::TuningReport;
use crate::TuneError;

/// Name of the history file written in the records directory by `--record`
pub const RECORD_FILE: &str = "history.csv";

#[derive(Debug)]
struct OpenOutput {
    path: PathBuf,
    file: File,
}

impl OpenOutput {
    fn create(path: PathBuf) -> Result<Self, TuneError> {
        let file = File::create(&path)?;
        Ok(Self { path, file })
    }
}

/// History CSV and JSON report destinations, already opened
#[derive(Debug)]
pub struct RunOutputs {
    history: Option<OpenOutput>,
    report: Option<OpenOutput>,
}

impl RunOutputs {
    /// Open the outputs requested by `args`, resolving `--record` through `PDTUNE_DIR`
    pub fn from_args(args: &Args) -> Result<Self, TuneError> {
        Self::from_args_with(args, get_records_dir)
    }

    /// Same as [`RunOutputs::from_args`] with the records directory given by `records_dir`
    pub fn from_args_with<F>(args: &Args, records_dir: F) -> Result<Self, TuneError>
    where
        F: FnOnce() -> Result<PathBuf, EnvError>,
    {
        let history_path = match (&args.history_csv, args.record) {
            (Some(path), _) => Some(path.clone()),
            (None, true) => Some(records_dir()?.join(RECORD_FILE)),
            (None, false) => None,
        };
        let history = history_path.map(OpenOutput::create).transpose()?;
        let report = args.report_json.clone().map(OpenOutput::create).transpose()?;
        Ok(Self { history, report })
    }

    /// Write the history and the report into the files opened earlier
    pub fn save(self, report: &TuningReport) -> Result<(), TuneError> {
        if let Some(out) = self.history {
            report.history.write_csv_to(out.file)?;
            log::info!("History saved to: {}", out.path.display());
        }

        if let Some(out) = self.report {
            let mut writer = BufWriter::new(out.file);
            serde_json::to_writer_pretty(&mut writer, report)?;
            writer.flush()?;
            log::info!("Report saved to: {}", out.path.display());
        }

        Ok(())
    }
}
