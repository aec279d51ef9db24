//! pdtune - PD controller gain tuning by differential evolution
//!
//! This crate wires the specialised crates together:
//!
//! - `pdtune_plant`: step-response simulator and performance index (fitness oracle)
//! - `pdtune_de`: best/1 differential evolution optimizer
//! - `pdtune_env`: output directory resolution
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use pdtune::{LogProgress, PdTuner, TuningConfig};
//!
//! let tuner = PdTuner::new(TuningConfig::default())?;
//! let report = tuner.optimize(Arc::new(LogProgress))?;
//! println!("kp = {}, kd = {}", report.best.kp, report.best.kd);
//! # Ok::<(), pdtune::TuneError>(())
//! ```

use std::path::PathBuf;

// Re-export external crate functionality
pub use pdtune_de as de;
pub use pdtune_env as env;
pub use pdtune_plant as plant;

pub use pdtune_plant::GainPair;

/// Command-line argument definitions
pub mod cli;
/// Tuning configuration (JSON file + defaults)
pub mod config;
/// Per-generation best gains
pub mod history;
/// Output files opened before a run
pub mod output;
/// Progress sinks
pub mod progress;
/// DE + plant wiring
pub mod tuner;

pub use config::{DeSettings, TuningConfig};
pub use history::GainHistory;
pub use output::RunOutputs;
pub use progress::{GenerationProgress, LogProgress, ProgressSink, SilentProgress};
pub use tuner::{PdTuner, TuningReport};

/// Errors surfaced by the tuning layer
#[derive(Debug, thiserror::Error)]
pub enum TuneError {
    #[error("invalid optimizer configuration: {0}")]
    Optimizer(#[from] pdtune_de::DEError),

    #[error("invalid plant configuration: {0}")]
    Plant(#[from] pdtune_plant::PlantError),

    #[error("failed to read config {path}: {source}")]
    ConfigRead { path: PathBuf, source: std::io::Error },

    #[error("failed to parse config {path}: {source}")]
    ConfigParse { path: PathBuf, source: serde_json::Error },

    #[error("optimizer returned {0} decision variables, expected kp and kd")]
    DecisionVector(usize),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Env(#[from] pdtune_env::EnvError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
