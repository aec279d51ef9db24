//! Command-line interface definitions

use clap::Parser;
use pdtune_plant::FeedbackTiming;
use std::path::PathBuf;

use crate::config::TuningConfig;
use crate::TuneError;

/// Tune the kp/kd gains of a PD controller with differential evolution.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON configuration file. Flags below override its values.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Population size (at least 4).
    #[arg(long)]
    pub population: Option<usize>,

    /// Number of generations.
    #[arg(long)]
    pub generations: Option<usize>,

    /// Mutation factor F.
    #[arg(long)]
    pub mutation: Option<f64>,

    /// Crossover rate CR in [0, 1].
    #[arg(long)]
    pub crossover: Option<f64>,

    /// Random seed for a reproducible run.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Lower bound for kp.
    #[arg(long)]
    pub kp_min: Option<f64>,

    /// Upper bound for kp.
    #[arg(long)]
    pub kp_max: Option<f64>,

    /// Lower bound for kd.
    #[arg(long)]
    pub kd_min: Option<f64>,

    /// Upper bound for kd.
    #[arg(long)]
    pub kd_max: Option<f64>,

    /// Simulation length in steps.
    #[arg(long)]
    pub horizon: Option<usize>,

    /// Sampling interval in seconds.
    #[arg(long)]
    pub sampling_interval: Option<f64>,

    /// Feed the previous step's error into the output equation.
    #[arg(long, default_value_t = false)]
    pub previous_step_feedback: bool,

    /// Write the per-generation history to this CSV file.
    #[arg(long)]
    pub history_csv: Option<PathBuf>,

    /// Write the history to $PDTUNE_DIR/data_generated/records/history.csv.
    #[arg(long, default_value_t = false, conflicts_with = "history_csv")]
    pub record: bool,

    /// Write the full report as JSON to this file.
    #[arg(long)]
    pub report_json: Option<PathBuf>,
}

impl Args {
    /// Load the config file (or defaults) and apply command-line overrides.
    pub fn tuning_config(&self) -> Result<TuningConfig, TuneError> {
        let mut config = match &self.config {
            Some(path) => TuningConfig::from_json_file(path)?,
            None => TuningConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut TuningConfig) {
        let de = &mut config.de;
        if let Some(v) = self.population {
            de.population_size = v;
        }
        if let Some(v) = self.generations {
            de.max_generations = v;
        }
        if let Some(v) = self.mutation {
            de.mutation_factor = v;
        }
        if let Some(v) = self.crossover {
            de.crossover_rate = v;
        }
        if self.seed.is_some() {
            de.seed = self.seed;
        }
        if let Some(v) = self.kp_min {
            de.kp_bounds.0 = v;
        }
        if let Some(v) = self.kp_max {
            de.kp_bounds.1 = v;
        }
        if let Some(v) = self.kd_min {
            de.kd_bounds.0 = v;
        }
        if let Some(v) = self.kd_max {
            de.kd_bounds.1 = v;
        }

        let plant = &mut config.plant;
        if let Some(v) = self.horizon {
            plant.horizon_steps = v;
        }
        if let Some(v) = self.sampling_interval {
            plant.sampling_interval = v;
        }
        if self.previous_step_feedback {
            plant.feedback = FeedbackTiming::PreviousStep;
        }
    }
}
