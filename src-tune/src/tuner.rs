use std::sync::Arc;

use ndarray::Array1;
use pdtune_de::{differential_evolution, DEIntermediate};
use pdtune_plant::{evaluate, GainPair};
use serde::Serialize;

use crate::config::TuningConfig;
use crate::history::GainHistory;
use crate::progress::{GenerationProgress, ProgressSink};
use crate::TuneError;

/// Outcome of one tuning run
#[derive(Debug, Clone, Serialize)]
pub struct TuningReport {
    pub best: GainPair,
    pub fitness: f64,
    pub history: GainHistory,
    /// Number of plant simulations performed
    pub evaluations: usize,
}

/// PD gain tuner: differential evolution over `[kp, kd]` with the plant simulator as objective
#[derive(Debug, Clone)]
pub struct PdTuner {
    config: TuningConfig,
}

fn gains_of(x: &Array1<f64>) -> Option<GainPair> {
    x.as_slice().and_then(GainPair::from_slice)
}

impl PdTuner {
    /// Validate `config` and build a tuner. Invalid settings are never clamped.
    pub fn new(config: TuningConfig) -> Result<Self, TuneError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Fitness of a single candidate under this tuner's plant scenario
    pub fn evaluate(&self, gains: GainPair) -> f64 {
        evaluate(gains, &self.config.plant)
    }

    /// Run the optimizer, reporting each generation and the final optimum to `sink`.
    pub fn optimize(&self, sink: Arc<dyn ProgressSink>) -> Result<TuningReport, TuneError> {
        let plant = self.config.plant.clone();
        let objective = move |x: &Array1<f64>| -> f64 {
            gains_of(x).map_or(f64::INFINITY, |g| evaluate(g, &plant))
        };

        let generation_sink = Arc::clone(&sink);
        let de_config = self
            .config
            .de
            .to_builder()
            .callback(Box::new(move |it: &DEIntermediate| {
                if let Some(best) = gains_of(&it.x) {
                    generation_sink.on_generation(&GenerationProgress {
                        generation: it.iter,
                        best,
                        fitness: it.fun,
                    });
                }
            }))
            .build();

        log::debug!(
            "tuning with {:?}, kp in {:?}, kd in {:?}",
            de_config,
            self.config.de.kp_bounds,
            self.config.de.kd_bounds
        );

        let report = differential_evolution(&objective, &self.config.de.bounds(), de_config)?;

        let best = gains_of(&report.x).ok_or(TuneError::DecisionVector(report.x.len()))?;
        sink.on_finish(&best, report.fun);

        Ok(TuningReport {
            best,
            fitness: report.fun,
            history: GainHistory::from(&report.history),
            evaluations: report.nfev,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_gains_of_decision_vector() {
        assert_eq!(gains_of(&array![4.0, 0.5]), Some(GainPair::new(4.0, 0.5)));
        assert_eq!(gains_of(&array![4.0]), None);
        assert_eq!(gains_of(&array![4.0, 0.5, 1.0]), None);
    }
}
