use serde::{Deserialize, Serialize};

use crate::PlantError;

/// Which error sample feeds the output equation at step `k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackTiming {
    /// `y[k]` reads `e[k]` and `de[k]` before they are written for step `k`,
    /// so it always sees their initial zero value.
    #[default]
    SameStep,
    /// `y[k]` reads `e[k-1]` and `de[k-1]` (zero at `k = 0`).
    PreviousStep,
}

/// Weights of the performance index
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexWeights {
    /// Weight on `|e[i]|`
    pub error: f64,
    /// Weight on `u[i]^2`
    pub effort: f64,
    /// Extra weight on `|e[i]|` when `e[i] < 0`
    pub negative_error_penalty: f64,
}

impl Default for IndexWeights {
    fn default() -> Self {
        Self { error: 0.999, effort: 0.001, negative_error_penalty: 10.0 }
    }
}

/// Step-response scenario run for every fitness evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantConfig {
    /// Number of simulated steps (G)
    pub horizon_steps: usize,
    /// Sampling interval in seconds (ts)
    pub sampling_interval: f64,
    /// Constant setpoint amplitude
    pub setpoint: f64,
    pub weights: IndexWeights,
    pub feedback: FeedbackTiming,
}

impl Default for PlantConfig {
    fn default() -> Self {
        Self {
            horizon_steps: 500,
            sampling_interval: 0.001,
            setpoint: 1.0,
            weights: IndexWeights::default(),
            feedback: FeedbackTiming::default(),
        }
    }
}

impl PlantConfig {
    /// Reject configurations that would make the simulation degenerate.
    pub fn validate(&self) -> Result<(), PlantError> {
        if self.horizon_steps == 0 {
            return Err(PlantError::EmptyHorizon);
        }
        if !(self.sampling_interval.is_finite() && self.sampling_interval > 0.0) {
            return Err(PlantError::InvalidSamplingInterval(self.sampling_interval));
        }
        if !self.setpoint.is_finite() {
            return Err(PlantError::InvalidSetpoint(self.setpoint));
        }
        Ok(())
    }
}
