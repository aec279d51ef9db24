//! PD controller step-response simulator used as a fitness oracle
//!
//! This crate turns a candidate gain pair into a single scalar score:
//!
//! - **Simulation**: a fixed-length discrete-time run of a PD law against a
//!   constant setpoint, producing output, error, error-rate and control traces
//! - **Performance index**: weighted absolute error plus control effort, with an
//!   extra penalty on negative error samples
//!
//! # Example
//!
//! ```rust
//! use pdtune_plant::{evaluate, GainPair, PlantConfig};
//!
//! let config = PlantConfig::default();
//! let j = evaluate(GainPair::new(0.0, 0.0), &config);
//! // every error sample is +1, so the negative-error penalty never applies
//! assert!((j - 500.0 * 0.999).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

pub mod config;
pub mod index;
pub mod simulate;

pub use config::{FeedbackTiming, IndexWeights, PlantConfig};
pub use index::performance_index;
pub use simulate::{simulate, Trajectory};

/// Error type for invalid plant configurations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlantError {
    #[error("horizon_steps must be > 0")]
    EmptyHorizon,

    #[error("sampling_interval must be finite and > 0, got {0}")]
    InvalidSamplingInterval(f64),

    #[error("setpoint must be finite, got {0}")]
    InvalidSetpoint(f64),
}

/// Proportional and derivative gains of one candidate controller
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GainPair {
    /// Proportional gain
    pub kp: f64,
    /// Derivative gain
    pub kd: f64,
}

impl GainPair {
    pub fn new(kp: f64, kd: f64) -> Self {
        Self { kp, kd }
    }

    /// Build from a `[kp, kd]` decision vector. Returns `None` for any other length.
    pub fn from_slice(x: &[f64]) -> Option<Self> {
        match x {
            [kp, kd] => Some(Self { kp: *kp, kd: *kd }),
            _ => None,
        }
    }
}

/// Simulate the step response for `gains` and reduce it to a fitness value (lower is better).
///
/// A diverging run whose index is NaN scores `+inf`, so it never wins a comparison.
/// The configuration is expected to have passed [`PlantConfig::validate`].
pub fn evaluate(gains: GainPair, config: &PlantConfig) -> f64 {
    let trajectory = simulate(gains, config);
    let j = performance_index(&trajectory.error, &trajectory.control, &config.weights);
    if j.is_nan() { f64::INFINITY } else { j }
}
