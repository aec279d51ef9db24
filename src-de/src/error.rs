/// Configuration errors reported before any objective evaluation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DEError {
    #[error("population size must be >= {min}, got {got}")]
    PopulationTooSmall { got: usize, min: usize },

    #[error("maxiter must be > 0")]
    NoGenerations,

    #[error("bounds are empty")]
    EmptyBounds,

    #[error("lower/upper size mismatch: {lower} vs {upper}")]
    BoundsLengthMismatch { lower: usize, upper: usize },

    #[error("bound[{index}] is invalid: lower={lower}, upper={upper}")]
    InvalidBounds { index: usize, lower: f64, upper: f64 },

    #[error("mutation factor must be finite, got {0}")]
    InvalidMutation(f64),

    #[error("recombination must be in [0, 1], got {0}")]
    InvalidRecombination(f64),
}
