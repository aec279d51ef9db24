use ndarray::Array1;

use crate::{FeedbackTiming, GainPair, PlantConfig};

/// Traces of one simulation run, all of length `horizon_steps`
#[derive(Debug, Clone)]
pub struct Trajectory {
    pub setpoint: Array1<f64>,
    pub output: Array1<f64>,
    pub error: Array1<f64>,
    pub error_rate: Array1<f64>,
    pub control: Array1<f64>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.setpoint.len()
    }

    pub fn is_empty(&self) -> bool {
        self.setpoint.is_empty()
    }
}

/// Run the PD step response for `gains`.
///
/// Per step `k`:
/// 1. `y[k] = kp * e' + kd * de'` with `(e', de')` picked by [`FeedbackTiming`]
/// 2. `e[k] = r[k] - y[k]`
/// 3. `de[k] = (e[k] - e[k-1]) / ts`, `0` at `k = 0`
/// 4. `u[k] = kp * e[k] + kd * de[k]`
pub fn simulate(gains: GainPair, config: &PlantConfig) -> Trajectory {
    let n = config.horizon_steps;
    let ts = config.sampling_interval;

    let setpoint = Array1::from_elem(n, config.setpoint);
    let mut output = Array1::<f64>::zeros(n);
    let mut error = Array1::<f64>::zeros(n);
    let mut error_rate = Array1::<f64>::zeros(n);
    let mut control = Array1::<f64>::zeros(n);

    let mut e_last = 0.0;
    for k in 0..n {
        // SameStep reads slot k before it is written below
        let (e_fb, de_fb) = match config.feedback {
            FeedbackTiming::SameStep => (error[k], error_rate[k]),
            FeedbackTiming::PreviousStep if k > 0 => (error[k - 1], error_rate[k - 1]),
            FeedbackTiming::PreviousStep => (0.0, 0.0),
        };
        output[k] = gains.kp * e_fb + gains.kd * de_fb;

        error[k] = setpoint[k] - output[k];
        error_rate[k] = if k > 0 { (error[k] - e_last) / ts } else { 0.0 };
        control[k] = gains.kp * error[k] + gains.kd * error_rate[k];

        e_last = error[k];
    }

    Trajectory { setpoint, output, error, error_rate, control }
}
