use pdtune_plant::GainPair;
use serde::Serialize;

/// Best candidate at the end of one generation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationProgress {
    /// 1-based generation index
    pub generation: usize,
    pub best: GainPair,
    pub fitness: f64,
}

/// Receiver of optimizer progress. Advisory only: nothing it does affects the result.
pub trait ProgressSink {
    /// Called once per generation, in order.
    fn on_generation(&self, progress: &GenerationProgress);

    /// Called once with the final optimum.
    fn on_finish(&self, _best: &GainPair, _fitness: f64) {}
}

/// Writes progress through the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn on_generation(&self, progress: &GenerationProgress) {
        log::info!(
            "Generation {}: best = [{:.6}, {:.6}]  fitness={:.6e}",
            progress.generation,
            progress.best.kp,
            progress.best.kd,
            progress.fitness
        );
    }

    fn on_finish(&self, best: &GainPair, fitness: f64) {
        log::info!(
            "Optimal PD parameters: kp = {:.6}, kd = {:.6} (fitness={:.6e})",
            best.kp,
            best.kd,
            fitness
        );
    }
}

/// Discards all progress
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentProgress;

impl ProgressSink for SilentProgress {
    fn on_generation(&self, _progress: &GenerationProgress) {}
}
