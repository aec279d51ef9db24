use std::path::Path;

use ndarray::Array1;
use pdtune_de::{validate_bounds, DEConfigBuilder};
use pdtune_plant::PlantConfig;
use serde::{Deserialize, Serialize};

use crate::TuneError;

/// Optimizer settings for the two-gain search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeSettings {
    /// Mutation factor F
    pub mutation_factor: f64,
    /// Crossover rate CR
    pub crossover_rate: f64,
    pub population_size: usize,
    pub max_generations: usize,
    /// `(min, max)` for the proportional gain
    pub kp_bounds: (f64, f64),
    /// `(min, max)` for the derivative gain
    pub kd_bounds: (f64, f64),
    /// RNG seed, entropy-seeded when absent
    pub seed: Option<u64>,
}

impl Default for DeSettings {
    fn default() -> Self {
        Self {
            mutation_factor: 1.20,
            crossover_rate: 0.60,
            population_size: 30,
            max_generations: 50,
            kp_bounds: (0.0, 20.0),
            kd_bounds: (0.0, 1.0),
            seed: None,
        }
    }
}

impl DeSettings {
    /// Bounds in decision-vector order `[kp, kd]`
    pub fn bounds(&self) -> [(f64, f64); 2] {
        [self.kp_bounds, self.kd_bounds]
    }

    /// DE configuration without a callback
    pub fn to_builder(&self) -> DEConfigBuilder {
        DEConfigBuilder::new()
            .maxiter(self.max_generations)
            .popsize(self.population_size)
            .mutation(self.mutation_factor)
            .recombination(self.crossover_rate)
            .maybe_seed(self.seed)
    }
}

/// Complete tuning run description
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningConfig {
    pub de: DeSettings,
    pub plant: PlantConfig,
}

impl TuningConfig {
    /// Load a JSON configuration. Missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, TuneError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| TuneError::ConfigRead { path: path.to_path_buf(), source })?;
        serde_json::from_str(&text)
            .map_err(|source| TuneError::ConfigParse { path: path.to_path_buf(), source })
    }

    /// Check every setting before anything is simulated.
    pub fn validate(&self) -> Result<(), TuneError> {
        self.de.to_builder().build().validate()?;
        let bounds = self.de.bounds();
        let lower: Array1<f64> = bounds.iter().map(|&(lo, _)| lo).collect();
        let upper: Array1<f64> = bounds.iter().map(|&(_, hi)| hi).collect();
        validate_bounds(&lower, &upper)?;
        self.plant.validate()?;
        Ok(())
    }
}
