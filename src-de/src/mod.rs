//! Differential Evolution (DE) global optimizer in pure Rust using ndarray
//!
//! This is a small, deterministic-under-seed implementation of the
//! best/1 scheme used to tune controller gains:
//!
//! - Box constraints (lower/upper bounds), mutants are clamped into the box
//! - Random uniform initialization, drawn dimension by dimension
//! - Mutation `best + F * (x_r1 - x_r2)` with four distinct sampled indices
//! - Whole-vector crossover: the trial becomes the mutant as soon as any
//!   per-dimension draw falls below CR
//! - Greedy selection against a fresh evaluation of the current member;
//!   an objective returning NaN is ranked as `+inf`
//! - Pre-sized per-generation history of the best vector and fitness
//! - Optional per-generation callback

#![allow(missing_docs)]
use std::fmt;

use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub mod clip_inplace;
pub mod crossover_whole;
pub mod differential_evolution;
pub mod distinct_indices;
pub mod error;
pub mod init_random;
pub mod mutant_best1;


pub use differential_evolution::differential_evolution;
pub use error::DEError;

/// Smallest population able to provide four distinct indices per mutation
pub const MIN_POPULATION: usize = 4;

pub(crate) fn argmin(v: &Array1<f64>) -> (usize, f64) {
	let mut best_i = 0usize;
	let mut best_v = v[0];
	for (i, &val) in v.iter().enumerate() {
		if val < best_v {
			best_v = val;
			best_i = i;
		}
	}
	(best_i, best_v)
}

/// Objective value with NaN ranked as `+inf`
fn energy_of<F: Fn(&Array1<f64>) -> f64>(func: &F, x: &Array1<f64>) -> f64 {
	let v = func(x);
	if v.is_nan() { f64::INFINITY } else { v }
}

/// Check that `lower`/`upper` describe a non-empty, well-formed box.
pub fn validate_bounds(lower: &Array1<f64>, upper: &Array1<f64>) -> Result<(), DEError> {
	if lower.len() != upper.len() {
		return Err(DEError::BoundsLengthMismatch { lower: lower.len(), upper: upper.len() });
	}
	if lower.is_empty() {
		return Err(DEError::EmptyBounds);
	}
	for (index, (&lo, &hi)) in lower.iter().zip(upper.iter()).enumerate() {
		if !(lo.is_finite() && hi.is_finite()) || lo > hi {
			return Err(DEError::InvalidBounds { index, lower: lo, upper: hi });
		}
	}
	Ok(())
}

/// Per-generation observer
pub type Callback = Box<dyn FnMut(&DEIntermediate)>;

/// Configuration for the Differential Evolution optimizer
pub struct DEConfig {
	/// Number of generations
	pub maxiter: usize,
	/// Absolute population size (not scaled by dimension)
	pub popsize: usize,
	/// Mutation factor F
	pub mutation: f64,
	/// Crossover rate CR in [0,1]
	pub recombination: f64,
	pub seed: Option<u64>,
	/// Optional per-generation callback
	pub callback: Option<Callback>,
}

impl Default for DEConfig {
	fn default() -> Self {
		Self {
			maxiter: 50,
			popsize: 30,
			mutation: 1.20,
			recombination: 0.60,
			seed: None,
			callback: None,
		}
	}
}

impl fmt::Debug for DEConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DEConfig")
			.field("maxiter", &self.maxiter)
			.field("popsize", &self.popsize)
			.field("mutation", &self.mutation)
			.field("recombination", &self.recombination)
			.field("seed", &self.seed)
			.field("callback", &self.callback.is_some())
			.finish()
	}
}

impl DEConfig {
	/// Reject scalar settings the algorithm cannot run with.
	pub fn validate(&self) -> Result<(), DEError> {
		if self.popsize < MIN_POPULATION {
			return Err(DEError::PopulationTooSmall { got: self.popsize, min: MIN_POPULATION });
		}
		if self.maxiter == 0 {
			return Err(DEError::NoGenerations);
		}
		if !self.mutation.is_finite() {
			return Err(DEError::InvalidMutation(self.mutation));
		}
		if !(0.0..=1.0).contains(&self.recombination) {
			return Err(DEError::InvalidRecombination(self.recombination));
		}
		Ok(())
	}
}

/// Fluent builder for `DEConfig` for ergonomic configuration.
pub struct DEConfigBuilder {
	cfg: DEConfig,
}

impl Default for DEConfigBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl DEConfigBuilder {
	pub fn new() -> Self {
		Self { cfg: DEConfig::default() }
	}
	pub fn maxiter(mut self, v: usize) -> Self {
		self.cfg.maxiter = v;
		self
	}
	pub fn popsize(mut self, v: usize) -> Self {
		self.cfg.popsize = v;
		self
	}
	pub fn mutation(mut self, v: f64) -> Self {
		self.cfg.mutation = v;
		self
	}
	pub fn recombination(mut self, v: f64) -> Self {
		self.cfg.recombination = v;
		self
	}
	pub fn seed(mut self, v: u64) -> Self {
		self.cfg.seed = Some(v);
		self
	}
	pub fn maybe_seed(mut self, v: Option<u64>) -> Self {
		self.cfg.seed = v;
		self
	}
	pub fn callback(mut self, cb: Callback) -> Self {
		self.cfg.callback = Some(cb);
		self
	}
	pub fn build(self) -> DEConfig {
		self.cfg
	}
}

/// Best vector and fitness at the end of every generation, indexed from 0.
///
/// Storage is allocated for all generations up front.
#[derive(Debug, Clone)]
pub struct DEHistory {
	pub x: Array2<f64>,
	pub fun: Array1<f64>,
}

impl DEHistory {
	fn new(generations: usize, n: usize) -> Self {
		Self { x: Array2::zeros((generations, n)), fun: Array1::zeros(generations) }
	}

	fn record(&mut self, generation: usize, x: &Array1<f64>, fun: f64) {
		self.x.row_mut(generation).assign(x);
		self.fun[generation] = fun;
	}

	pub fn len(&self) -> usize {
		self.fun.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fun.is_empty()
	}
}

/// Result/Report of a DE optimization run
#[derive(Clone)]
pub struct DEReport {
	pub x: Array1<f64>,
	pub fun: f64,
	pub nit: usize,
	pub nfev: usize,
	pub population: Array2<f64>,
	pub population_energies: Array1<f64>,
	pub history: DEHistory,
}

impl fmt::Debug for DEReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DEReport")
			.field("x", &self.x)
			.field("fun", &self.fun)
			.field("nit", &self.nit)
			.field("nfev", &self.nfev)
			.field(
				"population",
				&format!("{}x{}", self.population.nrows(), self.population.ncols()),
			)
			.field("population_energies", &format!("len={}", self.population_energies.len()))
			.field("history", &format!("len={}", self.history.len()))
			.finish()
	}
}

/// Information passed to callback after each generation
pub struct DEIntermediate {
	pub x: Array1<f64>,
	pub fun: f64,
	/// Standard deviation of the population energies
	pub convergence: f64,
	/// 1-based generation index
	pub iter: usize,
	/// Population at the end of the generation
	pub population: Array2<f64>,
	/// Trials that replaced their target in this generation
	pub accepted: usize,
}

/// Differential Evolution optimizer
pub struct DifferentialEvolution<'a, F>
where
	F: Fn(&Array1<f64>) -> f64,
{
	func: &'a F,
	lower: Array1<f64>,
	upper: Array1<f64>,
	config: DEConfig,
}

impl<'a, F> DifferentialEvolution<'a, F>
where
	F: Fn(&Array1<f64>) -> f64,
{
	/// Create a new DE optimizer with objective `func` and bounds [lower, upper]
	pub fn new(func: &'a F, lower: Array1<f64>, upper: Array1<f64>) -> Self {
		Self { func, lower, upper, config: DEConfig::default() }
	}

	/// Mutable access to configuration
	pub fn config_mut(&mut self) -> &mut DEConfig {
		&mut self.config
	}

	/// Run the optimization and return a report.
	///
	/// Configuration and bounds are checked before the objective is called once.
	pub fn solve(&mut self) -> Result<DEReport, DEError> {
		use clip_inplace::clip_inplace;
		use crossover_whole::whole_vector_crossover;
		use init_random::init_random;
		use mutant_best1::mutant_best1;

		self.config.validate()?;
		validate_bounds(&self.lower, &self.upper)?;

		let n = self.lower.len();
		let npop = self.config.popsize;
		let maxiter = self.config.maxiter;
		let f = self.config.mutation;
		let cr = self.config.recombination;

		log::debug!(
			"DE init: {} dimensions, population={}, maxiter={}, F={:.3}, CR={:.3}",
			n,
			npop,
			maxiter,
			f,
			cr
		);

		let mut rng: StdRng = match self.config.seed {
			Some(s) => StdRng::seed_from_u64(s),
			None => {
				let mut thread_rng = rand::rng();
				StdRng::from_rng(&mut thread_rng)
			}
		};

		let mut pop = init_random(n, npop, &self.lower, &self.upper, &mut rng);

		let mut energies = Array1::<f64>::zeros(npop);
		for i in 0..npop {
			energies[i] = energy_of(self.func, &pop.row(i).to_owned());
		}
		let mut nfev = npop;

		let (best_idx, mut best_f) = argmin(&energies);
		let mut best_x = pop.row(best_idx).to_owned();
		log::debug!("DE initial best: fitness={:.6e} at index {}", best_f, best_idx);

		let mut history = DEHistory::new(maxiter, n);

		for iter in 1..=maxiter {
			let mut accepted = 0usize;

			for i in 0..npop {
				let mut mutant = mutant_best1(&pop, &best_x, f, &mut rng);
				clip_inplace(&mut mutant, &self.lower, &self.upper);

				let current = pop.row(i).to_owned();
				let trial = whole_vector_crossover(&current, &mutant, cr, &mut rng);

				let current_f = energy_of(self.func, &current);
				let trial_f = energy_of(self.func, &trial);
				nfev += 2;
				energies[i] = current_f;

				if trial_f < current_f {
					pop.row_mut(i).assign(&trial);
					energies[i] = trial_f;
					accepted += 1;
					if trial_f < best_f {
						best_f = trial_f;
						best_x = trial;
					}
				}
			}

			history.record(iter - 1, &best_x, best_f);

			let pop_std = energies.std(0.0);
			log::debug!(
				"DE iter {:4}  best_f={:.6e}  std={:.3e}  accepted={}/{}",
				iter,
				best_f,
				pop_std,
				accepted,
				npop
			);

			if let Some(ref mut cb) = self.config.callback {
				let intermediate = DEIntermediate {
					x: best_x.clone(),
					fun: best_f,
					convergence: pop_std,
					iter,
					population: pop.clone(),
					accepted,
				};
				cb(&intermediate);
			}
		}

		Ok(DEReport {
			x: best_x,
			fun: best_f,
			nit: maxiter,
			nfev,
			population: pop,
			population_energies: energies,
			history,
		})
	}
}
