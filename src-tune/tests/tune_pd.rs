use std::sync::{Arc, Mutex};

use pdtune::de::DEError;
use pdtune::plant::FeedbackTiming;
use pdtune::{
    GainPair, GenerationProgress, PdTuner, ProgressSink, SilentProgress, TuneError, TuningConfig,
};

#[derive(Default)]
struct Recording {
    generations: Mutex<Vec<GenerationProgress>>,
    finished: Mutex<Vec<(GainPair, f64)>>,
}

impl ProgressSink for Recording {
    fn on_generation(&self, progress: &GenerationProgress) {
        self.generations.lock().unwrap().push(*progress);
    }

    fn on_finish(&self, best: &GainPair, fitness: f64) {
        self.finished.lock().unwrap().push((*best, fitness));
    }
}

fn seeded(seed: u64) -> TuningConfig {
    let mut cfg = TuningConfig::default();
    cfg.de.seed = Some(seed);
    cfg
}

#[test]
fn test_default_scenario_drives_kp_to_lower_bound() {
    let tuner = PdTuner::new(seeded(2024)).unwrap();
    let report = tuner.optimize(Arc::new(SilentProgress)).unwrap();

    // with same-step feedback the index is G * (0.999 + 0.001 kp^2), independent of kd
    let floor = tuner.evaluate(GainPair::new(0.0, 0.0));
    assert!(report.best.kp < 1e-6, "kp = {}", report.best.kp);
    assert!((report.fitness - floor).abs() < 1e-6, "fitness = {}", report.fitness);
    assert_eq!(report.fitness, tuner.evaluate(report.best));
}

#[test]
fn test_same_seed_same_history() {
    let a = PdTuner::new(seeded(11)).unwrap().optimize(Arc::new(SilentProgress)).unwrap();
    let b = PdTuner::new(seeded(11)).unwrap().optimize(Arc::new(SilentProgress)).unwrap();
    assert_eq!(a.history.len(), 50);
    for g in 0..a.history.len() {
        assert_eq!(a.history.kp[g].to_bits(), b.history.kp[g].to_bits());
        assert_eq!(a.history.kd[g].to_bits(), b.history.kd[g].to_bits());
        assert_eq!(a.history.fitness[g].to_bits(), b.history.fitness[g].to_bits());
    }
}

#[test]
fn test_history_is_monotone_and_in_bounds() {
    let cfg = seeded(3);
    let (kp_lo, kp_hi) = cfg.de.kp_bounds;
    let (kd_lo, kd_hi) = cfg.de.kd_bounds;
    let report = PdTuner::new(cfg).unwrap().optimize(Arc::new(SilentProgress)).unwrap();

    assert_eq!(report.history.kp.len(), report.history.kd.len());
    assert_eq!(report.history.kd.len(), report.history.fitness.len());
    for g in 0..report.history.len() {
        let (gains, fitness) = report.history.get(g).unwrap();
        assert!(gains.kp >= kp_lo && gains.kp <= kp_hi);
        assert!(gains.kd >= kd_lo && gains.kd <= kd_hi);
        if g > 0 {
            assert!(fitness <= report.history.fitness[g - 1]);
        }
    }
}

#[test]
fn test_sink_receives_each_generation_and_final_result() {
    let sink = Arc::new(Recording::default());
    let tuner = PdTuner::new(seeded(8)).unwrap();
    let report = tuner.optimize(sink.clone()).unwrap();

    let generations = sink.generations.lock().unwrap();
    assert_eq!(generations.len(), 50);
    for (g, p) in generations.iter().enumerate() {
        assert_eq!(p.generation, g + 1);
        assert_eq!(p.best.kp, report.history.kp[g]);
        assert_eq!(p.best.kd, report.history.kd[g]);
        assert_eq!(p.fitness, report.history.fitness[g]);
    }

    let finished = sink.finished.lock().unwrap();
    assert_eq!(finished.as_slice(), &[(report.best, report.fitness)]);
}

#[test]
fn test_evaluation_count() {
    let mut cfg = seeded(4);
    cfg.de.population_size = 10;
    cfg.de.max_generations = 7;
    let report = PdTuner::new(cfg).unwrap().optimize(Arc::new(SilentProgress)).unwrap();
    assert_eq!(report.evaluations, 10 + 7 * 10 * 2);
    assert_eq!(report.history.len(), 7);
}

#[test]
fn test_population_of_three_fails_before_optimizing() {
    let mut cfg = seeded(1);
    cfg.de.population_size = 3;
    let err = PdTuner::new(cfg).unwrap_err();
    assert!(matches!(
        err,
        TuneError::Optimizer(DEError::PopulationTooSmall { got: 3, min: 4 })
    ));
}

#[test]
fn test_previous_step_feedback_beats_open_loop() {
    let mut cfg = seeded(17);
    cfg.plant.feedback = FeedbackTiming::PreviousStep;
    let tuner = PdTuner::new(cfg).unwrap();
    let report = tuner.optimize(Arc::new(SilentProgress)).unwrap();

    let open_loop = tuner.evaluate(GainPair::new(0.0, 0.0));
    assert!(report.fitness.is_finite());
    assert!(report.fitness < open_loop, "{} >= {}", report.fitness, open_loop);
}

#[test]
fn test_report_serializes_to_json() {
    let mut cfg = seeded(5);
    cfg.de.max_generations = 3;
    let report = PdTuner::new(cfg).unwrap().optimize(Arc::new(SilentProgress)).unwrap();
    let value = serde_json::to_value(&report).unwrap();
    assert!(value["best"]["kp"].is_number());
    assert_eq!(value["history"]["fitness"].as_array().unwrap().len(), 3);
    assert_eq!(value["evaluations"], 30 + 3 * 30 * 2);
}
