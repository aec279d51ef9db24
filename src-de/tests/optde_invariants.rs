use std::cell::Cell;
use std::sync::{Arc, Mutex};

use ndarray::{Array1, Array2};
use pdtune_de::{differential_evolution, DEConfigBuilder, DEError, DEIntermediate};

fn bowl(x: &Array1<f64>) -> f64 {
    (x[0] - 7.5).powi(2) + 100.0 * (x[1] - 0.3).powi(2)
}

const BOUNDS: [(f64, f64); 2] = [(0.0, 20.0), (0.0, 1.0)];

#[test]
fn test_same_seed_gives_identical_history() {
    let run = || {
        let config = DEConfigBuilder::new().seed(1234).build();
        differential_evolution(&bowl, &BOUNDS, config).unwrap()
    };
    let a = run();
    let b = run();
    assert_eq!(a.history.len(), 50);
    for g in 0..a.history.len() {
        assert_eq!(a.history.fun[g].to_bits(), b.history.fun[g].to_bits());
        assert_eq!(a.history.x[(g, 0)].to_bits(), b.history.x[(g, 0)].to_bits());
        assert_eq!(a.history.x[(g, 1)].to_bits(), b.history.x[(g, 1)].to_bits());
    }
    assert_eq!(a.x, b.x);
}

#[test]
fn test_best_fitness_is_monotone() {
    let config = DEConfigBuilder::new().seed(77).maxiter(80).build();
    let report = differential_evolution(&bowl, &BOUNDS, config).unwrap();
    for g in 1..report.history.len() {
        assert!(
            report.history.fun[g] <= report.history.fun[g - 1],
            "generation {} got worse: {} > {}",
            g,
            report.history.fun[g],
            report.history.fun[g - 1]
        );
    }
    assert_eq!(report.fun, report.history.fun[report.history.len() - 1]);
}

#[test]
fn test_population_stays_within_bounds() {
    let snapshots: Arc<Mutex<Vec<Array2<f64>>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = snapshots.clone();
    let config = DEConfigBuilder::new()
        .seed(5)
        .callback(Box::new(move |it: &DEIntermediate| {
            sink.lock().unwrap().push(it.population.clone())
        }))
        .build();
    let report = differential_evolution(&bowl, &BOUNDS, config).unwrap();

    let snapshots = snapshots.lock().unwrap();
    assert_eq!(snapshots.len(), 50);
    for pop in snapshots.iter() {
        assert_eq!(pop.nrows(), 30);
        for row in pop.rows() {
            for (d, &v) in row.iter().enumerate() {
                assert!(v >= BOUNDS[d].0 && v <= BOUNDS[d].1, "dim {} out of bounds: {}", d, v);
            }
        }
    }
    for (d, &v) in report.x.iter().enumerate() {
        assert!(v >= BOUNDS[d].0 && v <= BOUNDS[d].1);
    }
}

#[test]
fn test_evaluation_count() {
    let calls = Cell::new(0usize);
    let counted = |x: &Array1<f64>| {
        calls.set(calls.get() + 1);
        bowl(x)
    };
    let config = DEConfigBuilder::new().seed(9).popsize(30).maxiter(50).build();
    let report = differential_evolution(&counted, &BOUNDS, config).unwrap();
    assert_eq!(calls.get(), 30 + 50 * 30 * 2);
    assert_eq!(report.nfev, calls.get());
}

#[test]
fn test_callback_sees_every_generation_in_order() {
    let seen: Arc<Mutex<Vec<(usize, f64)>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let config = DEConfigBuilder::new()
        .seed(21)
        .maxiter(12)
        .callback(Box::new(move |it: &DEIntermediate| {
            sink.lock().unwrap().push((it.iter, it.fun))
        }))
        .build();
    let report = differential_evolution(&bowl, &BOUNDS, config).unwrap();

    let seen = seen.lock().unwrap();
    let iters: Vec<usize> = seen.iter().map(|&(i, _)| i).collect();
    assert_eq!(iters, (1..=12).collect::<Vec<_>>());
    for (g, &(_, fun)) in seen.iter().enumerate() {
        assert_eq!(fun, report.history.fun[g]);
    }
}

#[test]
fn test_population_of_three_is_rejected_before_any_evaluation() {
    let calls = Cell::new(0usize);
    let counted = |x: &Array1<f64>| {
        calls.set(calls.get() + 1);
        bowl(x)
    };
    let config = DEConfigBuilder::new().seed(1).popsize(3).build();
    let err = differential_evolution(&counted, &BOUNDS, config).unwrap_err();
    assert_eq!(err, DEError::PopulationTooSmall { got: 3, min: 4 });
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_inverted_bounds_are_rejected() {
    let config = DEConfigBuilder::new().seed(1).build();
    let err = differential_evolution(&bowl, &[(0.0, 20.0), (1.0, 0.0)], config).unwrap_err();
    assert!(matches!(err, DEError::InvalidBounds { index: 1, .. }));
}

#[test]
fn test_nan_first_member_does_not_freeze_best() {
    let calls = Cell::new(0usize);
    let nan_first = |x: &Array1<f64>| {
        calls.set(calls.get() + 1);
        if calls.get() == 1 { f64::NAN } else { bowl(x) }
    };
    let config = DEConfigBuilder::new().seed(31).maxiter(20).build();
    let report = differential_evolution(&nan_first, &BOUNDS, config).unwrap();

    assert!(report.fun.is_finite(), "best fitness = {}", report.fun);
    assert!(report.history.fun.iter().all(|f| f.is_finite()));
    assert!(report.population_energies.iter().all(|e| !e.is_nan()));
}

#[test]
fn test_nan_region_ranks_worst() {
    // undefined for kp below 10
    let partial = |x: &Array1<f64>| if x[0] < 10.0 { f64::NAN } else { bowl(x) };
    let config = DEConfigBuilder::new().seed(12).build();
    let report = differential_evolution(&partial, &BOUNDS, config).unwrap();

    assert!(report.fun.is_finite());
    assert!(report.x[0] >= 10.0, "best = {:?}", report.x);
    for g in 1..report.history.len() {
        assert!(report.history.fun[g] <= report.history.fun[g - 1]);
    }
}
