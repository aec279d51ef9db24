use ndarray::Array1;
use rand::Rng;

/// One `U[0,1)` draw per dimension; if any draw is below `cr` the trial is the
/// whole mutant, otherwise it is a copy of `target`.
///
/// Every draw is consumed even after the first hit.
pub(crate) fn whole_vector_crossover<R: Rng + ?Sized>(
    target: &Array1<f64>,
    mutant: &Array1<f64>,
    cr: f64,
    rng: &mut R,
) -> Array1<f64> {
    let mut take_mutant = false;
    for _ in 0..target.len() {
        if rng.random::<f64>() < cr {
            take_mutant = true;
        }
    }
    if take_mutant { mutant.clone() } else { target.clone() }
}
