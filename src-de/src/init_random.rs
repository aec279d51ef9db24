use ndarray::{Array1, Array2};
use rand::Rng;

/// Uniform population in `[lower, upper]`, filled one dimension (column) at a time.
pub(crate) fn init_random<R: Rng + ?Sized>(
    n: usize,
    npop: usize,
    lower: &Array1<f64>,
    upper: &Array1<f64>,
    rng: &mut R,
) -> Array2<f64> {
    let mut pop = Array2::<f64>::zeros((npop, n));
    for j in 0..n {
        let span = upper[j] - lower[j];
        for i in 0..npop {
            pop[(i, j)] = lower[j] + span * rng.random::<f64>();
        }
    }
    pop
}
