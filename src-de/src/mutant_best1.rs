use ndarray::{Array1, Array2};
use rand::Rng;

use crate::distinct_indices::distinct_indices;

/// `best + f * (x_r1 - x_r2)`.
///
/// Four distinct indices are sampled; `r3` and `r4` are discarded but their
/// sampling keeps the random stream identical to the four-index scheme.
pub(crate) fn mutant_best1<R: Rng + ?Sized>(
    pop: &Array2<f64>,
    best: &Array1<f64>,
    f: f64,
    rng: &mut R,
) -> Array1<f64> {
    let idxs = distinct_indices(4, pop.nrows(), rng);
    let r1 = idxs[0];
    let r2 = idxs[1];
    let diff = &pop.row(r1) - &pop.row(r2);
    best + &(diff * f)
}
