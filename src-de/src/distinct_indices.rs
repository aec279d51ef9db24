use rand::seq::SliceRandom;
use rand::Rng;

/// Shuffle `0..n` and keep the first `k` entries.
///
/// The whole range is shuffled on every call, so the number of draws taken
/// from `rng` depends on `n` only.
pub(crate) fn distinct_indices<R: Rng + ?Sized>(k: usize, n: usize, rng: &mut R) -> Vec<usize> {
    debug_assert!(k <= n, "cannot draw {} distinct indices out of {}", k, n);
    let mut idxs: Vec<usize> = (0..n).collect();
    idxs.shuffle(rng);
    idxs.truncate(k);
    idxs
}
