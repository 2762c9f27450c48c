//! Row resampling for the nonparametric bootstrap.

use rand::Rng;

/// Draw `n` row indices uniformly with replacement from `0..n`.
pub fn bootstrap_indices<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<usize> {
    (0..n).map(|_| rng.random_range(0..n)).collect()
}
