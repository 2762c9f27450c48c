//! Replicate evaluation, sequential or on a rayon pool.
//!
//! Results always come back in replicate index order. Each replicate derives
//! its randomness from its own index, so both paths produce identical values.

use crate::config::BootstrapConfig;
use crate::error::ConfigurationError;

/// Evaluate `f(0), f(1), …, f(n - 1)` and return the results in index order.
#[cfg(feature = "parallel")]
pub(crate) fn map_replicates<T, F>(
    n: usize,
    config: &BootstrapConfig,
    f: F,
) -> Result<Vec<T>, ConfigurationError>
where
    T: Send,
    F: Fn(usize) -> T + Send + Sync,
{
    use rayon::prelude::*;

    if !config.parallel {
        return Ok((0..n).map(f).collect());
    }

    match config.workers {
        Some(workers) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .build()
                .map_err(|e| ConfigurationError::ThreadPool(e.to_string()))?;
            Ok(pool.install(|| (0..n).into_par_iter().map(&f).collect()))
        }
        None => Ok((0..n).into_par_iter().map(f).collect()),
    }
}

/// Evaluate `f(0), f(1), …, f(n - 1)` and return the results in index order.
#[cfg(not(feature = "parallel"))]
pub(crate) fn map_replicates<T, F>(
    n: usize,
    config: &BootstrapConfig,
    f: F,
) -> Result<Vec<T>, ConfigurationError>
where
    T: Send,
    F: Fn(usize) -> T + Send + Sync,
{
    if config.parallel {
        tracing::warn!(
            "parallel evaluation requested but the `parallel` feature is disabled; \
             running sequentially"
        );
    }
    Ok((0..n).map(f).collect())
}
