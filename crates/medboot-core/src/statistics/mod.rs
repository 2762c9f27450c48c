//! Numeric building blocks for the bootstrap engine.
//!
//! - [`rng`]: counter-based per-replicate seeding
//! - [`mvn`]: covariance factorization and multivariate normal draws
//! - [`resample`]: row index resampling
//! - [`quantile`]: type 7 quantiles and percentile intervals

pub mod mvn;
pub mod quantile;
pub mod resample;
pub mod rng;

pub use mvn::{CovarianceFactor, FactorKind};
pub use quantile::{compute_quantile, compute_quantiles, percentile_interval};
pub use resample::bootstrap_indices;
pub use rng::{counter_rng_seed, replicate_rng};

/// Sample standard deviation (n − 1 denominator). NaN for fewer than two
/// values.
pub fn sample_std(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return f64::NAN;
    }
    let mean = data.iter().sum::<f64>() / n as f64;
    let ss: f64 = data.iter().map(|x| (x - mean) * (x - mean)).sum();
    (ss / (n - 1) as f64).sqrt()
}
