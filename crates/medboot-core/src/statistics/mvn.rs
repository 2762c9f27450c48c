//! Multivariate normal draws around a parameter vector.
//!
//! The covariance is factored once as `Σ = L·Lᵀ` and every replicate is
//! `θ* = μ + L·z` with `z ~ N(0, I)`. Each replicate's `z` comes from that
//! replicate's own generator, and all replicates are formed with a single
//! matrix product, so the draws for a given seed do not depend on how the
//! statistic is later evaluated.

use nalgebra::{Cholesky, DMatrix, SymmetricEigen};
use rand::Rng;
use rand_distr::StandardNormal;

use crate::constants::COVARIANCE_TOLERANCE;
use crate::error::ConfigurationError;
use crate::statistics::rng::replicate_rng;
use crate::types::{Covariance, Estimates};

/// How the covariance square root was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorKind {
    /// Lower Cholesky factor of a positive definite covariance.
    Cholesky,
    /// `V·diag(√λ)` from the symmetric eigendecomposition; used for
    /// singular positive semi-definite covariances.
    EigenSqrt,
}

/// A square root `L` of a covariance matrix with `L·Lᵀ = Σ`.
#[derive(Debug, Clone)]
pub struct CovarianceFactor {
    factor: DMatrix<f64>,
    kind: FactorKind,
}

impl CovarianceFactor {
    /// Factor `covariance`.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::NonFiniteCovariance`] if any entry is NaN or infinite.
    /// - [`ConfigurationError::AsymmetricCovariance`] if `Σ ≠ Σᵀ` beyond tolerance.
    /// - [`ConfigurationError::NotPositiveSemiDefinite`] if an eigenvalue is
    ///   negative beyond tolerance.
    pub fn new(covariance: &Covariance) -> Result<Self, ConfigurationError> {
        if covariance.iter().any(|v| !v.is_finite()) {
            return Err(ConfigurationError::NonFiniteCovariance);
        }

        // Both tolerances are relative to the matrix's own magnitude.
        let scale = covariance.amax();
        let asymmetry = (covariance - covariance.transpose()).amax();
        if asymmetry > COVARIANCE_TOLERANCE * scale {
            return Err(ConfigurationError::AsymmetricCovariance { asymmetry });
        }
        let symmetric = (covariance + covariance.transpose()) * 0.5;

        if let Some(chol) = Cholesky::new(symmetric.clone()) {
            return Ok(Self {
                factor: chol.l(),
                kind: FactorKind::Cholesky,
            });
        }

        let eigen = SymmetricEigen::new(symmetric);
        let min_eigenvalue = eigen.eigenvalues.min();
        let eigen_scale = eigen.eigenvalues.amax();
        if min_eigenvalue < -COVARIANCE_TOLERANCE * eigen_scale {
            return Err(ConfigurationError::NotPositiveSemiDefinite { min_eigenvalue });
        }

        tracing::warn!(
            dim = covariance.nrows(),
            min_eigenvalue,
            "covariance is singular; sampling through its eigen square root"
        );
        let roots = eigen.eigenvalues.map(|l| l.max(0.0).sqrt());
        let factor = eigen.eigenvectors * DMatrix::from_diagonal(&roots);
        Ok(Self {
            factor,
            kind: FactorKind::EigenSqrt,
        })
    }

    /// Which decomposition produced the factor.
    pub fn kind(&self) -> FactorKind {
        self.kind
    }

    /// Number of parameters.
    pub fn dim(&self) -> usize {
        self.factor.nrows()
    }

    /// The factor `L`.
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.factor
    }

    /// Draw `n` vectors from `N(mean, Σ)`, one per column.
    ///
    /// Column `i` uses `replicate_rng(seed, i)`.
    pub fn sample(&self, mean: &Estimates, n: usize, seed: u64) -> DMatrix<f64> {
        let dim = self.dim();
        debug_assert_eq!(mean.len(), dim);

        let mut z = Vec::with_capacity(dim * n);
        for i in 0..n {
            let mut rng = replicate_rng(seed, i);
            z.extend((0..dim).map(|_| rng.sample::<f64, _>(StandardNormal)));
        }
        let z = DMatrix::from_vec(dim, n, z);

        let mut draws = &self.factor * z;
        for mut column in draws.column_iter_mut() {
            column += mean;
        }
        draws
    }
}
