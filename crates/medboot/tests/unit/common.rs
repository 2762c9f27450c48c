//! Shared fixtures: simulated mediation data and a least-squares fitter.

#![allow(dead_code)]

use medboot::extract::{ExtractRequest, LinearExtractor, Extractor, ModelFit, INTERCEPT};
use medboot::{MediationStructure, ObservationTable, ParameterVector, StatisticError};
use nalgebra::{DMatrix, DVector};
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use rand_xoshiro::Xoshiro256PlusPlus;

/// True treatment-to-mediator path used by [`simulate`].
pub const TRUE_A: f64 = 0.5;
/// True mediator-to-outcome path used by [`simulate`].
pub const TRUE_B: f64 = 0.4;
/// True direct path used by [`simulate`].
pub const TRUE_C_PRIME: f64 = 0.2;

/// `n` rows of `x ~ Bernoulli(0.5)`, `m = a·x + e`, `y = c'·x + b·m + e`.
pub fn simulate(n: usize, seed: u64) -> ObservationTable {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut x = Vec::with_capacity(n);
    let mut m = Vec::with_capacity(n);
    let mut y = Vec::with_capacity(n);
    for _ in 0..n {
        let xi = if rng.random_bool(0.5) { 1.0 } else { 0.0 };
        let e_m: f64 = rng.sample(StandardNormal);
        let e_y: f64 = rng.sample(StandardNormal);
        let mi = TRUE_A * xi + e_m;
        x.push(xi);
        m.push(mi);
        y.push(TRUE_C_PRIME * xi + TRUE_B * mi + e_y);
    }
    ObservationTable::from_columns(vec![("x", x), ("m", m), ("y", y)]).unwrap()
}

/// Ordinary least squares of `response` on an intercept and `predictors`.
pub fn ols(
    table: &ObservationTable,
    response: &str,
    predictors: &[&str],
) -> Result<ModelFit, StatisticError> {
    let n = table.n_rows();
    let p = predictors.len() + 1;
    let mut design = DMatrix::from_element(n, p, 1.0);
    for (j, name) in predictors.iter().enumerate() {
        let column = table
            .column(name)
            .ok_or_else(|| format!("missing column '{}'", name))?;
        design.set_column(j + 1, &column);
    }
    let y: DVector<f64> = table
        .column(response)
        .ok_or_else(|| format!("missing column '{}'", response))?
        .into_owned();

    let xtx = design.transpose() * &design;
    let xtx_inv = xtx.try_inverse().ok_or("singular design matrix")?;
    let beta = &xtx_inv * design.transpose() * &y;
    let residuals = &y - &design * &beta;
    let df = n.saturating_sub(p).max(1) as f64;
    let sigma2 = residuals.norm_squared() / df;

    let mut names = vec![INTERCEPT.to_string()];
    names.extend(predictors.iter().map(|s| s.to_string()));
    Ok(ModelFit {
        response: response.to_string(),
        names,
        coefficients: beta,
        covariance: xtx_inv * sigma2,
        sigma: Some(sigma2.sqrt()),
        n_obs: n,
        converged: true,
        engine: "ols".to_string(),
    })
}

/// Fit both sub-models on `table` and extract a simple structure.
pub fn fitted_structure(table: &ObservationTable) -> MediationStructure {
    let mediator = ols(table, "m", &["x"]).unwrap();
    let outcome = ols(table, "y", &["x", "m"]).unwrap();
    LinearExtractor
        .extract(&ExtractRequest::new(&mediator, &outcome, "x", "m").data(table.clone()))
        .unwrap()
}

/// Indirect effect `a·b` refitted from a (resampled) table.
pub fn refit_indirect(table: &ObservationTable) -> Result<f64, StatisticError> {
    let mediator = ols(table, "m", &["x"])?;
    let outcome = ols(table, "y", &["x", "m"])?;
    let a = mediator.coefficients[1];
    let b = outcome.coefficients[2];
    Ok(a * b)
}

/// Parameters named `a`, `b`, `c_prime`.
pub fn abc(a: f64, b: f64, c_prime: f64) -> ParameterVector {
    ParameterVector::new(
        vec!["a".into(), "b".into(), "c_prime".into()],
        DVector::from_vec(vec![a, b, c_prime]),
    )
    .unwrap()
}

/// A simple structure with diagonal covariance `var·I`.
pub fn simple_structure(a: f64, b: f64, c_prime: f64, var: f64) -> MediationStructure {
    MediationStructure::builder(abc(a, b, c_prime), DMatrix::identity(3, 3) * var)
        .variables("x", "m", "y")
        .sigmas(Some(1.0), Some(1.0))
        .n_obs(100)
        .build()
        .unwrap()
}
