//! Parametric bootstrap behaviour.

use medboot::{
    effect_statistic, BootstrapConfig, BootstrapEngine, BootstrapError, BootstrapMethod,
    ConfigurationError, EffectKind, MediationStructure, ParameterVector,
};
use nalgebra::DMatrix;
use proptest::prelude::*;

use crate::common::{abc, fitted_structure, simple_structure, simulate, TRUE_A, TRUE_B};

fn product(theta: &ParameterVector) -> f64 {
    theta[0] * theta[1]
}

// ============================================================================
// Worked scenario
// ============================================================================

#[test]
fn product_of_paths_worked_scenario() {
    let structure = simple_structure(0.5, 0.3, 0.2, 0.01);
    let engine = BootstrapEngine::new(BootstrapConfig::new().n_boot(5000).ci_level(0.95).seed(7));
    let outcome = engine.parametric(&structure, product).unwrap();

    assert_eq!(outcome.method(), BootstrapMethod::Parametric);
    assert_eq!(outcome.estimate(), 0.5 * 0.3);
    assert_eq!(outcome.n_boot(), 5000);
    assert_eq!(outcome.replicate_distribution().len(), 5000);
    assert_eq!(outcome.ci_level(), 0.95);
    assert_eq!(outcome.seed(), Some(7));
    assert!(outcome.warnings().is_empty());

    let (lo, hi) = outcome.ci();
    assert!(lo < 0.15 && 0.15 < hi, "CI [{}, {}] should contain 0.15", lo, hi);
    assert!(lo > -0.05 && lo < 0.1, "lower bound {} out of range", lo);
    assert!(hi > 0.2 && hi < 0.35, "upper bound {} out of range", hi);

    // Delta-method SE: sqrt(b²·var(a) + a²·var(b)) = sqrt(0.0034).
    let se = outcome.std_error();
    assert!((se - 0.0034f64.sqrt()).abs() < 0.01, "SE {} too far from 0.058", se);
}

#[test]
fn worked_scenario_brackets_estimate_across_seeds() {
    let structure = simple_structure(0.5, 0.3, 0.2, 0.01);
    let seeds = 0..20u64;
    let bracketed = seeds
        .clone()
        .filter(|&seed| {
            let outcome = BootstrapEngine::new(BootstrapConfig::thorough().seed(seed))
                .parametric(&structure, product)
                .unwrap();
            outcome.ci_lower() < 0.15 && 0.15 < outcome.ci_upper()
        })
        .count();
    assert_eq!(bracketed, seeds.count());
}

#[test]
fn estimate_is_statistic_of_point_estimates_not_replicate_mean() {
    let structure = simple_structure(0.5, 0.3, 0.2, 0.25);
    let engine = BootstrapEngine::new(BootstrapConfig::quick().seed(11));
    let outcome = engine.parametric(&structure, |t| t[0] * t[0]).unwrap();

    let mean: f64 = outcome.replicate_distribution().iter().sum::<f64>()
        / outcome.replicate_distribution().len() as f64;
    assert_eq!(outcome.estimate(), 0.25);
    // E[a²] = a² + var(a), well above the plugin value.
    assert!(mean > 0.4, "replicate mean {} should include the variance", mean);
}

#[test]
fn narrower_level_gives_nested_interval() {
    let structure = simple_structure(0.5, 0.3, 0.2, 0.01);
    let wide = BootstrapEngine::new(BootstrapConfig::new().n_boot(2000).ci_level(0.99).seed(5))
        .parametric(&structure, product)
        .unwrap();
    let narrow = BootstrapEngine::new(BootstrapConfig::new().n_boot(2000).ci_level(0.80).seed(5))
        .parametric(&structure, product)
        .unwrap();

    assert!(wide.ci_lower() <= narrow.ci_lower());
    assert!(narrow.ci_upper() <= wide.ci_upper());
}

#[test]
fn zero_covariance_collapses_interval() {
    let structure = simple_structure(0.5, 0.3, 0.2, 0.0);
    let outcome = BootstrapEngine::new(BootstrapConfig::quick().seed(1))
        .parametric(&structure, product)
        .unwrap();

    assert!(outcome
        .replicate_distribution()
        .iter()
        .all(|&v| v == outcome.estimate()));
    assert_eq!(outcome.ci_lower(), outcome.estimate());
    assert_eq!(outcome.ci_upper(), outcome.estimate());
}

#[test]
fn indefinite_covariance_is_a_configuration_error() {
    let covariance = DMatrix::from_row_slice(3, 3, &[
        1.0, 2.0, 0.0, //
        2.0, 1.0, 0.0, //
        0.0, 0.0, 1.0,
    ]);
    let structure = MediationStructure::builder(abc(0.5, 0.3, 0.2), covariance)
        .variables("x", "m", "y")
        .n_obs(50)
        .build()
        .unwrap();

    let err = BootstrapEngine::new(BootstrapConfig::quick().seed(1))
        .parametric(&structure, product)
        .unwrap_err();
    assert!(matches!(
        err,
        BootstrapError::Configuration(ConfigurationError::NotPositiveSemiDefinite { .. })
    ));
}

#[test]
fn invalid_config_rejected_before_sampling() {
    let structure = simple_structure(0.5, 0.3, 0.2, 0.01);
    let err = BootstrapEngine::new(BootstrapConfig::new().n_boot(0))
        .parametric(&structure, product)
        .unwrap_err();
    assert!(matches!(
        err,
        BootstrapError::Configuration(ConfigurationError::ZeroReplicates)
    ));

    let err = BootstrapEngine::new(BootstrapConfig::new().ci_level(1.0))
        .parametric(&structure, product)
        .unwrap_err();
    assert!(matches!(
        err,
        BootstrapError::Configuration(ConfigurationError::CiLevel(_))
    ));
}

#[test]
fn statistic_reads_parameters_by_name() {
    let structure = simple_structure(0.5, 0.3, 0.2, 0.01);
    let outcome = BootstrapEngine::new(BootstrapConfig::quick().seed(3))
        .parametric(&structure, |t| {
            t.get("a").unwrap_or(f64::NAN) * t.get("b").unwrap_or(f64::NAN)
        })
        .unwrap();
    let by_index = BootstrapEngine::new(BootstrapConfig::quick().seed(3))
        .parametric(&structure, product)
        .unwrap();
    assert_eq!(outcome, by_index);
}

// ============================================================================
// Coverage on simulated data
// ============================================================================

#[test]
fn percentile_interval_covers_true_indirect_effect() {
    let truth = TRUE_A * TRUE_B;
    let trials = 100;
    let mut covered = 0;
    for trial in 0..trials {
        let table = simulate(200, 1000 + trial);
        let structure = fitted_structure(&table);
        let outcome = BootstrapEngine::new(BootstrapConfig::new().n_boot(500).seed(trial))
            .parametric(&structure, effect_statistic(&structure, EffectKind::Indirect))
            .unwrap();
        if outcome.ci_lower() <= truth && truth <= outcome.ci_upper() {
            covered += 1;
        }
    }
    let coverage = covered as f64 / trials as f64;
    assert!(
        coverage >= 0.85,
        "nominal 95% interval covered the truth in only {:.0}% of trials",
        coverage * 100.0
    );
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn interval_is_ordered_and_inside_replicates(seed in any::<u64>(), level in 0.5f64..0.99) {
        let structure = simple_structure(0.5, 0.3, 0.2, 0.02);
        let outcome = BootstrapEngine::new(BootstrapConfig::new().n_boot(64).ci_level(level).seed(seed))
            .parametric(&structure, product)
            .unwrap();

        let dist = outcome.replicate_distribution();
        let min = dist.iter().copied().fold(f64::INFINITY, f64::min);
        let max = dist.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(outcome.ci_lower() <= outcome.ci_upper());
        prop_assert!(min <= outcome.ci_lower());
        prop_assert!(outcome.ci_upper() <= max);
    }
}
