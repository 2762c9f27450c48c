//! Construction-time invariants of both structure variants.

use std::sync::Arc;

use medboot::{
    MediationModel, MediationStructure, ParameterVector, ParametricModel, PathKeys,
    SerialMediationStructure, ValidationError,
};
use nalgebra::{DMatrix, DVector};

use crate::common::{abc, simple_structure, simulate};

fn builder() -> medboot::MediationStructureBuilder {
    MediationStructure::builder(abc(0.5, 0.3, 0.2), DMatrix::identity(3, 3) * 0.01)
        .variables("x", "m", "y")
        .n_obs(100)
}

fn serial_parameters() -> ParameterVector {
    ParameterVector::new(
        vec!["a".into(), "d1".into(), "b".into(), "c_prime".into()],
        DVector::from_vec(vec![0.5, 0.4, 0.3, 0.2]),
    )
    .unwrap()
}

fn serial_builder() -> medboot::SerialMediationStructureBuilder {
    SerialMediationStructure::builder(serial_parameters(), DMatrix::identity(4, 4) * 0.01)
        .variables("x", "y")
        .mediators(["m1", "m2"])
        .n_obs(100)
}

// ============================================================================
// Simple structure
// ============================================================================

#[test]
fn valid_simple_structure_exposes_paths() {
    let s = builder().paths(0.5, 0.3, 0.2).build().unwrap();
    assert_eq!(s.a_path(), 0.5);
    assert_eq!(s.b_path(), 0.3);
    assert_eq!(s.c_prime(), 0.2);
    assert_eq!(s.treatment_name(), "x");
    assert_eq!(s.mediator_name(), "m");
    assert_eq!(s.outcome_name(), "y");
    assert_eq!(s.n_obs(), 100);
    assert!(s.source_data().is_none());
}

#[test]
fn non_square_covariance_rejected() {
    let err = MediationStructure::builder(abc(0.5, 0.3, 0.2), DMatrix::zeros(3, 2))
        .variables("x", "m", "y")
        .n_obs(100)
        .build()
        .unwrap_err();
    assert_eq!(err, ValidationError::CovarianceNotSquare { rows: 3, cols: 2 });
}

#[test]
fn covariance_dimension_mismatch_rejected() {
    let err = MediationStructure::builder(abc(0.5, 0.3, 0.2), DMatrix::identity(4, 4))
        .variables("x", "m", "y")
        .n_obs(100)
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        ValidationError::DimensionMismatch {
            estimates: 3,
            covariance: 4
        }
    );
}

#[test]
fn negative_or_nan_sigma_rejected() {
    let err = builder().sigmas(Some(-0.1), None).build().unwrap_err();
    assert!(matches!(
        err,
        ValidationError::NegativeSigma {
            field: "sigma_mediator",
            ..
        }
    ));

    let err = builder().sigmas(Some(1.0), Some(f64::NAN)).build().unwrap_err();
    assert!(matches!(
        err,
        ValidationError::NegativeSigma {
            field: "sigma_outcome",
            ..
        }
    ));

    // Zero is allowed.
    assert!(builder().sigmas(Some(0.0), Some(0.0)).build().is_ok());
}

#[test]
fn zero_observations_rejected() {
    let err = builder().n_obs(0).build().unwrap_err();
    assert_eq!(err, ValidationError::ZeroObservations);
}

#[test]
fn source_data_row_count_must_match() {
    let err = builder().source_data(simulate(40, 1)).build().unwrap_err();
    assert_eq!(
        err,
        ValidationError::SourceRowMismatch {
            n_obs: 100,
            rows: 40
        }
    );

    let s = builder().source_data(simulate(100, 1)).build().unwrap();
    assert_eq!(s.source_data().map(|t| t.n_rows()), Some(100));
}

#[test]
fn path_value_must_match_keyed_estimate() {
    let err = builder().paths(0.5, 0.31, 0.2).build().unwrap_err();
    match err {
        ValidationError::PathValueMismatch {
            field,
            key,
            value,
            estimate,
        } => {
            assert_eq!(field, "b_path");
            assert_eq!(key, "b");
            assert_eq!(value, 0.31);
            assert_eq!(estimate, 0.3);
        }
        other => panic!("Expected PathValueMismatch, got {:?}", other),
    }
}

#[test]
fn unknown_path_key_rejected() {
    let err = builder()
        .path_keys(PathKeys::simple("a", "b", "direct"))
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        ValidationError::UnknownPathKey {
            field: "c_prime",
            key: "direct".to_string()
        }
    );
}

#[test]
fn non_finite_path_rejected() {
    let err = MediationStructure::builder(abc(f64::INFINITY, 0.3, 0.2), DMatrix::identity(3, 3))
        .variables("x", "m", "y")
        .n_obs(100)
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        ValidationError::NonFiniteCoefficient { field: "a_path", .. }
    ));
}

#[test]
fn missing_variable_names_rejected() {
    let err = MediationStructure::builder(abc(0.5, 0.3, 0.2), DMatrix::identity(3, 3))
        .n_obs(100)
        .build()
        .unwrap_err();
    assert_eq!(err, ValidationError::MissingField("treatment_name"));
}

#[test]
fn duplicate_parameter_names_rejected() {
    let err = ParameterVector::new(
        vec!["a".into(), "a".into()],
        DVector::from_vec(vec![0.1, 0.2]),
    )
    .unwrap_err();
    assert_eq!(err, ValidationError::DuplicateParameterName("a".to_string()));
}

#[test]
fn source_data_is_shared_not_copied() {
    let table = Arc::new(simulate(100, 2));
    let s = builder().source_data(Arc::clone(&table)).build().unwrap();
    let cloned = s.clone();
    assert!(Arc::ptr_eq(s.shared_source_data().unwrap(), &table));
    assert!(Arc::ptr_eq(cloned.shared_source_data().unwrap(), &table));
}

// ============================================================================
// Serial structure
// ============================================================================

#[test]
fn valid_serial_structure_has_canonical_predictors() {
    let s = serial_builder().build().unwrap();
    assert_eq!(s.a_path(), 0.5);
    assert_eq!(s.d_path(), &[0.4]);
    assert_eq!(s.b_path(), 0.3);
    assert_eq!(s.c_prime(), 0.2);
    assert_eq!(s.mediator_names(), ["m1", "m2"]);
    assert_eq!(s.mediator_predictors()[0], vec!["x".to_string()]);
    assert_eq!(
        s.mediator_predictors()[1],
        vec!["x".to_string(), "m1".to_string()]
    );
}

#[test]
fn serial_needs_two_mediators() {
    let err = serial_builder().mediators(["m1"]).build().unwrap_err();
    assert_eq!(err, ValidationError::TooFewMediators { got: 1 });
}

#[test]
fn serial_d_path_length_checked() {
    let err = serial_builder()
        .paths(0.5, vec![0.4, 0.1], 0.3, 0.2)
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        ValidationError::DPathLength {
            mediators: 2,
            expected: 1,
            got: 2
        }
    ));
}

#[test]
fn serial_mediator_predictors_length_checked() {
    let err = serial_builder()
        .mediator_predictors(vec![vec!["x".to_string()]])
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        ValidationError::MediatorPredictorsLength {
            expected: 2,
            got: 1
        }
    );
}

#[test]
fn serial_duplicate_mediators_rejected() {
    let err = serial_builder().mediators(["m", "m"]).build().unwrap_err();
    assert_eq!(err, ValidationError::DuplicateMediatorName("m".to_string()));
}

#[test]
fn serial_sigma_lengths_checked() {
    let err = serial_builder()
        .sigmas(Some(vec![1.0]), Some(1.0))
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        ValidationError::SigmaMediatorsLength {
            expected: 2,
            got: 1
        }
    );

    let err = serial_builder()
        .sigmas(Some(vec![1.0, -2.0]), Some(1.0))
        .build()
        .unwrap_err();
    assert!(matches!(err, ValidationError::NegativeSigma { .. }));
}

#[test]
fn serial_zero_observations_rejected() {
    let err = serial_builder().n_obs(0).build().unwrap_err();
    assert_eq!(err, ValidationError::ZeroObservations);
}

#[test]
fn serial_source_data_row_count_must_match() {
    let err = serial_builder()
        .source_data(simulate(40, 3))
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        ValidationError::SourceRowMismatch {
            n_obs: 100,
            rows: 40
        }
    );

    let s = serial_builder().source_data(simulate(100, 3)).build().unwrap();
    assert_eq!(s.source_data().map(|t| t.n_rows()), Some(100));
}

#[test]
fn serial_negative_sigma_outcome_rejected() {
    let err = serial_builder()
        .sigmas(Some(vec![1.0, 1.0]), Some(-0.5))
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        ValidationError::NegativeSigma {
            field: "sigma_outcome",
            ..
        }
    ));

    assert!(serial_builder().sigmas(None, Some(0.0)).build().is_ok());
}

// ============================================================================
// Tagged union
// ============================================================================

#[test]
fn mediation_model_dispatches_to_variant() {
    let simple: MediationModel = simple_structure(0.5, 0.3, 0.2, 0.01).into();
    let serial: MediationModel = serial_builder().build().unwrap().into();

    assert_eq!(simple.n_mediators(), 1);
    assert_eq!(serial.n_mediators(), 2);
    assert_eq!(simple.parameters().len(), 3);
    assert_eq!(serial.parameters().len(), 4);
    assert_eq!(serial.path_indices().d, vec![1]);

    let (names, estimates, covariance) = serial.as_parametric_model();
    assert_eq!(names, ["a", "d1", "b", "c_prime"]);
    assert_eq!(estimates.len(), 4);
    assert_eq!(covariance.shape(), (4, 4));
}

#[test]
fn mediation_model_reports_fit_metadata() {
    let simple: MediationModel = builder()
        .source_label("ols")
        .converged(false)
        .build()
        .unwrap()
        .into();
    let serial: MediationModel = serial_builder().source_label("sem").build().unwrap().into();

    assert_eq!(simple.source_label(), "ols");
    assert!(!simple.converged());
    assert_eq!(serial.source_label(), "sem");
    assert!(serial.converged());
}
