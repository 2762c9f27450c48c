//! Extraction from fitted sub-models and the engine registry.

use medboot::extract::{
    combine_block_diagonal, ExtractError, ExtractRequest, ExtractorRegistry, FittedModel,
    ModelBlock, RegistryError, LINEAR_ENGINE,
};
use medboot::{
    effect_statistic, BootstrapConfig, BootstrapEngine, EffectKind, MediationStructure,
    ParametricModel, PathKeys,
};

use crate::common::{ols, simulate};

#[test]
fn linear_extractor_maps_named_coefficients() {
    let table = simulate(250, 3);
    let mediator = ols(&table, "m", &["x"]).unwrap();
    let outcome = ols(&table, "y", &["x", "m"]).unwrap();

    let registry = ExtractorRegistry::with_builtin();
    let structure = registry
        .extract(
            LINEAR_ENGINE,
            &ExtractRequest::new(&mediator, &outcome, "x", "m").data(table.clone()),
        )
        .unwrap();

    assert_eq!(structure.a_path(), mediator.coefficient("x").unwrap());
    assert_eq!(structure.b_path(), outcome.coefficient("m").unwrap());
    assert_eq!(structure.c_prime(), outcome.coefficient("x").unwrap());
    assert_eq!(structure.outcome_name(), "y");
    assert_eq!(structure.mediator_predictors(), ["x"]);
    assert_eq!(structure.outcome_predictors(), ["x", "m"]);
    assert_eq!(structure.sigma_mediator(), mediator.sigma());
    assert_eq!(structure.n_obs(), 250);
    assert_eq!(structure.source_label(), "ols");
    assert_eq!(structure.source_data(), Some(&table));

    let params = structure.parameters();
    assert_eq!(params.names().len(), 5);
    assert_eq!(params.get("m.x"), Some(structure.a_path()));
    assert_eq!(params.get("y.m"), Some(structure.b_path()));

    // Cross-model blocks are zero.
    let cov = structure.covariance();
    for i in 0..2 {
        for j in 2..5 {
            assert_eq!(cov[(i, j)], 0.0);
            assert_eq!(cov[(j, i)], 0.0);
        }
    }
}

#[test]
fn extracted_structure_bootstraps() {
    let table = simulate(250, 4);
    let mediator = ols(&table, "m", &["x"]).unwrap();
    let outcome = ols(&table, "y", &["x", "m"]).unwrap();
    let structure = ExtractorRegistry::with_builtin()
        .extract(LINEAR_ENGINE, &ExtractRequest::new(&mediator, &outcome, "x", "m"))
        .unwrap();

    let indirect = BootstrapEngine::new(BootstrapConfig::quick().seed(8))
        .parametric(&structure, effect_statistic(&structure, EffectKind::Indirect))
        .unwrap();
    assert_eq!(
        indirect.estimate(),
        structure.a_path() * structure.b_path()
    );
    assert!(indirect.ci_lower() <= indirect.ci_upper());
}

#[test]
fn missing_coefficient_reported_through_registry() {
    let table = simulate(80, 5);
    let mediator = ols(&table, "m", &["x"]).unwrap();
    let outcome = ols(&table, "y", &["x"]).unwrap();

    let err = ExtractorRegistry::with_builtin()
        .extract(LINEAR_ENGINE, &ExtractRequest::new(&mediator, &outcome, "x", "m"))
        .unwrap_err();
    match err {
        RegistryError::Extraction {
            engine,
            source: ExtractError::MissingCoefficient { model, name },
        } => {
            assert_eq!(engine, LINEAR_ENGINE);
            assert_eq!(model, "outcome");
            assert_eq!(name, "m");
        }
        other => panic!("Expected MissingCoefficient, got {:?}", other),
    }
}

#[test]
fn observation_mismatch_rejected() {
    let mediator = ols(&simulate(80, 6), "m", &["x"]).unwrap();
    let outcome = ols(&simulate(90, 6), "y", &["x", "m"]).unwrap();

    let err = ExtractorRegistry::with_builtin()
        .extract(LINEAR_ENGINE, &ExtractRequest::new(&mediator, &outcome, "x", "m"))
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::Extraction {
            source: ExtractError::ObservationMismatch {
                mediator: 80,
                outcome: 90
            },
            ..
        }
    ));
}

/// An engine that names parameters by model role rather than by response.
fn by_role(request: &ExtractRequest<'_>) -> Result<MediationStructure, ExtractError> {
    let (parameters, covariance) = combine_block_diagonal(&[
        ModelBlock::new("med", request.mediator_model),
        ModelBlock::new("out", request.outcome_model),
    ])?;
    Ok(MediationStructure::builder(parameters, covariance)
        .path_keys(PathKeys::simple("med.x", "out.m", "out.x"))
        .variables(request.treatment.clone(), request.mediator.clone(), "y")
        .n_obs(request.mediator_model.n_obs())
        .source_label("custom")
        .build()?)
}

#[test]
fn custom_extractor_registered_explicitly() {
    let table = simulate(60, 7);
    let mediator = ols(&table, "m", &["x"]).unwrap();
    let outcome = ols(&table, "y", &["x", "m"]).unwrap();

    let mut registry = ExtractorRegistry::new();
    assert!(registry.require("custom").is_err());
    registry.register("custom", by_role).unwrap();
    let structure = registry
        .extract("custom", &ExtractRequest::new(&mediator, &outcome, "x", "m"))
        .unwrap();

    assert_eq!(structure.source_label(), "custom");
    assert_eq!(structure.a_path(), mediator.coefficient("x").unwrap());
    assert_eq!(registry.engines(), vec!["custom"]);
}
