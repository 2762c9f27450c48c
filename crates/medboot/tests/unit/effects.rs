//! Effect decomposition for simple and serial chains.

use medboot::{
    effect_statistic, effects, BootstrapConfig, BootstrapEngine, EffectKind, EffectWarning,
    MediationModel, ParameterVector, SerialMediationStructure,
};
use nalgebra::{DMatrix, DVector};

use crate::common::simple_structure;

fn serial_model() -> SerialMediationStructure {
    let parameters = ParameterVector::new(
        vec![
            "a".into(),
            "d1".into(),
            "d2".into(),
            "b".into(),
            "c_prime".into(),
        ],
        DVector::from_vec(vec![0.6, 0.5, 0.4, 0.3, 0.1]),
    )
    .unwrap();
    SerialMediationStructure::builder(parameters, DMatrix::identity(5, 5) * 0.005)
        .variables("x", "y")
        .mediators(["m1", "m2", "m3"])
        .n_obs(250)
        .build()
        .unwrap()
}

#[test]
fn simple_effect_algebra() {
    let e = effects(&simple_structure(0.5, 0.3, 0.2, 0.01));
    assert_eq!(e.indirect, 0.5 * 0.3);
    assert_eq!(e.direct, 0.2);
    assert_eq!(e.total, 0.5 * 0.3 + 0.2);
    assert_eq!(e.proportion_mediated, e.indirect / e.total);
    assert!((e.proportion_mediated - 0.4286).abs() < 1e-4);
    assert!(e.warning.is_none());
}

#[test]
fn serial_indirect_is_product_along_chain() {
    let e = effects(&serial_model());
    let expected = 0.6 * 0.5 * 0.4 * 0.3;
    assert!((e.indirect - expected).abs() < 1e-15);
    assert_eq!(e.direct, 0.1);
    assert!((e.total - (expected + 0.1)).abs() < 1e-15);
}

#[test]
fn tagged_union_gives_same_effects() {
    let serial = serial_model();
    let direct = effects(&serial);
    let via_union = effects(&MediationModel::from(serial));
    assert_eq!(direct, via_union);
}

#[test]
fn degenerate_total_warns_and_yields_nan_proportion() {
    let e = effects(&simple_structure(0.5, 0.4, -0.2, 0.01));
    assert_eq!(e.total, 0.0);
    assert!(e.proportion_mediated.is_nan());
    assert!(matches!(e.warning, Some(EffectWarning::DegenerateTotal { .. })));
    // Other effects are still reported.
    assert_eq!(e.indirect, 0.5 * 0.4);
    assert_eq!(e.direct, -0.2);
}

#[test]
fn effect_bootstrap_shares_draws_with_single_statistic_runs() {
    let model = serial_model();
    let engine = BootstrapEngine::new(BootstrapConfig::new().n_boot(400).seed(13));
    let all = engine.effects(&model).unwrap();

    for kind in [EffectKind::Indirect, EffectKind::Direct, EffectKind::Total] {
        let single = engine
            .parametric(&model, effect_statistic(&model, kind))
            .unwrap();
        assert_eq!(all.get(kind), &single, "{} differs", kind);
    }
}

#[test]
fn bootstrapped_total_is_indirect_plus_direct_per_replicate() {
    let engine = BootstrapEngine::new(BootstrapConfig::new().n_boot(300).seed(21));
    let all = engine.effects(&simple_structure(0.5, 0.3, 0.2, 0.01)).unwrap();

    let indirect = all.indirect.replicate_distribution();
    let direct = all.direct.replicate_distribution();
    let total = all.total.replicate_distribution();
    for i in 0..300 {
        assert!((total[i] - (indirect[i] + direct[i])).abs() < 1e-12);
    }
    assert_eq!(
        all.iter().map(|(kind, _)| kind).collect::<Vec<_>>(),
        EffectKind::ALL.to_vec()
    );
}
