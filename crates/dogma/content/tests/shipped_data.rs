//! Loads the bundled data directory and evaluates the sample fit.

use std::path::PathBuf;

use dogma_content::ContentFactory;
use dogma_core::{AttributeId, DogmaEngine, DogmaEnv, ItemId, PenaltyCurve};

const COMMAND_BONUS: AttributeId = AttributeId(2468);
const DAMAGE_MULTIPLIER: AttributeId = AttributeId(64);
const MAX_VELOCITY: AttributeId = AttributeId(37);

fn factory() -> ContentFactory {
    ContentFactory::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data"))
}

fn find(fitted: &[(String, ItemId)], name: &str) -> ItemId {
    fitted
        .iter()
        .find(|(label, _)| label == name)
        .map(|(_, id)| *id)
        .unwrap()
}

#[test]
fn bundled_content_is_consistent() {
    let factory = factory();
    let types = factory.load_types().unwrap();
    let registry = factory.load_registry().unwrap();
    ContentFactory::check_effects(&types, &registry).unwrap();

    let config = factory.load_config().unwrap();
    assert_eq!(config.stacking_falloff, 2.67);
}

#[test]
fn sample_fit_evaluates() {
    let factory = factory();
    let snapshot = factory.load_static().unwrap();
    let registry = factory.load_registry().unwrap();
    let config = factory.load_config().unwrap();
    let fit = factory.load_fit("proteus_skirmish.ron").unwrap();

    let mut engine =
        DogmaEngine::with_config(DogmaEnv::from_snapshot(&snapshot, &registry), config);
    let fitted = fit.apply(&mut engine).unwrap();

    let skirmish = find(&fitted, "Skirmish Command Burst I");
    let shield = find(&fitted, "Shield Command Burst I");
    let railgun = find(&fitted, "125mm Railgun I");
    let ship = find(&fitted, "Proteus");

    let boosted = engine.get(skirmish, COMMAND_BONUS).unwrap();
    assert!((boosted - 12.0).abs() < 1e-9);
    assert_eq!(engine.get(shield, COMMAND_BONUS).unwrap(), 10.0);

    let curve = PenaltyCurve::default();
    let expected = 2.0 * 1.5 * 1.12 * 1.1 * (1.0 + 0.1 * curve.multiplier(1));
    let damage = engine.get(railgun, DAMAGE_MULTIPLIER).unwrap();
    assert!((damage - expected).abs() < 1e-9);

    assert_eq!(engine.get(ship, MAX_VELOCITY).unwrap(), 425.0);
    assert!(!engine.diagnostics().has_cycles());
}
