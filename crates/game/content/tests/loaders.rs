use std::fs;

use game_content::{BehaviorRegistry, ConfigLoader, ContentFactory, EnemyLoader};
use game_core::{BehaviorFactory, ComponentId};
use tempfile::TempDir;

#[test]
fn bundled_content_loads() {
    let factory = ContentFactory::bundled();

    let config = factory.load_config().expect("config.toml");
    assert_eq!(config.weapon_slots, 4);
    assert_eq!(config.hero.max_health, 300.0);

    let enemies = factory.load_enemies().expect("enemies.ron");
    assert!(enemies.iter().any(|enemy| enemy.id == "crawler"));

    let catalog = factory.load_catalog().expect("catalog.ron");
    assert!(catalog.is_evolution_result(&ComponentId::new("nerve_toxin")));
    assert!(catalog.is_evolution_result(&ComponentId::new("glacial_edge")));

    let starters: Vec<_> = catalog
        .starter_weapons()
        .map(|definition| definition.id.as_str().to_owned())
        .collect();
    assert_eq!(starters, ["pulse_field", "boomerang", "toxic_spitter"]);
}

#[test]
fn every_bundled_component_has_a_behavior() {
    let catalog = ContentFactory::bundled().load_catalog().expect("catalog.ron");
    let registry = BehaviorRegistry::with_builtin();
    for definition in catalog.weapons().iter().chain(catalog.upgrades()) {
        assert!(
            registry.create(definition).is_some(),
            "{} has no registered behavior",
            definition.id
        );
    }
}

#[test]
fn config_and_enemies_from_temp_dir() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(
        dir.path().join("config.toml"),
        "choice_count = 4\n[experience]\nbase = 10\n",
    )
    .expect("write config");
    fs::write(
        dir.path().join("enemies.ron"),
        r#"(enemies: [(id: "gnat", max_health: 3.0, move_speed: 5.0, contact_damage: 1.0)])"#,
    )
    .expect("write enemies");

    let factory = ContentFactory::new(dir.path());
    let config = factory.load_config().expect("config");
    assert_eq!(config.choice_count, 4);
    assert_eq!(config.experience.base, 10);

    let enemies = factory.load_enemies().expect("enemies");
    assert_eq!(enemies.len(), 1);
    assert_eq!(enemies[0].experience, 1);
    assert_eq!(enemies[0].contact_cooldown_secs, 1.0);
}

#[test]
fn missing_files_report_their_path() {
    let dir = TempDir::new().expect("tempdir");
    let err = ContentFactory::new(dir.path())
        .load_catalog()
        .expect_err("no catalog");
    assert!(err.to_string().contains("catalog.ron"));
}

#[test]
fn malformed_files_are_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let config = dir.path().join("config.toml");
    fs::write(&config, "weapon_slots = \"many\"").expect("write");
    assert!(ConfigLoader::load(&config).is_err());

    let enemies = dir.path().join("enemies.ron");
    fs::write(
        &enemies,
        r#"(enemies: [(id: "ghost", max_health: 0.0, move_speed: 1.0, contact_damage: 1.0)])"#,
    )
    .expect("write");
    assert!(EnemyLoader::load(&enemies).is_err());
}
