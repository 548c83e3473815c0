mod common;

use std::sync::Arc;

use common::Arena;
use game_content::BehaviorRegistry;
use game_core::{
    BehaviorSpec, ComponentDefinition, ComponentId, DamageKind, EffectType, Loadout, StatChannel,
};

fn loadout() -> Loadout {
    Loadout::new(4, Arc::new(BehaviorRegistry::with_builtin()))
}

fn spitter() -> Arc<ComponentDefinition> {
    Arc::new(
        ComponentDefinition::weapon("toxic_spitter", 5).with_behavior(
            BehaviorSpec::new("toxic_spitter")
                .with_param("impact", 4.0)
                .with_param("tick_damage", 2.0)
                .with_param("interval", 1.0),
        ),
    )
}

#[test]
fn toxic_spitter_poisons_the_nearest_enemy() {
    let mut arena = Arena::new();
    let near = arena.spawn(2.0, 0.0, 50.0);
    let far = arena.spawn(5.0, 0.0, 50.0);
    let mut loadout = loadout();
    loadout.equip(spitter(), &mut arena).expect("equip");

    loadout.tick(&mut arena);
    assert!(arena.damage_log.is_empty(), "cooldown not elapsed yet");

    arena.step();
    loadout.tick(&mut arena);
    assert_eq!(arena.damage_log.len(), 1);
    assert_eq!(arena.enemy(near).vitals.health, 46.0);
    assert!(arena.enemy(near).status.has_effect(EffectType::Poison));
    assert!(!arena.enemy(far).status.has_effect(EffectType::Poison));
}

#[test]
fn pulse_field_only_hits_inside_its_radius() {
    let mut arena = Arena::new();
    let inside = arena.spawn(1.0, 1.0, 30.0);
    let outside = arena.spawn(10.0, 0.0, 30.0);
    let definition = ComponentDefinition::weapon("pulse_field", 5).with_behavior(
        BehaviorSpec::new("pulse_field")
            .with_param("damage", 10.0)
            .with_param("radius", 2.5)
            .with_param("interval", 0.5),
    );
    let mut loadout = loadout();
    loadout.equip(Arc::new(definition), &mut arena).expect("equip");

    loadout.tick(&mut arena);
    assert_eq!(arena.enemy(inside).vitals.health, 20.0);
    assert_eq!(arena.enemy(outside).vitals.health, 30.0);
    assert!(arena.damage_log.iter().all(|outcome| {
        outcome.report().map(|report| report.kind) == Some(DamageKind::Normal)
    }));
}

#[test]
fn stat_boost_levels_and_teardown() {
    let mut arena = Arena::new();
    let might = Arc::new(
        ComponentDefinition::upgrade("might", 5)
            .with_behavior(BehaviorSpec::new("stat_boost").with_param("damage_per_level", 0.1)),
    );
    let id = ComponentId::new("might");
    let mut loadout = loadout();
    loadout.equip(Arc::clone(&might), &mut arena).expect("equip");
    loadout.upgrade(&id, &mut arena).expect("level 2");

    let now = arena.now;
    let multiplier = arena.hero.modifiers.get_multiplier(StatChannel::Damage, now);
    assert!((multiplier - 1.2).abs() < 1e-5);
    // Levels replace the component's entry rather than stacking deltas.
    assert_eq!(arena.hero.modifiers.len(), 1);

    loadout.teardown_all(&mut arena);
    let multiplier = arena.hero.modifiers.get_multiplier(StatChannel::Damage, now);
    assert!((multiplier - 1.0).abs() < 1e-5);
    assert!(arena.hero.modifiers.is_empty());
}

#[test]
fn carapace_adjusts_defense_by_level() {
    let mut arena = Arena::new();
    let carapace = Arc::new(
        ComponentDefinition::upgrade("carapace", 5).with_behavior(BehaviorSpec::new("carapace")),
    );
    let id = ComponentId::new("carapace");
    let mut loadout = loadout();
    loadout.equip(carapace, &mut arena).expect("equip");
    assert!((arena.hero.defense.damage_reduction - 0.04).abs() < 1e-6);
    assert_eq!(arena.hero.defense.dodge_chance, 0.0);

    loadout.upgrade(&id, &mut arena).expect("level 2");
    loadout.upgrade(&id, &mut arena).expect("level 3");
    assert!((arena.hero.defense.damage_reduction - 0.12).abs() < 1e-6);
    assert!(arena.hero.defense.dodge_chance > 0.0);

    loadout.teardown_all(&mut arena);
    assert!(arena.hero.defense.damage_reduction.abs() < 1e-6);
    assert!(arena.hero.defense.dodge_chance.abs() < 1e-6);
}

#[test]
fn invalid_parameters_fault_without_panicking() {
    let mut arena = Arena::new();
    arena.spawn(1.0, 0.0, 10.0);
    let broken = ComponentDefinition::weapon("broken", 1)
        .with_behavior(BehaviorSpec::new("pulse_field").with_param("damage", -1.0));
    let mut loadout = loadout();
    loadout.equip(Arc::new(broken), &mut arena).expect("equip still succeeds");
    assert!(loadout.contains(&ComponentId::new("broken")));
}
