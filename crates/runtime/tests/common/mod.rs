//! Shared fixtures for runtime integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use game_core::{
    Behavior, BehaviorFactory, BehaviorResult, BehaviorSpec, Catalog, CombatContext,
    ComponentDefinition, ComponentId, EffectApplication, EnemyTemplate, EntityId, EvolutionRecipe,
    GameConfig, OptionKind, ProgressionOption, Tick,
};
use game_content::BehaviorRegistry;
use runtime::{Runtime, RuntimeBuilder};

pub const TICK: Tick = Tick::new(100);

/// Poisons the nearest enemy once and counts poison-tick notifications.
pub struct Poisoner {
    applied: bool,
    ticks_seen: Arc<AtomicUsize>,
}

impl Behavior for Poisoner {
    fn name(&self) -> &'static str {
        "poisoner"
    }

    fn activate(&mut self, ctx: &mut dyn CombatContext) -> BehaviorResult {
        if self.applied {
            return Ok(());
        }
        let Some((target, _)) = ctx.nearest(ctx.owner_position()) else {
            return Ok(());
        };
        self.applied = ctx.apply_effect(
            target,
            EffectApplication::poison(5.0, Tick::new(500), Tick::new(1_500)),
        );
        Ok(())
    }

    fn on_upgrade(&mut self, _ctx: &mut dyn CombatContext, _level: u32) -> BehaviorResult {
        Ok(())
    }

    fn on_poison_tick(
        &mut self,
        _ctx: &mut dyn CombatContext,
        _target: EntityId,
        _damage: f32,
    ) -> BehaviorResult {
        self.ticks_seen.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Builds `Poisoner` for behavior kind "poisoner" and defers every other
/// kind to the built-in registry.
pub struct ScriptedFactory {
    pub poison_ticks_seen: Arc<AtomicUsize>,
    builtin: BehaviorRegistry,
}

impl Default for ScriptedFactory {
    fn default() -> Self {
        Self {
            poison_ticks_seen: Arc::default(),
            builtin: BehaviorRegistry::with_builtin(),
        }
    }
}

impl BehaviorFactory for ScriptedFactory {
    fn create(&self, definition: &ComponentDefinition) -> Option<Box<dyn Behavior>> {
        if definition.behavior.kind != "poisoner" {
            return self.builtin.create(definition);
        }
        Some(Box::new(Poisoner {
            applied: false,
            ticks_seen: Arc::clone(&self.poison_ticks_seen),
        }))
    }
}

pub fn catalog() -> Catalog {
    Catalog::new(
        [
            ComponentDefinition::weapon("fang", 1)
                .with_tags(["toxic"])
                .with_behavior(BehaviorSpec::new("poisoner")),
            ComponentDefinition::weapon("pulse", 3).with_behavior(
                BehaviorSpec::new("pulse_field")
                    .with_param("damage", 50.0)
                    .with_param("radius", 3.0)
                    .with_param("interval", 0.1),
            ),
            ComponentDefinition::upgrade("synapse", 1).with_tags(["nerve"]),
            ComponentDefinition::upgrade("miasma", 3).with_tags(["miasma"]),
            ComponentDefinition::weapon("nerve_toxin", 5).with_tags(["toxic"]),
        ],
        [EvolutionRecipe::new(["toxic"], ["nerve"], "nerve_toxin").with_offer_chance(1.0)],
    )
}

pub fn enemies() -> Vec<EnemyTemplate> {
    vec![
        EnemyTemplate::new("dummy", 12.0, 0.0, 0.0).with_experience(50),
        EnemyTemplate::new("brute", 500.0, 0.0, 1_000.0),
    ]
}

/// Builder over the test catalog. Returns the factory so tests can read its counters.
pub fn builder() -> (RuntimeBuilder, Arc<ScriptedFactory>) {
    let factory = Arc::new(ScriptedFactory::default());
    let builder = Runtime::builder()
        .game_config(GameConfig::without_criticals())
        .seed(11)
        .catalog(catalog())
        .enemies(enemies())
        .behaviors(Arc::clone(&factory) as Arc<dyn BehaviorFactory>);
    (builder, factory)
}

/// Equips `id` straight from the catalog, bypassing the offer screen.
pub fn equip(runtime: &mut Runtime, id: &str) {
    let definition = runtime
        .progression()
        .catalog()
        .definition(&ComponentId::new(id))
        .cloned()
        .expect("component in catalog");
    let kind = if definition.is_weapon() {
        OptionKind::NewWeapon
    } else {
        OptionKind::Upgrade
    };
    runtime
        .select_option(&ProgressionOption::component(kind, definition, 1))
        .expect("equip succeeds");
}

/// Ticks until `predicate` holds or `max_ticks` elapse. Returns whether it held.
pub fn tick_until(
    runtime: &mut Runtime,
    max_ticks: usize,
    mut predicate: impl FnMut(&Runtime) -> bool,
) -> bool {
    for _ in 0..max_ticks {
        if predicate(runtime) {
            return true;
        }
        if runtime.tick(TICK).is_err() {
            return predicate(runtime);
        }
    }
    predicate(runtime)
}
