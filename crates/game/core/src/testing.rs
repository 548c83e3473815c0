//! In-crate test doubles for the combat context and behavior factory.

use std::sync::{Arc, Mutex};

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::combat::{self, DamageOutcome, DamageRequest, SpatialQuery};
use crate::component::{
    Behavior, BehaviorError, BehaviorFactory, BehaviorResult, CombatContext, ComponentDefinition,
};
use crate::config::GameConfig;
use crate::error::ErrorContext;
use crate::state::{Combatant, Defense, EntityId, Position, Tick};
use crate::stats::{StatChannel, StatModifierStack};
use crate::status::EffectApplication;

pub struct TestContext {
    pub now: Tick,
    pub delta: Tick,
    pub modifiers: StatModifierStack,
    pub defense: Defense,
    pub enemies: Vec<Combatant>,
    pub config: GameConfig,
    pub rng: ChaCha8Rng,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            now: Tick::ZERO,
            delta: Tick::new(100),
            modifiers: StatModifierStack::new(),
            defense: Defense::default(),
            enemies: Vec::new(),
            config: GameConfig::without_criticals(),
            rng: ChaCha8Rng::seed_from_u64(0),
        }
    }
}

impl SpatialQuery for TestContext {
    fn entities_within(&self, center: Position, radius: f32) -> Vec<EntityId> {
        self.enemies
            .iter()
            .filter(|enemy| !enemy.is_dead() && enemy.position.distance(center) <= radius)
            .map(|enemy| enemy.id)
            .collect()
    }

    fn nearest(&self, from: Position) -> Option<(EntityId, Position)> {
        self.enemies
            .iter()
            .filter(|enemy| !enemy.is_dead())
            .min_by(|a, b| {
                a.position
                    .distance_squared(from)
                    .total_cmp(&b.position.distance_squared(from))
            })
            .map(|enemy| (enemy.id, enemy.position))
    }
}

impl CombatContext for TestContext {
    fn now(&self) -> Tick {
        self.now
    }

    fn delta(&self) -> Tick {
        self.delta
    }

    fn owner(&self) -> EntityId {
        EntityId::HERO
    }

    fn owner_position(&self) -> Position {
        Position::ORIGIN
    }

    fn position_of(&self, entity: EntityId) -> Option<Position> {
        self.enemies
            .iter()
            .find(|enemy| enemy.id == entity)
            .map(|enemy| enemy.position)
    }

    fn modifiers(&mut self) -> &mut StatModifierStack {
        &mut self.modifiers
    }

    fn defense(&mut self) -> &mut Defense {
        &mut self.defense
    }

    fn apply_damage(&mut self, request: DamageRequest) -> DamageOutcome {
        let Some(target) = self.enemies.iter_mut().find(|enemy| enemy.id == request.target) else {
            return DamageOutcome::Ignored;
        };
        let source = if request.source == Some(EntityId::HERO) {
            Some(&mut self.modifiers)
        } else {
            None
        };
        combat::apply_damage(&request, source, target, self.now, &self.config, &mut self.rng)
    }

    fn apply_effect(&mut self, target: EntityId, application: EffectApplication) -> bool {
        let now = self.now;
        match self.enemies.iter_mut().find(|enemy| enemy.id == target) {
            Some(enemy) => enemy.status.apply(&mut enemy.vitals, application, now),
            None => false,
        }
    }

    fn heal_owner(&mut self, _amount: f32) -> f32 {
        0.0
    }

    fn rng(&mut self) -> &mut dyn RngCore {
        &mut self.rng
    }
}

/// Factory whose behaviors log every call into a shared journal.
#[derive(Default)]
pub struct RecordingFactory {
    journal: Arc<Mutex<Vec<String>>>,
}

impl RecordingFactory {
    pub fn calls(&self) -> Vec<String> {
        self.journal.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

impl BehaviorFactory for RecordingFactory {
    fn create(&self, definition: &ComponentDefinition) -> Option<Box<dyn Behavior>> {
        Some(Box::new(RecordingBehavior {
            id: definition.id.to_string(),
            journal: Arc::clone(&self.journal),
            applied: 0.0,
        }))
    }
}

struct RecordingBehavior {
    id: String,
    journal: Arc<Mutex<Vec<String>>>,
    applied: f32,
}

impl RecordingBehavior {
    fn record(&self, call: impl std::fmt::Display) {
        if let Ok(mut journal) = self.journal.lock() {
            journal.push(format!("{}:{call}", self.id));
        }
    }
}

impl Behavior for RecordingBehavior {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn initialize(
        &mut self,
        _ctx: &mut dyn CombatContext,
        _definition: &ComponentDefinition,
    ) -> BehaviorResult {
        self.record("init");
        Ok(())
    }

    fn activate(&mut self, ctx: &mut dyn CombatContext) -> BehaviorResult {
        self.record("activate");
        if self.id == "faulty" {
            return Err(BehaviorError::Fault {
                component: crate::component::ComponentId::new(self.id.clone()),
                reason: "scripted failure".to_owned(),
                context: ErrorContext::new(ctx.now()),
            });
        }
        Ok(())
    }

    fn on_upgrade(&mut self, ctx: &mut dyn CombatContext, level: u32) -> BehaviorResult {
        self.record(format!("upgrade:{level}"));
        let target = 0.1 * level as f32;
        let now = ctx.now();
        ctx.modifiers()
            .add_modifier(StatChannel::Damage, target - self.applied, Tick::ZERO, now);
        self.applied = target;
        Ok(())
    }

    fn teardown(&mut self, ctx: &mut dyn CombatContext) {
        self.record("teardown");
        let now = ctx.now();
        ctx.modifiers()
            .add_modifier(StatChannel::Damage, -self.applied, Tick::ZERO, now);
        self.applied = 0.0;
    }
}
