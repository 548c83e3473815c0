//! Minimal arena implementing `CombatContext` for behavior tests.
#![allow(dead_code)]

use game_core::{
    CombatContext, Combatant, DamageOutcome, DamageRequest, Defense, EffectApplication, EntityId,
    GameConfig, Position, SpatialQuery, StatModifierStack, Tick, combat,
};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub struct Arena {
    pub now: Tick,
    pub delta: Tick,
    pub hero: Combatant,
    pub enemies: Vec<Combatant>,
    pub config: GameConfig,
    pub rng: ChaCha8Rng,
    pub damage_log: Vec<DamageOutcome>,
}

impl Arena {
    pub fn new() -> Self {
        Self {
            now: Tick::ZERO,
            delta: Tick::new(500),
            hero: Combatant::new(EntityId::HERO, Position::ORIGIN, 100.0),
            enemies: Vec::new(),
            config: GameConfig::without_criticals(),
            rng: ChaCha8Rng::seed_from_u64(7),
            damage_log: Vec::new(),
        }
    }

    pub fn spawn(&mut self, x: f32, y: f32, health: f32) -> EntityId {
        let id = EntityId(self.enemies.len() as u32 + 1);
        self.enemies
            .push(Combatant::new(id, Position::new(x, y), health));
        id
    }

    pub fn enemy(&self, id: EntityId) -> &Combatant {
        self.enemies
            .iter()
            .find(|enemy| enemy.id == id)
            .expect("enemy exists")
    }

    pub fn step(&mut self) {
        self.now = self.now + self.delta;
    }
}

impl SpatialQuery for Arena {
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

impl CombatContext for Arena {
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
        self.hero.position
    }

    fn position_of(&self, entity: EntityId) -> Option<Position> {
        self.enemies
            .iter()
            .find(|enemy| enemy.id == entity)
            .map(|enemy| enemy.position)
    }

    fn modifiers(&mut self) -> &mut StatModifierStack {
        &mut self.hero.modifiers
    }

    fn defense(&mut self) -> &mut Defense {
        &mut self.hero.defense
    }

    fn apply_damage(&mut self, request: DamageRequest) -> DamageOutcome {
        let Some(target) = self.enemies.iter_mut().find(|enemy| enemy.id == request.target) else {
            return DamageOutcome::Ignored;
        };
        let outcome = combat::apply_damage(
            &request,
            Some(&mut self.hero.modifiers),
            target,
            self.now,
            &self.config,
            &mut self.rng,
        );
        self.damage_log.push(outcome);
        outcome
    }

    fn apply_effect(&mut self, target: EntityId, application: EffectApplication) -> bool {
        let now = self.now;
        match self.enemies.iter_mut().find(|enemy| enemy.id == target) {
            Some(enemy) => enemy.status.apply(&mut enemy.vitals, application, now),
            None => false,
        }
    }

    fn heal_owner(&mut self, amount: f32) -> f32 {
        combat::heal(&mut self.hero, amount).map_or(0.0, |report| report.amount)
    }

    fn rng(&mut self) -> &mut dyn RngCore {
        &mut self.rng
    }
}
