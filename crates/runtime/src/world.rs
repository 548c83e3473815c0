//! Entity store and the [`CombatContext`] the hero's loadout runs against.

use std::collections::BTreeMap;

use game_core::combat::{self, ContactOutcome};
use game_core::{
    CombatContext, Combatant, DamageApplied, DamageKind, DamageOutcome, DamageRequest,
    DamageSourceKind, Defense, EffectApplication, EnemyTemplate, EntityId, GameConfig, Position,
    SpatialQuery, StatModifierStack, StatusEvent, Tick,
};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use crate::events::{CombatEvent, EventBus, LifecycleEvent};

const REACH_EPSILON: f32 = 1e-3;

/// The hero, every live enemy, the clock and the seeded random stream.
///
/// Damage, heals and effects requested through [`CombatContext`] are resolved
/// here and published to the event bus. Kills are collected for the runtime's
/// death phase.
#[derive(Debug)]
pub struct World {
    now: Tick,
    delta: Tick,
    hero: Combatant,
    enemies: BTreeMap<EntityId, Combatant>,
    next_enemy: u32,
    config: GameConfig,
    rng: ChaCha8Rng,
    events: EventBus,
    deaths: Vec<EntityId>,
}

impl World {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let hero = Combatant::new(EntityId::HERO, Position::ORIGIN, config.hero.max_health)
            .with_move_speed(config.hero.move_speed)
            .with_defense(Defense::with_invulnerability(Tick::from_secs_f32(
                config.hero.invulnerability_secs,
            )));
        Self {
            now: Tick::ZERO,
            delta: Tick::ZERO,
            hero,
            enemies: BTreeMap::new(),
            next_enemy: 1,
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            events: EventBus::new(),
            deaths: Vec::new(),
        }
    }

    pub fn now(&self) -> Tick {
        self.now
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn hero(&self) -> &Combatant {
        &self.hero
    }

    pub fn hero_mut(&mut self) -> &mut Combatant {
        &mut self.hero
    }

    pub fn enemy(&self, id: EntityId) -> Option<&Combatant> {
        self.enemies.get(&id)
    }

    pub fn enemy_mut(&mut self, id: EntityId) -> Option<&mut Combatant> {
        self.enemies.get_mut(&id)
    }

    /// Enemies in id order, including ones killed this tick and not yet despawned.
    pub fn enemies(&self) -> impl Iterator<Item = &Combatant> {
        self.enemies.values()
    }

    pub fn alive_enemies(&self) -> usize {
        self.enemies.values().filter(|enemy| !enemy.is_dead()).count()
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    pub(crate) fn random(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    pub fn spawn(&mut self, template: &EnemyTemplate, position: Position) -> EntityId {
        let id = EntityId(self.next_enemy);
        self.next_enemy += 1;
        self.enemies
            .insert(id, Combatant::from_template(id, position, template));
        debug!(
            target: "runtime::world",
            entity = %id,
            template = %template.id,
            %position,
            "enemy spawned"
        );
        self.events.publish(LifecycleEvent::EnemySpawned {
            entity: id,
            template: template.id.clone(),
            position,
        });
        id
    }

    pub(crate) fn advance(&mut self, dt: Tick) {
        self.delta = dt;
        self.now = self.now + dt;
    }

    /// Polls every status controller, publishing expiries. Returns the due
    /// damage-over-time ticks in entity order, hero first.
    pub(crate) fn poll_status(&mut self) -> Vec<(EntityId, StatusEvent)> {
        let now = self.now;
        let mut due = Vec::new();
        let hero = std::iter::once(&mut self.hero);
        for combatant in hero.chain(self.enemies.values_mut()) {
            if combatant.status.is_empty() {
                continue;
            }
            for event in combatant.status.poll(&mut combatant.vitals, now) {
                if let StatusEvent::Expired(effect) = event {
                    self.events.publish(CombatEvent::EffectExpired {
                        target: combatant.id,
                        effect,
                    });
                }
                due.push((combatant.id, event));
            }
        }
        due
    }

    /// Moves living enemies towards the hero and resolves contact hits.
    ///
    /// Immobilized enemies (speed modifier at zero) neither move nor attack.
    pub(crate) fn advance_enemies(&mut self) {
        let now = self.now;
        let dt_secs = self.delta.as_secs_f32();
        let target = self.hero.position;
        for enemy in self.enemies.values_mut() {
            if enemy.is_dead() || enemy.vitals.speed_modifier <= 0.0 {
                continue;
            }
            let speed = enemy.effective_move_speed(now);
            let gap = (enemy.position.distance(target) - enemy.contact.range).max(0.0);
            enemy.position = enemy.position.step_towards(target, (speed * dt_secs).min(gap));

            let in_reach = enemy.position.distance(target) <= enemy.contact.range + REACH_EPSILON;
            if !in_reach || enemy.contact.damage <= 0.0 || !enemy.contact.is_ready(now) {
                continue;
            }
            let outcome = combat::apply_contact_damage(
                &mut self.hero,
                enemy.contact.damage,
                now,
                &mut self.rng,
            );
            match outcome {
                ContactOutcome::Ignored => {}
                ContactOutcome::Dodged => {
                    enemy.contact.last_hit = Some(now);
                    self.events.publish(CombatEvent::Dodged {
                        attacker: enemy.id,
                        target: EntityId::HERO,
                    });
                }
                ContactOutcome::Hit { amount, killed } => {
                    enemy.contact.last_hit = Some(now);
                    trace!(target: "runtime::world", attacker = %enemy.id, amount, "contact hit");
                    self.events.publish(CombatEvent::DamageApplied(DamageApplied {
                        source: Some(enemy.id),
                        target: EntityId::HERO,
                        position: self.hero.position,
                        amount,
                        kind: DamageKind::Normal,
                        source_kind: DamageSourceKind::Contact,
                    }));
                    if killed {
                        self.deaths.push(EntityId::HERO);
                    }
                }
            }
        }
    }

    pub(crate) fn regenerate_hero(&mut self) {
        let amount = self.config.hero.regeneration_per_sec * self.delta.as_secs_f32();
        if amount > 0.0 {
            combat::heal(&mut self.hero, amount);
        }
    }

    /// Entities killed since the last call, in kill order.
    pub(crate) fn take_deaths(&mut self) -> Vec<EntityId> {
        std::mem::take(&mut self.deaths)
    }

    /// Removes dead enemies, cancelling their pending effects.
    pub(crate) fn despawn_dead(&mut self) {
        let dead: Vec<_> = self
            .enemies
            .values()
            .filter(|enemy| enemy.is_dead())
            .map(|enemy| enemy.id)
            .collect();
        for id in dead {
            if let Some(mut enemy) = self.enemies.remove(&id) {
                enemy.status.clear_all_effects(&mut enemy.vitals);
                self.events.publish(LifecycleEvent::Despawned { entity: id });
            }
        }
    }

    fn record(&mut self, outcome: DamageOutcome) -> DamageOutcome {
        if let DamageOutcome::Applied { report, killed } = outcome {
            self.events.publish(CombatEvent::DamageApplied(report));
            if killed {
                self.deaths.push(report.target);
            }
        }
        outcome
    }

    fn damage_hero(&mut self, request: &DamageRequest) -> DamageOutcome {
        let now = self.now;
        if request.source == Some(EntityId::HERO) {
            let mut own = std::mem::take(&mut self.hero.modifiers);
            let outcome = combat::apply_damage(
                request,
                Some(&mut own),
                &mut self.hero,
                now,
                &self.config,
                &mut self.rng,
            );
            self.hero.modifiers = own;
            return outcome;
        }
        let source = request
            .source
            .and_then(|id| self.enemies.get_mut(&id))
            .map(|enemy| &mut enemy.modifiers);
        combat::apply_damage(request, source, &mut self.hero, now, &self.config, &mut self.rng)
    }

    fn damage_enemy(&mut self, request: &DamageRequest) -> DamageOutcome {
        let now = self.now;
        // Taken out of the map so the source may be another enemy.
        let Some(mut target) = self.enemies.remove(&request.target) else {
            return DamageOutcome::Ignored;
        };
        let mut own = (request.source == Some(target.id))
            .then(|| std::mem::take(&mut target.modifiers));
        let source = match request.source {
            _ if own.is_some() => own.as_mut(),
            Some(EntityId::HERO) => Some(&mut self.hero.modifiers),
            Some(id) => self.enemies.get_mut(&id).map(|enemy| &mut enemy.modifiers),
            None => None,
        };
        let outcome = combat::apply_damage(
            request,
            source,
            &mut target,
            now,
            &self.config,
            &mut self.rng,
        );
        if let Some(stack) = own {
            target.modifiers = stack;
        }
        self.enemies.insert(target.id, target);
        outcome
    }
}

impl SpatialQuery for World {
    fn entities_within(&self, center: Position, radius: f32) -> Vec<EntityId> {
        self.enemies
            .values()
            .filter(|enemy| !enemy.is_dead() && enemy.position.distance(center) <= radius)
            .map(|enemy| enemy.id)
            .collect()
    }

    fn nearest(&self, from: Position) -> Option<(EntityId, Position)> {
        self.enemies
            .values()
            .filter(|enemy| !enemy.is_dead())
            .min_by(|a, b| {
                a.position
                    .distance_squared(from)
                    .total_cmp(&b.position.distance_squared(from))
            })
            .map(|enemy| (enemy.id, enemy.position))
    }
}

impl CombatContext for World {
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
        if entity.is_hero() {
            return Some(self.hero.position);
        }
        self.enemies.get(&entity).map(|enemy| enemy.position)
    }

    fn modifiers(&mut self) -> &mut StatModifierStack {
        &mut self.hero.modifiers
    }

    fn defense(&mut self) -> &mut Defense {
        &mut self.hero.defense
    }

    fn apply_damage(&mut self, request: DamageRequest) -> DamageOutcome {
        let outcome = if request.target.is_hero() {
            self.damage_hero(&request)
        } else {
            self.damage_enemy(&request)
        };
        self.record(outcome)
    }

    fn apply_effect(&mut self, target: EntityId, application: EffectApplication) -> bool {
        let now = self.now;
        let combatant = if target.is_hero() {
            Some(&mut self.hero)
        } else {
            self.enemies.get_mut(&target)
        };
        let Some(combatant) = combatant else {
            return false;
        };
        let applied = combatant.status.apply(&mut combatant.vitals, application, now);
        if applied {
            self.events.publish(CombatEvent::EffectApplied {
                target,
                effect: application.params.effect_type(),
            });
        }
        applied
    }

    fn heal_owner(&mut self, amount: f32) -> f32 {
        match combat::heal(&mut self.hero, amount) {
            Some(report) => {
                self.events.publish(CombatEvent::DamageApplied(report));
                report.amount
            }
            None => 0.0,
        }
    }

    fn rng(&mut self) -> &mut dyn RngCore {
        &mut self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Event, Topic};
    use game_core::EffectType;

    fn world() -> World {
        World::new(GameConfig::without_criticals(), 3)
    }

    fn crawler() -> EnemyTemplate {
        EnemyTemplate::new("crawler", 20.0, 2.0, 5.0)
    }

    #[test]
    fn killing_blow_is_recorded_once() {
        let mut world = world();
        let id = world.spawn(&crawler(), Position::new(3.0, 0.0));

        let first = world.apply_damage(DamageRequest::new(Some(EntityId::HERO), id, 25.0));
        assert!(first.killed());
        let second = world.apply_damage(DamageRequest::new(Some(EntityId::HERO), id, 25.0));
        assert_eq!(second, DamageOutcome::Ignored);
        assert_eq!(world.take_deaths(), vec![id]);
        assert!(world.entities_within(Position::ORIGIN, 10.0).is_empty());
    }

    #[test]
    fn hero_damage_multiplier_applies_to_enemies() {
        let mut world = world();
        let id = world.spawn(&crawler(), Position::new(3.0, 0.0));
        let now = world.now();
        world
            .modifiers()
            .add_modifier(game_core::StatChannel::Damage, 0.5, Tick::ZERO, now);

        let outcome = world.apply_damage(DamageRequest::new(Some(EntityId::HERO), id, 10.0));
        assert_eq!(outcome.amount(), 15.0);
    }

    #[test]
    fn enemies_close_in_and_hit_on_cooldown() {
        let mut world = world();
        world.spawn(&crawler(), Position::new(2.0, 0.0));
        let max = world.hero().vitals.max_health;

        for _ in 0..10 {
            world.advance(Tick::new(100));
            world.advance_enemies();
        }
        // 1 s at speed 2 covers the gap; one hit, the next waits for the cooldown.
        assert_eq!(world.hero().vitals.health, max - 5.0);
        let contact_hits = world
            .events_mut()
            .drain_topic(Topic::Combat)
            .into_iter()
            .filter(|event| {
                matches!(
                    event,
                    Event::Combat(CombatEvent::DamageApplied(report))
                        if report.source_kind == DamageSourceKind::Contact
                )
            })
            .count();
        assert_eq!(contact_hits, 1);
    }

    #[test]
    fn frozen_enemies_do_not_move() {
        let mut world = world();
        let id = world.spawn(&crawler(), Position::new(4.0, 0.0));
        assert!(world.apply_effect(id, EffectApplication::freeze(Tick::new(1_000))));

        world.advance(Tick::new(500));
        world.advance_enemies();
        assert_eq!(world.enemy(id).map(|enemy| enemy.position), Some(Position::new(4.0, 0.0)));

        world.advance(Tick::new(600));
        let due = world.poll_status();
        assert_eq!(due, vec![(id, StatusEvent::Expired(EffectType::Freeze))]);
        world.advance_enemies();
        assert!(world.enemy(id).is_some_and(|enemy| enemy.position.x < 4.0));
    }

    #[test]
    fn despawn_removes_only_the_dead() {
        let mut world = world();
        let dead = world.spawn(&crawler(), Position::new(1.0, 0.0));
        let alive = world.spawn(&crawler(), Position::new(2.0, 0.0));
        world.apply_damage(DamageRequest::new(None, dead, 100.0));
        world.despawn_dead();
        assert!(world.enemy(dead).is_none());
        assert!(world.enemy(alive).is_some());
    }
}
