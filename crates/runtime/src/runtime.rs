//! High-level runtime orchestrator.
//!
//! The runtime owns the world, the hero's loadout and progression, and drives
//! them one cooperative step at a time. Clients build it through
//! [`RuntimeBuilder`], call [`Runtime::tick`] in a loop, answer level-up
//! choices and drain events between ticks.

use std::collections::HashMap;
use std::sync::Arc;

use game_content::BehaviorRegistry;
use game_core::{
    BehaviorFactory, Catalog, CombatContext, DamageRequest, DamageSourceKind, EffectType,
    EnemyTemplate, EntityId, GameConfig, Loadout, Position, ProgressionOption,
    ProgressionRegistry, SelectionOutcome, StatChannel, StatusEvent, Tick,
};
use rand::Rng;
use tracing::{debug, error, info, warn};

use crate::error::{Result, RuntimeError};
use crate::events::{CombatEvent, Event, LifecycleEvent, ProgressionEvent, Topic};
use crate::hooks::{HookContext, HookRegistry, HookTrigger, SystemAction};
use crate::world::World;

/// Runtime configuration shared across the orchestrator and the world.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    /// Seed of the world's random stream; equal seeds replay equal runs.
    pub seed: u64,
    pub event_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            seed: 0,
            event_buffer_size: crate::events::EventBus::DEFAULT_CAPACITY,
        }
    }
}

/// Summary of one [`Runtime::tick`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub now: Tick,
    pub kills: usize,
    /// Levels reached this tick, oldest first.
    pub levels: Vec<u32>,
    pub behavior_faults: usize,
    /// Triggers whose hook actions were dropped after a critical hook failed.
    pub hook_failures: usize,
}

/// Main runtime that orchestrates the combat simulation.
///
/// # Tick order
///
/// 1. advance the clock
/// 2. poll status effects; damage-over-time goes through the damage pipeline
/// 3. dispatch poison ticks to hooks and equipped behaviors
/// 4. hero regeneration
/// 5. enemy movement and contact damage
/// 6. loadout activation in equip order
/// 7. deaths: experience, level-up queue, death hooks
/// 8. despawn dead enemies
pub struct Runtime {
    config: RuntimeConfig,
    world: World,
    loadout: Loadout,
    progression: ProgressionRegistry,
    hooks: HookRegistry,
    templates: HashMap<String, EnemyTemplate>,
    paused: bool,
    game_over: bool,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn loadout(&self) -> &Loadout {
        &self.loadout
    }

    pub fn progression(&self) -> &ProgressionRegistry {
        &self.progression
    }

    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    pub fn now(&self) -> Tick {
        self.world.now()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Oldest level-up still waiting for [`Runtime::select_option`].
    pub fn pending_choice(&self) -> Option<u32> {
        self.progression.peek_pending_level()
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            let at = self.now();
            self.world.events_mut().publish(LifecycleEvent::Paused { at });
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            let at = self.now();
            self.world.events_mut().publish(LifecycleEvent::Resumed { at });
        }
    }

    /// Advances the simulation by `dt`.
    ///
    /// Refuses to run while paused and after the hero died. A pending level-up
    /// does not stop the clock; callers showing a choice screen pause around it.
    pub fn tick(&mut self, dt: Tick) -> Result<TickReport> {
        if self.game_over {
            return Err(RuntimeError::GameOver);
        }
        if self.paused {
            return Err(RuntimeError::Paused);
        }

        self.world.advance(dt);
        let mut report = TickReport {
            now: self.now(),
            ..TickReport::default()
        };

        self.resolve_status(&mut report);
        self.world.regenerate_hero();
        self.world.advance_enemies();

        report.behavior_faults = self.loadout.tick(&mut self.world);
        if report.behavior_faults > 0 {
            let at = self.now();
            self.world.events_mut().publish(LifecycleEvent::BehaviorFaults {
                at,
                count: report.behavior_faults,
            });
        }

        self.resolve_deaths(&mut report);
        self.world.despawn_dead();
        Ok(report)
    }

    /// Level-up screen for the current loadout.
    pub fn build_options(&mut self, count: usize) -> Vec<ProgressionOption> {
        self.progression
            .build_options(count, &self.loadout, self.world.random())
    }

    /// Opening screen of starter weapons.
    pub fn build_initial_options(&mut self, count: usize) -> Vec<ProgressionOption> {
        self.progression
            .build_initial_options(count, &self.loadout, self.world.random())
    }

    /// Applies a picked option and consumes the oldest pending level-up, if any.
    pub fn select_option(&mut self, option: &ProgressionOption) -> Result<SelectionOutcome> {
        let outcome = self
            .progression
            .select_option(option, &mut self.loadout, &mut self.world)?;
        self.progression.pop_pending_level();
        self.refresh_hero_max_health();
        self.world
            .events_mut()
            .publish(ProgressionEvent::OptionSelected(outcome.clone()));
        Ok(outcome)
    }

    /// Spawns an enemy from a named template.
    pub fn spawn_enemy(&mut self, template: &str, position: Position) -> Result<EntityId> {
        let template = self
            .templates
            .get(template)
            .ok_or_else(|| RuntimeError::UnknownEnemy(template.to_owned()))?;
        Ok(self.world.spawn(template, position))
    }

    /// Spawns a random known template on a circle of `radius` around the hero.
    /// Returns `None` when no templates are registered.
    pub fn spawn_around_hero(&mut self, radius: f32) -> Option<EntityId> {
        let mut ids: Vec<&String> = self.templates.keys().collect();
        ids.sort_unstable();
        if ids.is_empty() {
            return None;
        }
        let rng = self.world.random();
        let pick = rng.gen_range(0..ids.len());
        let angle = rng.gen_range(0.0f32..std::f32::consts::TAU);
        let id = ids[pick].clone();
        let center = self.world.hero().position;
        let position = Position::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        );
        self.spawn_enemy(&id, position).ok()
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        self.world.events_mut().drain()
    }

    pub fn drain_topic(&mut self, topic: Topic) -> Vec<Event> {
        self.world.events_mut().drain_topic(topic)
    }

    fn resolve_status(&mut self, report: &mut TickReport) {
        for (target, event) in self.world.poll_status() {
            let StatusEvent::DamageTick { effect, damage, kind } = event else {
                continue;
            };
            let request = DamageRequest::new(None, target, damage)
                .raw()
                .with_kind(kind)
                .with_source_kind(DamageSourceKind::DamageOverTime);
            self.world.apply_damage(request);

            if effect == EffectType::Poison && !target.is_hero() {
                let Some(position) = self.world.position_of(target) else {
                    continue;
                };
                let trigger = HookTrigger::PoisonTick {
                    target,
                    position,
                    damage,
                };
                self.run_hooks(trigger, report);
                self.loadout.notify_poison_tick(&mut self.world, target, damage);
            }
        }
    }

    fn resolve_deaths(&mut self, report: &mut TickReport) {
        // Death hooks may kill more enemies; loop until no new deaths appear.
        loop {
            let deaths = self.world.take_deaths();
            if deaths.is_empty() {
                return;
            }
            for entity in deaths {
                if entity.is_hero() {
                    self.on_hero_death();
                    continue;
                }
                let Some(enemy) = self.world.enemy(entity) else {
                    continue;
                };
                let (position, experience) = (enemy.position, enemy.experience_reward);
                report.kills += 1;
                self.world.events_mut().publish(CombatEvent::EntityDied {
                    entity,
                    position,
                    experience,
                });
                self.run_hooks(HookTrigger::EntityDied { entity, position }, report);
                if !self.game_over {
                    self.grant_experience(experience, report);
                }
            }
        }
    }

    fn on_hero_death(&mut self) {
        if self.game_over {
            return;
        }
        self.game_over = true;
        let at = self.now();
        warn!(target: "runtime", at = %at, "hero died");
        self.world.events_mut().publish(CombatEvent::HeroDied { at });
    }

    fn grant_experience(&mut self, amount: u32, report: &mut TickReport) {
        if amount == 0 {
            return;
        }
        let reached = self.progression.add_experience(amount);
        let experience = self.progression.experience();
        let (level, current) = (experience.level(), experience.current());
        self.world
            .events_mut()
            .publish(ProgressionEvent::ExperienceGained { amount, level, current });

        for level in reached {
            self.refresh_hero_max_health();
            let hero = self.world.hero_mut();
            let heal = hero.vitals.max_health * self.config.game_config.hero.heal_on_level_up;
            let healed = game_core::combat::heal(hero, heal);
            let max_health = hero.vitals.max_health;
            if let Some(report) = healed {
                self.world.events_mut().publish(CombatEvent::DamageApplied(report));
            }
            info!(target: "runtime", level, max_health, "level up");
            self.world
                .events_mut()
                .publish(ProgressionEvent::LevelUp { level, max_health });
            report.levels.push(level);
        }
    }

    /// Recomputes the hero's maximum health from level growth and the Health channel.
    fn refresh_hero_max_health(&mut self) {
        let hero_config = &self.config.game_config.hero;
        let level = self.progression.experience().level();
        let growth = 1.0 + hero_config.health_growth_per_level * level.saturating_sub(1) as f32;
        let base = hero_config.max_health;
        let now = self.now();
        let hero = self.world.hero_mut();
        let bonus = hero.modifiers.get_multiplier(StatChannel::Health, now).max(0.0);
        hero.vitals.set_max_health(base * growth * bonus);
    }

    /// Runs hooks for one trigger. A critical failure drops this trigger's
    /// actions only; the rest of the tick carries on.
    fn run_hooks(&mut self, trigger: HookTrigger, report: &mut TickReport) {
        if self.hooks.is_empty() {
            return;
        }
        let result = self.hooks.execute(&HookContext {
            trigger: &trigger,
            world: &self.world,
            loadout: &self.loadout,
        });
        let actions = match result {
            Ok(actions) => actions,
            Err(err) => {
                report.hook_failures += 1;
                error!(
                    target: "runtime::hooks",
                    trigger = ?trigger,
                    error = %err,
                    "hook actions dropped"
                );
                return;
            }
        };
        for action in actions {
            self.execute_action(action);
        }
    }

    fn execute_action(&mut self, action: SystemAction) {
        match action {
            SystemAction::Damage(request) => {
                self.world.apply_damage(request);
            }
            SystemAction::AreaDamage(area) => {
                let hits = self.world.apply_area_damage(area);
                debug!(
                    target: "runtime::hooks",
                    hits,
                    radius = area.radius,
                    "area action resolved"
                );
            }
            SystemAction::ApplyEffect {
                target,
                application,
            } => {
                self.world.apply_effect(target, application);
            }
            SystemAction::HealHero(amount) => {
                self.world.heal_owner(amount);
            }
        }
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    catalog: Option<Arc<Catalog>>,
    enemies: Vec<EnemyTemplate>,
    factory: Option<Arc<dyn BehaviorFactory>>,
    hooks: Option<HookRegistry>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            catalog: None,
            enemies: Vec::new(),
            factory: None,
            hooks: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn game_config(mut self, game_config: GameConfig) -> Self {
        self.config.game_config = game_config;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Set the required component catalog
    pub fn catalog(mut self, catalog: impl Into<Arc<Catalog>>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    /// Enemy templates available to [`Runtime::spawn_enemy`]
    pub fn enemies(mut self, enemies: impl IntoIterator<Item = EnemyTemplate>) -> Self {
        self.enemies.extend(enemies);
        self
    }

    /// Set the behavior factory. Defaults to [`BehaviorRegistry::with_builtin`].
    pub fn behaviors(mut self, factory: Arc<dyn BehaviorFactory>) -> Self {
        self.factory = Some(factory);
        self
    }

    /// Set custom combat hooks.
    ///
    /// If not provided, [`HookRegistry::default_hooks`] is used.
    pub fn hooks(mut self, hooks: HookRegistry) -> Self {
        self.hooks = Some(hooks);
        self
    }

    pub fn build(self) -> Result<Runtime> {
        let catalog = self.catalog.ok_or(RuntimeError::MissingCatalog)?;
        let game_config = self.config.game_config.clone();
        let factory = self
            .factory
            .unwrap_or_else(|| Arc::new(BehaviorRegistry::with_builtin()));

        let mut templates = HashMap::new();
        for template in self.enemies {
            if let Some(previous) = templates.insert(template.id.clone(), template) {
                warn!(
                    target: "runtime",
                    template = %previous.id,
                    "duplicate enemy template replaced"
                );
            }
        }

        let mut world = World::new(game_config.clone(), self.config.seed);
        *world.events_mut() = crate::events::EventBus::with_capacity(self.config.event_buffer_size);

        info!(
            target: "runtime",
            seed = self.config.seed,
            components = catalog.len(),
            enemies = templates.len(),
            "runtime built"
        );
        Ok(Runtime {
            loadout: Loadout::new(game_config.weapon_slots, factory),
            progression: ProgressionRegistry::new(catalog, &game_config),
            hooks: self.hooks.unwrap_or_default(),
            config: self.config,
            world,
            templates,
            paused: false,
            game_over: false,
        })
    }
}
