use game_core::{
    Behavior, BehaviorResult, CombatContext, ComponentDefinition, DamageRequest, EffectApplication,
    Tick,
};

use crate::behaviors::common::{Cooldown, level_scale, nearest_within, require_positive};

/// Spits at the closest enemy: a small impact hit plus poison.
/// From `splash_level` the poison also lands on enemies around the target.
#[derive(Clone, Debug)]
pub struct ToxicSpitter {
    impact: f32,
    range: f32,
    base_tick_damage: f32,
    tick_damage_per_level: f32,
    tick_interval: Tick,
    base_duration_secs: f32,
    splash_level: u32,
    splash_radius: f32,
    tick_damage: f32,
    duration: Tick,
    splashes: bool,
    cooldown: Cooldown,
}

impl ToxicSpitter {
    pub const KIND: &'static str = "toxic_spitter";

    pub fn from_definition(definition: &ComponentDefinition) -> Box<dyn Behavior> {
        let spec = &definition.behavior;
        let base_tick_damage = spec.param_or("tick_damage", 3.0);
        let base_duration_secs = spec.param_or("duration", 3.0);
        Box::new(Self {
            impact: spec.param_or("impact", 4.0),
            range: spec.param_or("range", 7.0),
            base_tick_damage,
            tick_damage_per_level: spec.param_or("tick_damage_per_level", 0.25),
            tick_interval: Tick::from_secs_f32(spec.param_or("tick_interval", 0.5)),
            base_duration_secs,
            splash_level: spec.param_or("splash_level", 5.0) as u32,
            splash_radius: spec.param_or("splash_radius", 1.5),
            tick_damage: base_tick_damage,
            duration: Tick::from_secs_f32(base_duration_secs),
            splashes: false,
            cooldown: Cooldown::new(spec.param_or("interval", 1.0)),
        })
    }

    fn poison(&self) -> EffectApplication {
        EffectApplication::poison(self.tick_damage, self.tick_interval, self.duration)
    }
}

impl Behavior for ToxicSpitter {
    fn name(&self) -> &'static str {
        Self::KIND
    }

    fn initialize(
        &mut self,
        _ctx: &mut dyn CombatContext,
        definition: &ComponentDefinition,
    ) -> BehaviorResult {
        require_positive(definition, "tick_damage", self.base_tick_damage)?;
        require_positive(definition, "tick_interval", self.tick_interval.as_secs_f32())
    }

    fn activate(&mut self, ctx: &mut dyn CombatContext) -> BehaviorResult {
        if !self.cooldown.advance(ctx) {
            return Ok(());
        }
        let Some((target, position)) = nearest_within(&*ctx, self.range, 1).pop() else {
            return Ok(());
        };
        let owner = ctx.owner();
        let outcome = ctx.apply_damage(DamageRequest::new(Some(owner), target, self.impact));
        if outcome.killed() {
            return Ok(());
        }
        ctx.apply_effect(target, self.poison());
        if self.splashes {
            for neighbour in ctx.entities_within(position, self.splash_radius) {
                if neighbour != target {
                    ctx.apply_effect(neighbour, self.poison());
                }
            }
        }
        Ok(())
    }

    fn on_upgrade(&mut self, _ctx: &mut dyn CombatContext, level: u32) -> BehaviorResult {
        self.tick_damage = self.base_tick_damage * level_scale(level, self.tick_damage_per_level);
        let bonus_secs = if level >= 3 { 1.0 } else { 0.0 };
        self.duration = Tick::from_secs_f32(self.base_duration_secs + bonus_secs);
        self.splashes = level >= self.splash_level;
        Ok(())
    }
}
