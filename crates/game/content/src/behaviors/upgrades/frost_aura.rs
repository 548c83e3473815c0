use game_core::{
    Behavior, BehaviorResult, CombatContext, ComponentDefinition, EffectApplication, Tick,
};

use crate::behaviors::common::Cooldown;

/// Periodic chill around the owner. Slows harder each level and freezes
/// outright from `freeze_level`.
#[derive(Clone, Debug)]
pub struct FrostAura {
    radius: f32,
    base_slow: f32,
    slow_per_level: f32,
    duration: Tick,
    freeze_level: u32,
    freeze_duration: Tick,
    slow: f32,
    freezes: bool,
    cooldown: Cooldown,
}

impl FrostAura {
    pub const KIND: &'static str = "frost_aura";

    pub fn from_definition(definition: &ComponentDefinition) -> Box<dyn Behavior> {
        let spec = &definition.behavior;
        let base_slow = spec.param_or("slow", 0.2);
        Box::new(Self {
            radius: spec.param_or("radius", 3.0),
            base_slow,
            slow_per_level: spec.param_or("slow_per_level", 0.05),
            duration: Tick::from_secs_f32(spec.param_or("duration", 1.5)),
            freeze_level: spec.param_or("freeze_level", 5.0) as u32,
            freeze_duration: Tick::from_secs_f32(spec.param_or("freeze_duration", 0.5)),
            slow: base_slow,
            freezes: false,
            cooldown: Cooldown::new(spec.param_or("interval", 2.0)),
        })
    }
}

impl Behavior for FrostAura {
    fn name(&self) -> &'static str {
        Self::KIND
    }

    fn activate(&mut self, ctx: &mut dyn CombatContext) -> BehaviorResult {
        if !self.cooldown.advance(ctx) {
            return Ok(());
        }
        let effect = if self.freezes {
            EffectApplication::freeze(self.freeze_duration)
        } else {
            EffectApplication::slow(self.slow, self.duration)
        };
        for target in ctx.entities_within(ctx.owner_position(), self.radius) {
            ctx.apply_effect(target, effect);
        }
        Ok(())
    }

    fn on_upgrade(&mut self, _ctx: &mut dyn CombatContext, level: u32) -> BehaviorResult {
        let bonus = self.slow_per_level * level.saturating_sub(1) as f32;
        self.slow = (self.base_slow + bonus).clamp(0.0, 1.0);
        self.freezes = level >= self.freeze_level;
        Ok(())
    }
}
