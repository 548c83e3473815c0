use game_core::{
    Behavior, BehaviorResult, CombatContext, ComponentDefinition, EffectApplication, Tick,
};

use crate::behaviors::common::Cooldown;

/// Hardened shell: flat damage reduction per level, a dodge chance from
/// `dodge_level`, and at `spike_level` a short slow on enemies pressing in.
#[derive(Clone, Debug)]
pub struct Carapace {
    reduction_per_level: f32,
    dodge_level: u32,
    dodge_chance: f32,
    spike_level: u32,
    spike_radius: f32,
    spike_slow: f32,
    spike_duration: Tick,
    applied_reduction: f32,
    applied_dodge: f32,
    spikes: bool,
    cooldown: Cooldown,
}

impl Carapace {
    pub const KIND: &'static str = "carapace";

    pub fn from_definition(definition: &ComponentDefinition) -> Box<dyn Behavior> {
        let spec = &definition.behavior;
        Box::new(Self {
            reduction_per_level: spec.param_or("reduction_per_level", 0.04),
            dodge_level: spec.param_or("dodge_level", 3.0) as u32,
            dodge_chance: spec.param_or("dodge_chance", 0.1),
            spike_level: spec.param_or("spike_level", 5.0) as u32,
            spike_radius: spec.param_or("spike_radius", 1.2),
            spike_slow: spec.param_or("spike_slow", 0.4),
            spike_duration: Tick::from_secs_f32(spec.param_or("spike_duration", 1.0)),
            applied_reduction: 0.0,
            applied_dodge: 0.0,
            spikes: false,
            cooldown: Cooldown::new(spec.param_or("spike_interval", 1.0)),
        })
    }

    fn set_defense(&mut self, ctx: &mut dyn CombatContext, reduction: f32, dodge: f32) {
        let defense = ctx.defense();
        defense.damage_reduction += reduction - self.applied_reduction;
        defense.dodge_chance += dodge - self.applied_dodge;
        self.applied_reduction = reduction;
        self.applied_dodge = dodge;
    }
}

impl Behavior for Carapace {
    fn name(&self) -> &'static str {
        Self::KIND
    }

    fn activate(&mut self, ctx: &mut dyn CombatContext) -> BehaviorResult {
        if !self.spikes || !self.cooldown.advance(ctx) {
            return Ok(());
        }
        let slow = EffectApplication::slow(self.spike_slow, self.spike_duration);
        for target in ctx.entities_within(ctx.owner_position(), self.spike_radius) {
            ctx.apply_effect(target, slow);
        }
        Ok(())
    }

    fn on_upgrade(&mut self, ctx: &mut dyn CombatContext, level: u32) -> BehaviorResult {
        let reduction = self.reduction_per_level * level as f32;
        let dodge = if level >= self.dodge_level {
            self.dodge_chance
        } else {
            0.0
        };
        self.set_defense(ctx, reduction, dodge);
        self.spikes = level >= self.spike_level;
        Ok(())
    }

    fn teardown(&mut self, ctx: &mut dyn CombatContext) {
        self.set_defense(ctx, 0.0, 0.0);
    }
}
