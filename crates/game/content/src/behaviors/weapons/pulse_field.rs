use game_core::{
    AreaDamage, Behavior, BehaviorResult, CombatContext, ComponentDefinition, EffectApplication,
    Tick,
};

use crate::behaviors::common::{Cooldown, level_scale, require_positive};

/// Periodic damage burst centred on the owner. Slows survivors from `slow_level` on.
#[derive(Clone, Debug)]
pub struct PulseField {
    base_damage: f32,
    base_radius: f32,
    damage_per_level: f32,
    radius_per_level: f32,
    slow_level: u32,
    slow_factor: f32,
    slow_duration: Tick,
    damage: f32,
    radius: f32,
    slows: bool,
    cooldown: Cooldown,
}

impl PulseField {
    pub const KIND: &'static str = "pulse_field";

    pub fn from_definition(definition: &ComponentDefinition) -> Box<dyn Behavior> {
        let spec = &definition.behavior;
        let base_damage = spec.param_or("damage", 8.0);
        let base_radius = spec.param_or("radius", 2.5);
        Box::new(Self {
            base_damage,
            base_radius,
            damage_per_level: spec.param_or("damage_per_level", 0.25),
            radius_per_level: spec.param_or("radius_per_level", 0.1),
            slow_level: spec.param_or("slow_level", 4.0) as u32,
            slow_factor: spec.param_or("slow_factor", 0.3),
            slow_duration: Tick::from_secs_f32(spec.param_or("slow_duration", 1.0)),
            damage: base_damage,
            radius: base_radius,
            slows: false,
            cooldown: Cooldown::new(spec.param_or("interval", 1.5)),
        })
    }
}

impl Behavior for PulseField {
    fn name(&self) -> &'static str {
        Self::KIND
    }

    fn initialize(
        &mut self,
        _ctx: &mut dyn CombatContext,
        definition: &ComponentDefinition,
    ) -> BehaviorResult {
        require_positive(definition, "damage", self.base_damage)?;
        require_positive(definition, "radius", self.base_radius)
    }

    fn activate(&mut self, ctx: &mut dyn CombatContext) -> BehaviorResult {
        if !self.cooldown.advance(ctx) {
            return Ok(());
        }
        let owner = ctx.owner();
        let area = AreaDamage::new(Some(owner), ctx.owner_position(), self.radius, self.damage);
        let targets = area.targets(&*ctx);
        for target in targets {
            let outcome = ctx.apply_damage(area.request_for(target));
            if self.slows && outcome.is_applied() && !outcome.killed() {
                let slow = EffectApplication::slow(self.slow_factor, self.slow_duration);
                ctx.apply_effect(target, slow);
            }
        }
        Ok(())
    }

    fn on_upgrade(&mut self, _ctx: &mut dyn CombatContext, level: u32) -> BehaviorResult {
        self.damage = self.base_damage * level_scale(level, self.damage_per_level);
        self.radius = self.base_radius * level_scale(level, self.radius_per_level);
        self.slows = level >= self.slow_level;
        Ok(())
    }
}
