use game_core::{
    AreaDamage, Behavior, BehaviorResult, CombatContext, ComponentDefinition, DamageKind,
    DamageSourceKind, EffectApplication, EntityId, Tick,
};

use crate::behaviors::common::{Cooldown, level_scale, require_positive};

/// Evolved toxin: poisons everything around the owner, and every poison tick
/// anywhere releases a pulse that hurts the enemies next to the ticking one.
#[derive(Clone, Debug)]
pub struct NerveToxin {
    radius: f32,
    tick_damage: f32,
    tick_interval: Tick,
    duration: Tick,
    base_pulse: f32,
    pulse_per_level: f32,
    pulse_radius: f32,
    pulse_scale: f32,
    pulse: f32,
    cooldown: Cooldown,
}

impl NerveToxin {
    pub const KIND: &'static str = "nerve_toxin";

    pub fn from_definition(definition: &ComponentDefinition) -> Box<dyn Behavior> {
        let spec = &definition.behavior;
        let base_pulse = spec.param_or("pulse_base", 6.0);
        Box::new(Self {
            radius: spec.param_or("radius", 4.0),
            tick_damage: spec.param_or("tick_damage", 5.0),
            tick_interval: Tick::from_secs_f32(spec.param_or("tick_interval", 0.5)),
            duration: Tick::from_secs_f32(spec.param_or("duration", 3.0)),
            base_pulse,
            pulse_per_level: spec.param_or("pulse_per_level", 0.2),
            pulse_radius: spec.param_or("pulse_radius", 2.5),
            pulse_scale: spec.param_or("pulse_scale", 0.25),
            pulse: base_pulse,
            cooldown: Cooldown::new(spec.param_or("interval", 2.0)),
        })
    }
}

impl Behavior for NerveToxin {
    fn name(&self) -> &'static str {
        Self::KIND
    }

    fn initialize(
        &mut self,
        _ctx: &mut dyn CombatContext,
        definition: &ComponentDefinition,
    ) -> BehaviorResult {
        require_positive(definition, "radius", self.radius)?;
        require_positive(definition, "pulse_radius", self.pulse_radius)
    }

    fn activate(&mut self, ctx: &mut dyn CombatContext) -> BehaviorResult {
        if !self.cooldown.advance(ctx) {
            return Ok(());
        }
        let poison = EffectApplication::poison(self.tick_damage, self.tick_interval, self.duration);
        for target in ctx.entities_within(ctx.owner_position(), self.radius) {
            ctx.apply_effect(target, poison);
        }
        Ok(())
    }

    fn on_upgrade(&mut self, _ctx: &mut dyn CombatContext, level: u32) -> BehaviorResult {
        self.pulse = self.base_pulse * level_scale(level, self.pulse_per_level);
        Ok(())
    }

    fn on_poison_tick(
        &mut self,
        ctx: &mut dyn CombatContext,
        target: EntityId,
        tick_damage: f32,
    ) -> BehaviorResult {
        let Some(center) = ctx.position_of(target) else {
            return Ok(());
        };
        let amount = self.pulse + tick_damage * self.pulse_scale;
        let pulse = AreaDamage::new(Some(ctx.owner()), center, self.pulse_radius, amount)
            .with_kind(DamageKind::Poison)
            .with_source_kind(DamageSourceKind::Pulse)
            .excluding(target);
        ctx.apply_area_damage(pulse);
        Ok(())
    }
}
