use game_core::{
    Behavior, BehaviorResult, CombatContext, ComponentDefinition, StatChannel, Tick,
};

use crate::behaviors::common::{Cooldown, level_scale};

/// Every interval, heals the owner and grants a short damage surge.
#[derive(Clone, Debug)]
pub struct BloodCapacitor {
    base_heal: f32,
    heal_per_level: f32,
    base_surge: f32,
    surge_per_level: f32,
    surge_duration: Tick,
    heal: f32,
    surge: f32,
    cooldown: Cooldown,
}

impl BloodCapacitor {
    pub const KIND: &'static str = "blood_capacitor";

    pub fn from_definition(definition: &ComponentDefinition) -> Box<dyn Behavior> {
        let spec = &definition.behavior;
        let base_heal = spec.param_or("heal", 5.0);
        let base_surge = spec.param_or("surge", 0.2);
        Box::new(Self {
            base_heal,
            heal_per_level: spec.param_or("heal_per_level", 0.5),
            base_surge,
            surge_per_level: spec.param_or("surge_per_level", 0.25),
            surge_duration: Tick::from_secs_f32(spec.param_or("surge_duration", 2.0)),
            heal: base_heal,
            surge: base_surge,
            cooldown: Cooldown::new(spec.param_or("interval", 6.0)),
        })
    }
}

impl Behavior for BloodCapacitor {
    fn name(&self) -> &'static str {
        Self::KIND
    }

    fn activate(&mut self, ctx: &mut dyn CombatContext) -> BehaviorResult {
        if !self.cooldown.advance(ctx) {
            return Ok(());
        }
        ctx.heal_owner(self.heal);
        let now = ctx.now();
        ctx.modifiers()
            .add_modifier(StatChannel::Damage, self.surge, self.surge_duration, now);
        Ok(())
    }

    fn on_upgrade(&mut self, _ctx: &mut dyn CombatContext, level: u32) -> BehaviorResult {
        self.heal = self.base_heal * level_scale(level, self.heal_per_level);
        self.surge = self.base_surge * level_scale(level, self.surge_per_level);
        Ok(())
    }
}
