use game_core::{
    Behavior, BehaviorResult, CombatContext, ComponentDefinition, DamageRequest, EffectApplication,
    Tick,
};

use crate::behaviors::common::{Cooldown, nearest_within, require_positive};

/// Thrown blade hitting the closest enemy in range.
///
/// Level 2 hits harder, level 3 reaches further, level 4 stuns on hit and
/// level 5 throws a second blade at the next closest enemy.
#[derive(Clone, Debug)]
pub struct Boomerang {
    base_damage: f32,
    base_range: f32,
    stun_duration: Tick,
    stun_multiplier: f32,
    damage: f32,
    range: f32,
    stuns: bool,
    blades: usize,
    cooldown: Cooldown,
}

impl Boomerang {
    pub const KIND: &'static str = "boomerang";

    pub fn from_definition(definition: &ComponentDefinition) -> Box<dyn Behavior> {
        let spec = &definition.behavior;
        let base_damage = spec.param_or("damage", 15.0);
        let base_range = spec.param_or("range", 6.0);
        Box::new(Self {
            base_damage,
            base_range,
            stun_duration: Tick::from_secs_f32(spec.param_or("stun_duration", 0.5)),
            stun_multiplier: spec.param_or("stun_multiplier", 1.25),
            damage: base_damage,
            range: base_range,
            stuns: false,
            blades: 1,
            cooldown: Cooldown::new(spec.param_or("interval", 1.2)),
        })
    }
}

impl Behavior for Boomerang {
    fn name(&self) -> &'static str {
        Self::KIND
    }

    fn initialize(
        &mut self,
        _ctx: &mut dyn CombatContext,
        definition: &ComponentDefinition,
    ) -> BehaviorResult {
        require_positive(definition, "damage", self.base_damage)?;
        require_positive(definition, "range", self.base_range)
    }

    fn activate(&mut self, ctx: &mut dyn CombatContext) -> BehaviorResult {
        if !self.cooldown.advance(ctx) {
            return Ok(());
        }
        let owner = ctx.owner();
        for (target, _) in nearest_within(&*ctx, self.range, self.blades) {
            let outcome = ctx.apply_damage(DamageRequest::new(Some(owner), target, self.damage));
            if self.stuns && outcome.is_applied() && !outcome.killed() {
                ctx.apply_effect(
                    target,
                    EffectApplication::stun(self.stun_duration, self.stun_multiplier),
                );
            }
        }
        Ok(())
    }

    fn on_upgrade(&mut self, _ctx: &mut dyn CombatContext, level: u32) -> BehaviorResult {
        self.damage = if level >= 2 {
            self.base_damage * 1.5
        } else {
            self.base_damage
        };
        self.range = if level >= 3 {
            self.base_range * 1.5
        } else {
            self.base_range
        };
        self.stuns = level >= 4;
        self.blades = if level >= 5 { 2 } else { 1 };
        Ok(())
    }
}
