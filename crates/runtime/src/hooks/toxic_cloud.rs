//! Hook that bursts poison ticks onto neighbouring enemies.

use game_core::{AreaDamage, DamageChannel, DamageKind, DamageSourceKind, EntityId};

use super::{CombatHook, HookContext, HookCriticality, HookError, HookTrigger, SystemAction};

/// While a component tagged `required_tag` is equipped, every poison tick on
/// an enemy releases a cloud dealing `tick × fraction_per_level × level` raw
/// poison damage to the other enemies within `radius`.
///
/// The level is the highest level among the tagged components. Cloud hits are
/// not poison ticks themselves, so clouds never chain into more clouds.
#[derive(Debug, Clone)]
pub struct ToxicCloudHook {
    pub required_tag: String,
    pub radius: f32,
    pub fraction_per_level: f32,
}

impl ToxicCloudHook {
    pub const DEFAULT_TAG: &'static str = "miasma";

    fn cloud_level(&self, ctx: &HookContext<'_>) -> Option<u32> {
        ctx.loadout
            .iter()
            .filter(|instance| instance.definition().tags.contains(&self.required_tag))
            .map(|instance| instance.level())
            .max()
    }
}

impl Default for ToxicCloudHook {
    fn default() -> Self {
        Self {
            required_tag: Self::DEFAULT_TAG.to_owned(),
            radius: 1.5,
            fraction_per_level: 0.25,
        }
    }
}

impl CombatHook for ToxicCloudHook {
    fn name(&self) -> &'static str {
        "toxic_cloud"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn criticality(&self) -> HookCriticality {
        HookCriticality::Optional
    }

    fn should_trigger(&self, ctx: &HookContext<'_>) -> bool {
        matches!(ctx.trigger, HookTrigger::PoisonTick { .. }) && self.cloud_level(ctx).is_some()
    }

    fn create_actions(&self, ctx: &HookContext<'_>) -> Result<Vec<SystemAction>, HookError> {
        let HookTrigger::PoisonTick {
            target,
            position,
            damage,
        } = *ctx.trigger
        else {
            return Ok(vec![]);
        };
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(HookError::InvalidConfig("toxic cloud radius must be positive"));
        }
        if ctx.world.enemy(target).is_none() {
            return Err(HookError::MissingEntity(target));
        }

        let level = self.cloud_level(ctx).unwrap_or(0);
        let amount = damage * self.fraction_per_level * level as f32;
        if amount <= 0.0 {
            return Ok(vec![]);
        }

        let mut cloud = AreaDamage::new(Some(EntityId::HERO), position, self.radius, amount)
            .with_kind(DamageKind::Poison)
            .with_source_kind(DamageSourceKind::Pulse)
            .excluding(target);
        cloud.channel = DamageChannel::Raw;
        Ok(vec![SystemAction::AreaDamage(cloud)])
    }
}
