//! Helpers shared by the built-in behaviors.

use game_core::{
    BehaviorError, BehaviorResult, CombatContext, ComponentDefinition, EntityId, Position,
    StatChannel,
};

/// Attack timer scaled by the owner's attack-speed multiplier.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Cooldown {
    interval_secs: f32,
    elapsed_secs: f32,
}

impl Cooldown {
    pub(crate) fn new(interval_secs: f32) -> Self {
        Self {
            interval_secs,
            elapsed_secs: 0.0,
        }
    }

    pub(crate) fn set_interval(&mut self, interval_secs: f32) {
        self.interval_secs = interval_secs;
    }

    /// Advances by one simulation step. Fires at most once per call.
    pub(crate) fn advance(&mut self, ctx: &mut dyn CombatContext) -> bool {
        let speed = attack_speed(ctx);
        self.elapsed_secs += ctx.delta().as_secs_f32() * speed;
        if self.interval_secs <= 0.0 || self.elapsed_secs < self.interval_secs {
            return false;
        }
        self.elapsed_secs = (self.elapsed_secs - self.interval_secs).min(self.interval_secs);
        true
    }
}

pub(crate) fn attack_speed(ctx: &mut dyn CombatContext) -> f32 {
    let now = ctx.now();
    ctx.modifiers()
        .get_multiplier(StatChannel::AttackSpeed, now)
        .max(0.0)
}

/// `1 + per_level * (level - 1)`: level 1 is the authored base value.
pub(crate) fn level_scale(level: u32, per_level: f32) -> f32 {
    1.0 + per_level * level.saturating_sub(1) as f32
}

pub(crate) fn require_positive(
    definition: &ComponentDefinition,
    name: &'static str,
    value: f32,
) -> BehaviorResult {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(BehaviorError::InvalidParameter {
            component: definition.id.clone(),
            name,
            value,
        })
    }
}

/// Up to `count` living enemies within `range` of the owner, closest first.
pub(crate) fn nearest_within(
    ctx: &dyn CombatContext,
    range: f32,
    count: usize,
) -> Vec<(EntityId, Position)> {
    let origin = ctx.owner_position();
    let mut found: Vec<(EntityId, Position)> = ctx
        .entities_within(origin, range)
        .into_iter()
        .filter_map(|id| ctx.position_of(id).map(|position| (id, position)))
        .collect();
    found.sort_by(|(a_id, a), (b_id, b)| {
        a.distance_squared(origin)
            .total_cmp(&b.distance_squared(origin))
            .then(a_id.cmp(b_id))
    });
    found.truncate(count);
    found
}
