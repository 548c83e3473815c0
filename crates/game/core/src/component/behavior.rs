//! Pluggable weapon and upgrade logic.

use rand::RngCore;

use super::{ComponentDefinition, ComponentId};
use crate::combat::{AreaDamage, DamageOutcome, DamageRequest, SpatialQuery};
use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::state::{Defense, EntityId, Position, Tick};
use crate::stats::StatModifierStack;
use crate::status::EffectApplication;

/// Everything a behavior may touch while it runs.
///
/// Implemented by the runtime world. Calls naming a missing or dead entity
/// are silently ignored.
pub trait CombatContext: SpatialQuery {
    fn now(&self) -> Tick;

    /// Length of the current simulation step.
    fn delta(&self) -> Tick;

    /// Entity that owns the loadout.
    fn owner(&self) -> EntityId;

    fn owner_position(&self) -> Position;

    fn position_of(&self, entity: EntityId) -> Option<Position>;

    /// The owner's modifier stack.
    fn modifiers(&mut self) -> &mut StatModifierStack;

    /// The owner's contact-hit mitigation.
    fn defense(&mut self) -> &mut Defense;

    fn apply_damage(&mut self, request: DamageRequest) -> DamageOutcome;

    fn apply_effect(&mut self, target: EntityId, application: EffectApplication) -> bool;

    /// Heals the owner, returning the amount actually restored.
    fn heal_owner(&mut self, amount: f32) -> f32;

    fn rng(&mut self) -> &mut dyn RngCore;

    /// Runs `apply_damage` once per target found in the area. Returns the hit count.
    fn apply_area_damage(&mut self, area: AreaDamage) -> usize {
        let targets = area.targets(&*self);
        let mut hits = 0;
        for target in targets {
            if self.apply_damage(area.request_for(target)).is_applied() {
                hits += 1;
            }
        }
        hits
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum BehaviorError {
    #[error("invalid parameter `{name}` for {component}: {value}")]
    InvalidParameter {
        component: ComponentId,
        name: &'static str,
        value: f32,
    },

    #[error("{component} failed: {reason}")]
    Fault {
        component: ComponentId,
        reason: String,
        context: ErrorContext,
    },
}

impl GameError for BehaviorError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidParameter { .. } => ErrorSeverity::Validation,
            Self::Fault { .. } => ErrorSeverity::Internal,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::Fault { context, .. } => Some(context),
            Self::InvalidParameter { .. } => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidParameter { .. } => "BEHAVIOR_INVALID_PARAMETER",
            Self::Fault { .. } => "BEHAVIOR_FAULT",
        }
    }
}

pub type BehaviorResult = Result<(), BehaviorError>;

/// Logic attached to one equipped weapon or upgrade.
///
/// `on_upgrade` receives the absolute level and must be idempotent: it
/// recomputes derived values from that level instead of accumulating deltas.
pub trait Behavior: Send {
    fn name(&self) -> &'static str;

    fn initialize(
        &mut self,
        _ctx: &mut dyn CombatContext,
        _definition: &ComponentDefinition,
    ) -> BehaviorResult {
        Ok(())
    }

    /// Per-tick work: cooldowns, attacks, periodic auras.
    fn activate(&mut self, ctx: &mut dyn CombatContext) -> BehaviorResult;

    fn on_upgrade(&mut self, ctx: &mut dyn CombatContext, level: u32) -> BehaviorResult;

    /// Undo whatever the behavior pushed into the owner (modifiers, defense).
    fn teardown(&mut self, _ctx: &mut dyn CombatContext) {}

    /// Called for every poison tick dealt anywhere in the world.
    fn on_poison_tick(
        &mut self,
        _ctx: &mut dyn CombatContext,
        _target: EntityId,
        _tick_damage: f32,
    ) -> BehaviorResult {
        Ok(())
    }
}

/// Builds behaviors from their definitions. Resolved once when the loadout is created.
pub trait BehaviorFactory: Send + Sync {
    /// Returns `None` when the definition's behavior kind is unknown.
    fn create(&self, definition: &ComponentDefinition) -> Option<Box<dyn Behavior>>;
}
