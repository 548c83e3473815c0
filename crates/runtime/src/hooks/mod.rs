//! Chained-effect hook system.
//!
//! Hooks react to combat triggers raised while a tick runs (a poison tick
//! landing, an enemy dying) and answer with [`SystemAction`]s. The runtime
//! executes those actions through the same damage pipeline and status rules
//! as every other source, so hooks never mutate the world directly.
//!
//! # Architecture
//!
//! - Hooks are registered in the RuntimeBuilder and sorted by priority
//! - Every trigger is offered to each hook in priority order
//! - Hooks that trigger return actions which are executed immediately
//! - Failures are handled according to [`HookCriticality`]

mod context;
mod registry;
mod toxic_cloud;

pub use context::{HookContext, HookTrigger};
pub use registry::HookRegistry;
pub use toxic_cloud::ToxicCloudHook;

use game_core::{AreaDamage, DamageRequest, EffectApplication, EntityId};

/// Defines the criticality level of a hook for error handling.
///
/// - Critical hooks must succeed or the tick fails
/// - Important hooks log errors but allow continuation
/// - Optional hooks can fail silently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookCriticality {
    /// Hook failure stops the remaining hooks for the trigger and drops every
    /// action collected for it. The tick itself carries on.
    Critical,

    /// Hook failure is logged as an error; the tick continues. The default.
    Important,

    /// Hook failure is logged at debug level. Use for cosmetic effects.
    Optional,
}

/// Work a hook asks the runtime to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum SystemAction {
    Damage(DamageRequest),
    AreaDamage(AreaDamage),
    ApplyEffect {
        target: EntityId,
        application: EffectApplication,
    },
    HealHero(f32),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HookError {
    #[error("invalid hook configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("trigger references missing entity {0}")]
    MissingEntity(EntityId),
}

/// Reaction to combat triggers, expressed as system actions.
///
/// # Execution Order
///
/// Hooks are sorted by priority (lower values execute first):
/// - Negative priorities: hooks whose actions others depend on
/// - Zero: default priority for most hooks
/// - Positive priorities: optional or cosmetic hooks
pub trait CombatHook: Send + Sync {
    /// Returns a human-readable name for this hook (used in logging and debugging).
    fn name(&self) -> &'static str;

    fn priority(&self) -> i32 {
        0
    }

    fn criticality(&self) -> HookCriticality {
        HookCriticality::Important
    }

    /// Cheap filter evaluated for every trigger.
    fn should_trigger(&self, ctx: &HookContext<'_>) -> bool;

    /// Creates the actions to execute for this trigger. An empty vec is a no-op.
    fn create_actions(&self, ctx: &HookContext<'_>) -> Result<Vec<SystemAction>, HookError>;
}
