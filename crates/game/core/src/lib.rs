//! Combat, status-effect and progression rules shared by the runtime and tools.
//!
//! `game-core` is free of I/O and global state: every operation takes the
//! entity state, clock value, configuration and random source it needs.
//! Higher layers (`runtime`, `game-content`) own the world and drive these
//! rules once per simulation step.
pub mod combat;
pub mod component;
pub mod config;
pub mod error;
pub mod evolution;
pub mod progression;
pub mod state;
pub mod stats;
pub mod status;
pub mod time;

#[cfg(test)]
mod testing;

pub use combat::{
    AreaDamage, ContactOutcome, DamageApplied, DamageChannel, DamageKind, DamageOutcome,
    DamageRequest, DamageSourceKind, SpatialQuery,
};
pub use component::{
    Behavior, BehaviorError, BehaviorFactory, BehaviorResult, BehaviorSpec, CombatContext,
    ComponentDefinition, ComponentId, ComponentInstance, ComponentKind, EquipError, Loadout,
};
pub use config::{ExperienceConfig, GameConfig, HeroConfig};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use evolution::{EvolutionLedger, EvolutionRecipe, EvolutionResolver};
pub use progression::{
    Catalog, EvolutionOffer, Experience, OptionId, OptionKind, ProgressionError,
    ProgressionOption, ProgressionRegistry, SelectionOutcome,
};
pub use state::{Combatant, ContactAttack, Defense, EnemyTemplate, EntityId, Position, Tick, Vitals};
pub use stats::{StatChannel, StatModifier, StatModifierStack};
pub use status::{
    EffectApplication, EffectParams, EffectType, StatusEffectController, StatusEvent,
};
pub use time::{TimerHandle, TimerQueue};
