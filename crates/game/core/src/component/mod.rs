//! Weapons and upgrades: authored definitions, live instances, and the loadout.
//!
//! A [`ComponentDefinition`] is immutable authored data. Equipping it creates a
//! [`ComponentInstance`] whose [`Behavior`] is built once by the injected
//! [`BehaviorFactory`] and driven through a [`CombatContext`].

mod behavior;
mod definition;
mod instance;
mod loadout;

pub use behavior::{Behavior, BehaviorError, BehaviorFactory, BehaviorResult, CombatContext};
pub use definition::{BehaviorSpec, ComponentDefinition, ComponentId, ComponentKind};
pub use instance::ComponentInstance;
pub use loadout::{EquipError, Loadout};
