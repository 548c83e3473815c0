//! Built-in weapon and upgrade behaviors and the registry that builds them.
//!
//! Definitions name their behavior through `behavior.kind`; the
//! [`BehaviorRegistry`] maps that key to a constructor once, when the loadout
//! is created.

pub(crate) mod common;
mod registry;
pub mod upgrades;
pub mod weapons;

pub use registry::{BehaviorConstructor, BehaviorRegistry};
