//! Entity state shared by the combat rules.
//!
//! Identifiers, the millisecond clock type, positions, and the per-entity
//! [`Combatant`] record that owns a modifier stack and a status controller.
mod combatant;
mod common;
mod vitals;

pub use combatant::{Combatant, ContactAttack, EnemyTemplate};
pub use common::{EntityId, Position, Tick};
pub use vitals::{Defense, Vitals};
