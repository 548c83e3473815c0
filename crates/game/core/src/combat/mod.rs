//! Combat resolution.
//!
//! - `damage`: the damage pipeline (multipliers, crits, health clamp, kill report)
//! - `area`: circle sweeps over a [`SpatialQuery`]
//! - `contact`: enemy body hits against the hero's defenses

mod area;
mod contact;
mod damage;

pub use area::{AreaDamage, SpatialQuery};
pub use contact::{ContactOutcome, apply_contact_damage};
pub use damage::{
    DamageApplied, DamageChannel, DamageKind, DamageOutcome, DamageRequest, DamageSourceKind,
    apply_damage, damage_multiplier, heal,
};
