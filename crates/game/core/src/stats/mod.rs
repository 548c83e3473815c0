//! Stat channels and the timed modifier stack that scales them.
//!
//! Every entity owns one [`StatModifierStack`]. Weapons and upgrades push
//! additive contributions into it; the damage pipeline and behaviors read the
//! resulting multiplier per [`StatChannel`].

mod channel;
mod modifiers;

pub use channel::StatChannel;
pub use modifiers::{StatModifier, StatModifierStack};
