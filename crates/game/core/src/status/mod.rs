//! Time-scoped status effects (slow, poison, burn, freeze, stun).
mod controller;
mod effect;

pub use controller::{StatusEffectController, StatusEvent};
pub use effect::{EffectApplication, EffectParams, EffectType, StatusEffectInstance};
