use crate::combat::DamageKind;
use crate::state::Tick;
use crate::time::TimerHandle;

/// Kind of status effect. An entity holds at most one active instance per kind.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EffectType {
    Slow,
    Poison,
    Burn,
    Freeze,
    Stun,
}

impl EffectType {
    pub const ALL: [EffectType; 5] = [
        EffectType::Slow,
        EffectType::Poison,
        EffectType::Burn,
        EffectType::Freeze,
        EffectType::Stun,
    ];

    /// Effects that write the entity's speed modifier.
    pub const fn affects_speed(self) -> bool {
        matches!(self, Self::Slow | Self::Freeze | Self::Stun)
    }

    pub const fn is_damage_over_time(self) -> bool {
        matches!(self, Self::Poison | Self::Burn)
    }

    /// Popup kind used for damage ticks of this effect.
    pub const fn damage_kind(self) -> Option<DamageKind> {
        match self {
            Self::Poison => Some(DamageKind::Poison),
            Self::Burn => Some(DamageKind::Burn),
            _ => None,
        }
    }
}

/// Parameters carried by an active effect.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectParams {
    Slow { factor: f32 },
    Freeze,
    Stun { incoming_multiplier: f32 },
    Poison { tick_damage: f32, interval: Tick },
    Burn { tick_damage: f32, interval: Tick },
}

impl EffectParams {
    pub const fn effect_type(&self) -> EffectType {
        match self {
            Self::Slow { .. } => EffectType::Slow,
            Self::Freeze => EffectType::Freeze,
            Self::Stun { .. } => EffectType::Stun,
            Self::Poison { .. } => EffectType::Poison,
            Self::Burn { .. } => EffectType::Burn,
        }
    }
}

/// Request to apply an effect for a duration, as issued by behaviors and hooks.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectApplication {
    pub params: EffectParams,
    pub duration: Tick,
}

impl EffectApplication {
    pub fn slow(factor: f32, duration: Tick) -> Self {
        Self {
            params: EffectParams::Slow { factor },
            duration,
        }
    }

    pub fn freeze(duration: Tick) -> Self {
        Self {
            params: EffectParams::Freeze,
            duration,
        }
    }

    pub fn stun(duration: Tick, incoming_multiplier: f32) -> Self {
        Self {
            params: EffectParams::Stun {
                incoming_multiplier,
            },
            duration,
        }
    }

    pub fn poison(tick_damage: f32, interval: Tick, duration: Tick) -> Self {
        Self {
            params: EffectParams::Poison {
                tick_damage,
                interval,
            },
            duration,
        }
    }

    pub fn burn(tick_damage: f32, interval: Tick, duration: Tick) -> Self {
        Self {
            params: EffectParams::Burn {
                tick_damage,
                interval,
            },
            duration,
        }
    }

    pub const fn effect_type(&self) -> EffectType {
        self.params.effect_type()
    }
}

/// Live effect on one entity.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusEffectInstance {
    pub params: EffectParams,
    pub started_at: Tick,
    /// When the effect ends. For damage-over-time effects this is one interval
    /// after the last tick.
    pub expires_at: Tick,
    pub(crate) timer: TimerHandle,
    pub(crate) ticks_remaining: u32,
}

impl StatusEffectInstance {
    pub const fn effect_type(&self) -> EffectType {
        self.params.effect_type()
    }

    pub fn ticks_remaining(&self) -> u32 {
        self.ticks_remaining
    }
}
