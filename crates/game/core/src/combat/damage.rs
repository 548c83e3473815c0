//! Damage pipeline: turns a raw hit into a health change and a report.
//!
//! ```text
//! dead target? ─yes→ Ignored
//!      │
//! base × source multiplier × incoming multiplier
//!      │
//! Normal channel + Normal popup + roll < crit chance → × crit multiplier
//!      │
//! health = clamp(health - final, 0, max)  →  DamageApplied (+ killed once)
//! ```

use rand::Rng;
use tracing::trace;

use crate::config::GameConfig;
use crate::state::{Combatant, EntityId, Position, Tick};
use crate::stats::{StatChannel, StatModifierStack};

/// Whether a hit may roll a critical.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum DamageChannel {
    /// Never rolls for a critical. Used by damage-over-time ticks.
    Raw,
    #[default]
    Normal,
}

/// Popup classification reported alongside an applied hit.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum DamageKind {
    #[default]
    Normal,
    Critical,
    Poison,
    Burn,
    Heal,
}

/// What produced a hit, for analytics and hook filtering.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum DamageSourceKind {
    #[default]
    Direct,
    Area,
    DamageOverTime,
    Pulse,
    Contact,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageRequest {
    pub source: Option<EntityId>,
    pub target: EntityId,
    pub amount: f32,
    pub channel: DamageChannel,
    pub kind: DamageKind,
    pub source_kind: DamageSourceKind,
}

impl DamageRequest {
    /// Normal-channel direct hit with a normal popup.
    pub fn new(source: Option<EntityId>, target: EntityId, amount: f32) -> Self {
        Self {
            source,
            target,
            amount,
            channel: DamageChannel::Normal,
            kind: DamageKind::Normal,
            source_kind: DamageSourceKind::Direct,
        }
    }

    #[must_use]
    pub fn raw(mut self) -> Self {
        self.channel = DamageChannel::Raw;
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: DamageKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_source_kind(mut self, source_kind: DamageSourceKind) -> Self {
        self.source_kind = source_kind;
        self
    }
}

/// Report of a hit that changed health, published for popups and hooks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageApplied {
    pub source: Option<EntityId>,
    pub target: EntityId,
    pub position: Position,
    pub amount: f32,
    pub kind: DamageKind,
    pub source_kind: DamageSourceKind,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DamageOutcome {
    /// Target was already dead or missing.
    Ignored,
    Applied {
        report: DamageApplied,
        /// True only for the hit that brought health to zero.
        killed: bool,
    },
}

impl DamageOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    pub fn killed(&self) -> bool {
        matches!(self, Self::Applied { killed: true, .. })
    }

    pub fn amount(&self) -> f32 {
        match self {
            Self::Applied { report, .. } => report.amount,
            Self::Ignored => 0.0,
        }
    }

    pub fn report(&self) -> Option<&DamageApplied> {
        match self {
            Self::Applied { report, .. } => Some(report),
            Self::Ignored => None,
        }
    }
}

/// Source damage multiplier, floored at `config.min_damage_multiplier`.
pub fn damage_multiplier(
    source_modifiers: Option<&mut StatModifierStack>,
    now: Tick,
    config: &GameConfig,
) -> f32 {
    let multiplier = match source_modifiers {
        Some(stack) => stack.get_multiplier(StatChannel::Damage, now),
        None => config.fallback_damage_multiplier,
    };
    multiplier.max(config.min_damage_multiplier)
}

/// Resolves one hit against `target`.
///
/// `source_modifiers` is the attacker's stack when the attacker still exists;
/// `None` falls back to `config.fallback_damage_multiplier`.
pub fn apply_damage<R: Rng + ?Sized>(
    request: &DamageRequest,
    source_modifiers: Option<&mut StatModifierStack>,
    target: &mut Combatant,
    now: Tick,
    config: &GameConfig,
    rng: &mut R,
) -> DamageOutcome {
    if target.vitals.is_dead() {
        return DamageOutcome::Ignored;
    }

    let multiplier = damage_multiplier(source_modifiers, now, config);
    let mut amount = request.amount * multiplier * target.vitals.incoming_damage_multiplier;
    let mut kind = request.kind;

    let may_crit = request.channel == DamageChannel::Normal && request.kind == DamageKind::Normal;
    if may_crit && roll_critical(config.critical_chance, rng) {
        amount *= config.critical_multiplier;
        kind = DamageKind::Critical;
    }

    let vitals = &mut target.vitals;
    vitals.health = (vitals.health - amount).clamp(0.0, vitals.max_health);
    let killed = vitals.health <= 0.0 && vitals.mark_dead();

    trace!(
        target: "game_core::combat",
        target_id = %target.id,
        amount,
        %kind,
        health = target.vitals.health,
        killed,
        "damage applied"
    );

    DamageOutcome::Applied {
        report: DamageApplied {
            source: request.source,
            target: target.id,
            position: target.position,
            amount,
            kind,
            source_kind: request.source_kind,
        },
        killed,
    }
}

/// Restores health up to the cap. Returns a heal report when health changed.
pub fn heal(target: &mut Combatant, amount: f32) -> Option<DamageApplied> {
    if target.vitals.is_dead() || amount <= 0.0 {
        return None;
    }
    let vitals = &mut target.vitals;
    let before = vitals.health;
    vitals.health = (vitals.health + amount).min(vitals.max_health);
    let restored = vitals.health - before;
    if restored <= 0.0 {
        return None;
    }
    Some(DamageApplied {
        source: None,
        target: target.id,
        position: target.position,
        amount: restored,
        kind: DamageKind::Heal,
        source_kind: DamageSourceKind::Direct,
    })
}

fn roll_critical<R: Rng + ?Sized>(chance: f32, rng: &mut R) -> bool {
    if chance <= 0.0 {
        return false;
    }
    rng.gen_range(0.0f32..1.0) < chance
}
