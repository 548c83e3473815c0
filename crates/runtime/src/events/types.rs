//! Event types for different topics.

use game_core::{DamageApplied, EffectType, EntityId, Position, SelectionOutcome, Tick};

/// Hits, mitigation, status changes and deaths.
#[derive(Debug, Clone, PartialEq)]
pub enum CombatEvent {
    /// Health changed. Heals carry [`game_core::DamageKind::Heal`].
    DamageApplied(DamageApplied),

    /// A contact hit was dodged by the hero.
    Dodged { attacker: EntityId, target: EntityId },

    EffectApplied { target: EntityId, effect: EffectType },

    EffectExpired { target: EntityId, effect: EffectType },

    /// An enemy died; `experience` is credited to the hero.
    EntityDied {
        entity: EntityId,
        position: Position,
        experience: u32,
    },

    HeroDied { at: Tick },
}

/// Experience, level-ups and level-up choices.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressionEvent {
    ExperienceGained { amount: u32, level: u32, current: u32 },

    /// A level was reached and queued for selection.
    LevelUp { level: u32, max_health: f32 },

    OptionSelected(SelectionOutcome),
}

/// Run lifecycle notifications.
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleEvent {
    EnemySpawned {
        entity: EntityId,
        template: String,
        position: Position,
    },

    Despawned { entity: EntityId },

    Paused { at: Tick },

    Resumed { at: Tick },

    /// One or more equipped behaviors failed this tick; the rest kept running.
    BehaviorFaults { at: Tick, count: usize },
}
