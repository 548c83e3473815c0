//! Time-scoped additive modifiers.
//!
//! A channel's multiplier is `1 + Σ magnitude` over the modifiers that have
//! not expired yet. Expired entries are swept lazily on read, never by a timer.

use std::collections::HashMap;

use super::StatChannel;
use crate::component::ComponentId;
use crate::state::Tick;

/// A single additive contribution to a channel's multiplier.
#[derive(Clone, Debug, PartialEq)]
pub struct StatModifier {
    pub channel: StatChannel,
    pub magnitude: f32,
    /// Absolute expiry; [`Tick::NEVER`] for permanent modifiers.
    pub expires_at: Tick,
    /// Component owning a sourced modifier. Anonymous modifiers are `None`.
    pub source: Option<ComponentId>,
}

impl StatModifier {
    pub fn is_permanent(&self) -> bool {
        self.expires_at.is_never()
    }

    pub fn is_expired(&self, now: Tick) -> bool {
        self.expires_at <= now
    }
}

/// Per-entity collection of timed modifiers.
#[derive(Clone, Debug, Default)]
pub struct StatModifierStack {
    entries: HashMap<StatChannel, Vec<StatModifier>>,
}

impl StatModifierStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a modifier and returns its absolute expiry.
    ///
    /// A zero `duration` makes the modifier permanent. Magnitudes are not
    /// validated; negative values reduce the multiplier.
    pub fn add_modifier(
        &mut self,
        channel: StatChannel,
        magnitude: f32,
        duration: Tick,
        now: Tick,
    ) -> Tick {
        let expires_at = if duration.is_zero() {
            Tick::NEVER
        } else {
            now + duration
        };
        self.entries.entry(channel).or_default().push(StatModifier {
            channel,
            magnitude,
            expires_at,
            source: None,
        });
        expires_at
    }

    /// Sets the permanent modifier `source` holds on `channel`, replacing the
    /// previous one. A zero magnitude removes it.
    pub fn set_sourced(&mut self, channel: StatChannel, source: &ComponentId, magnitude: f32) {
        let list = self.entries.entry(channel).or_default();
        list.retain(|modifier| modifier.source.as_ref() != Some(source));
        if magnitude != 0.0 {
            list.push(StatModifier {
                channel,
                magnitude,
                expires_at: Tick::NEVER,
                source: Some(source.clone()),
            });
        }
    }

    /// Drops every modifier held by `source` and returns how many were removed.
    pub fn remove_source(&mut self, source: &ComponentId) -> usize {
        let mut removed = 0;
        for list in self.entries.values_mut() {
            let before = list.len();
            list.retain(|modifier| modifier.source.as_ref() != Some(source));
            removed += before - list.len();
        }
        removed
    }

    /// Returns `1 + Σ magnitude` of live modifiers, dropping expired ones first.
    pub fn get_multiplier(&mut self, channel: StatChannel, now: Tick) -> f32 {
        let Some(list) = self.entries.get_mut(&channel) else {
            return 1.0;
        };
        list.retain(|modifier| !modifier.is_expired(now));
        1.0 + list.iter().map(|modifier| modifier.magnitude).sum::<f32>()
    }

    /// Same value as [`get_multiplier`](Self::get_multiplier) without sweeping.
    pub fn peek_multiplier(&self, channel: StatChannel, now: Tick) -> f32 {
        1.0 + self
            .active(channel, now)
            .map(|modifier| modifier.magnitude)
            .sum::<f32>()
    }

    pub fn active(&self, channel: StatChannel, now: Tick) -> impl Iterator<Item = &StatModifier> {
        self.entries
            .get(&channel)
            .into_iter()
            .flatten()
            .filter(move |modifier| !modifier.is_expired(now))
    }

    /// Number of stored modifiers, including expired entries not yet swept.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
