//! Topic-based event bus implementation.

use std::collections::VecDeque;

use tracing::trace;

use super::types::{CombatEvent, LifecycleEvent, ProgressionEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum Topic {
    /// Damage, heals, status effects, deaths
    Combat,
    /// Experience, level-ups, option selection
    Progression,
    /// Spawns, pauses, behavior faults
    Lifecycle,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Combat(CombatEvent),
    Progression(ProgressionEvent),
    Lifecycle(LifecycleEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Combat(_) => Topic::Combat,
            Event::Progression(_) => Topic::Progression,
            Event::Lifecycle(_) => Topic::Lifecycle,
        }
    }
}

impl From<CombatEvent> for Event {
    fn from(event: CombatEvent) -> Self {
        Event::Combat(event)
    }
}

impl From<ProgressionEvent> for Event {
    fn from(event: ProgressionEvent) -> Self {
        Event::Progression(event)
    }
}

impl From<LifecycleEvent> for Event {
    fn from(event: LifecycleEvent) -> Self {
        Event::Lifecycle(event)
    }
}

/// Bounded, drain-based event bus.
///
/// Events are best-effort: once `capacity` undrained events are buffered, the
/// oldest one is dropped to make room.
#[derive(Debug, Clone)]
pub struct EventBus {
    queue: VecDeque<Event>,
    capacity: usize,
    dropped: u64,
}

impl EventBus {
    pub const DEFAULT_CAPACITY: usize = 4096;

    /// Creates a new event bus with default capacity
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            capacity: capacity.max(1),
            dropped: 0,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&mut self, event: impl Into<Event>) {
        let event = event.into();
        if self.queue.len() >= self.capacity {
            self.queue.pop_front();
            self.dropped += 1;
            trace!(
                target: "runtime::events",
                topic = ?event.topic(),
                "event bus full, dropping oldest"
            );
        }
        self.queue.push_back(event);
    }

    /// Takes every buffered event in publication order.
    pub fn drain(&mut self) -> Vec<Event> {
        self.queue.drain(..).collect()
    }

    /// Takes the buffered events of one topic, leaving the others queued.
    pub fn drain_topic(&mut self, topic: Topic) -> Vec<Event> {
        let (taken, kept): (Vec<_>, Vec<_>) = self
            .queue
            .drain(..)
            .partition(|event| event.topic() == topic);
        self.queue = kept.into();
        taken
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of events lost to overflow since creation.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
