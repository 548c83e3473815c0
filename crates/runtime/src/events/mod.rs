//! Topic-based event bus for runtime events.
//!
//! The runtime publishes everything observable about a tick (hits, effect
//! expiries, deaths, level-ups, selections) to the bus; presentation layers
//! drain the topics they care about between ticks.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{CombatEvent, LifecycleEvent, ProgressionEvent};
