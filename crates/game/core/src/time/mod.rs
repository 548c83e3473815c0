//! Cancellable per-entity timers driven by the game clock.
mod timers;

pub use timers::{TimerHandle, TimerQueue};
