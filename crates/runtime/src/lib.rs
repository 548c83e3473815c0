//! Runtime orchestration for the Blight combat simulation.
//!
//! This crate owns the mutable world (hero, enemies, clock, seeded random
//! stream) and drives the rules in `game-core` one cooperative tick at a time.
//! Consumers embed [`Runtime`] to advance the simulation, answer level-up
//! choices and drain [`Event`]s for presentation.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`world`] stores entities and implements the combat context
//! - [`events`] provides the topic-based event bus
//! - [`hooks`] provides chained-effect hooks reacting to combat triggers
pub mod error;
pub mod events;
pub mod hooks;
pub mod runtime;
pub mod world;

pub use error::{Result, RuntimeError};
pub use events::{CombatEvent, Event, EventBus, LifecycleEvent, ProgressionEvent, Topic};
pub use hooks::{
    CombatHook, HookContext, HookCriticality, HookError, HookRegistry, HookTrigger, SystemAction,
    ToxicCloudHook,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig, TickReport};
pub use world::World;
