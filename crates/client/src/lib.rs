//! Headless Blight client.
//!
//! Plays a scripted session against a [`Runtime`]: takes the first starter
//! weapon, spawns enemies around the hero on a fixed interval, answers every
//! level-up with the first offer and logs what happens until the hero dies or
//! the configured duration elapses.

mod builder;
pub mod config;

pub use builder::ClientBuilder;
pub use config::ClientConfig;

use anyhow::{Context, Result};
use game_core::Tick;
use runtime::{CombatEvent, Event, LifecycleEvent, ProgressionEvent, Runtime, RuntimeError};
use tracing::{debug, info, trace, warn};

/// Why a session stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    Survived,
    HeroDied,
    /// A level-up came with no options to pick from.
    OutOfOptions,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SessionSummary {
    pub end: SessionEnd,
    pub elapsed: Tick,
    pub ticks: u64,
    pub kills: usize,
    pub level: u32,
    pub spawned: usize,
    pub behavior_faults: usize,
}

/// Top-level client container.
pub struct Client {
    runtime: Runtime,
    config: ClientConfig,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    /// Runs the scripted session to completion.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog offers no starter weapon or the runtime
    /// rejects an offered option.
    pub fn run(mut self) -> Result<SessionSummary> {
        let choice_count = self.runtime.config().game_config.choice_count;
        let opening = self.runtime.build_initial_options(choice_count);
        let starter = opening.first().context("catalog offers no starter weapon")?;
        self.runtime.select_option(starter)?;
        info!(target: "client", weapon = %starter.definition.id, "session started");

        let step = Tick::new(self.config.tick_ms.max(1));
        let total = self.config.total_ticks();
        let spawn_every = self.config.spawn_every();
        let mut summary = SessionSummary {
            end: SessionEnd::Survived,
            elapsed: Tick::ZERO,
            ticks: 0,
            kills: 0,
            level: 1,
            spawned: 0,
            behavior_faults: 0,
        };

        while summary.ticks < total {
            if let Some(level) = self.runtime.pending_choice() {
                // The choice screen holds the game still while it is open.
                self.runtime.pause();
                let options = self.runtime.build_options(choice_count);
                let Some(option) = options.first() else {
                    warn!(target: "client", level, "no options offered");
                    summary.end = SessionEnd::OutOfOptions;
                    break;
                };
                self.runtime.select_option(option)?;
                self.runtime.resume();
            }

            if summary.ticks % spawn_every == 0
                && self.runtime.spawn_around_hero(self.config.spawn_radius).is_some()
            {
                summary.spawned += 1;
            }

            match self.runtime.tick(step) {
                Ok(report) => {
                    summary.ticks += 1;
                    summary.kills += report.kills;
                    summary.behavior_faults += report.behavior_faults;
                }
                Err(RuntimeError::GameOver) => {
                    summary.end = SessionEnd::HeroDied;
                    break;
                }
                Err(err) => return Err(err.into()),
            }

            for event in self.runtime.drain_events() {
                log_event(&event);
            }
            if self.runtime.is_game_over() {
                summary.end = SessionEnd::HeroDied;
                break;
            }
        }

        summary.elapsed = self.runtime.now();
        summary.level = self.runtime.progression().experience().level();
        info!(
            target: "client",
            end = ?summary.end,
            elapsed = %summary.elapsed,
            kills = summary.kills,
            level = summary.level,
            "session finished"
        );
        Ok(summary)
    }
}

fn log_event(event: &Event) {
    match event {
        Event::Combat(CombatEvent::DamageApplied(report)) => {
            trace!(
                target: "client::events",
                target_id = %report.target,
                amount = report.amount,
                kind = ?report.kind,
                "damage"
            );
        }
        Event::Combat(CombatEvent::EntityDied { entity, experience, .. }) => {
            debug!(target: "client::events", entity = %entity, experience, "enemy died");
        }
        Event::Combat(CombatEvent::HeroDied { at }) => {
            warn!(target: "client::events", at = %at, "hero died");
        }
        Event::Progression(ProgressionEvent::LevelUp { level, max_health }) => {
            info!(target: "client::events", level, max_health, "level up");
        }
        Event::Progression(ProgressionEvent::OptionSelected(outcome)) => {
            info!(target: "client::events", outcome = ?outcome, "option selected");
        }
        Event::Lifecycle(LifecycleEvent::BehaviorFaults { at, count }) => {
            warn!(target: "client::events", at = %at, count, "behavior faults");
        }
        other => trace!(target: "client::events", event = ?other),
    }
}
