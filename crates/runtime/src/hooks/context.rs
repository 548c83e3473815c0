//! Execution context provided to hooks during evaluation.

use game_core::{EntityId, Loadout, Position};

use crate::world::World;

/// What happened, as seen by hooks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HookTrigger {
    /// A poison tick landed on `target` for `damage`.
    PoisonTick {
        target: EntityId,
        position: Position,
        damage: f32,
    },

    /// An enemy died this tick.
    EntityDied { entity: EntityId, position: Position },
}

/// Read-only view handed to hooks.
///
/// Hooks inspect the trigger, the world and the hero's loadout; any change
/// they want goes back to the runtime as a [`super::SystemAction`].
pub struct HookContext<'a> {
    pub trigger: &'a HookTrigger,

    pub world: &'a World,

    /// The hero's equipped weapons and upgrades
    pub loadout: &'a Loadout,
}
