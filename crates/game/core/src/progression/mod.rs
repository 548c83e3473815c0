//! Experience, level-up queue and option composition.
//!
//! The [`ProgressionRegistry`] turns the hero's [`Loadout`](crate::component::Loadout)
//! into candidate options (upgrades, new weapons, weapon level-ups, evolutions),
//! composes a choice screen with [`pick_options`], and applies the pick.

mod catalog;
mod experience;
mod option;
mod registry;
mod select;

pub use catalog::Catalog;
pub use experience::Experience;
pub use option::{EvolutionOffer, OptionId, OptionKind, ProgressionOption};
pub use registry::{ProgressionError, ProgressionRegistry, SelectionOutcome};
pub use select::pick_options;
