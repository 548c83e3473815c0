//! Tag-based evolution of maxed weapon and upgrade pairs.
mod recipe;
mod resolver;

pub use recipe::EvolutionRecipe;
pub use resolver::{EvolutionLedger, EvolutionResolver};
