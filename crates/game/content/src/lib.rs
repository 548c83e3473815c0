//! Data-driven content for Blight: built-in behaviors and data loaders.
//!
//! - Weapon and upgrade behaviors, resolved by [`BehaviorRegistry`]
//! - Component catalog and evolution recipes (RON)
//! - Enemy roster (RON)
//! - Game configuration (TOML)
//!
//! All loaders use game-core types directly with serde for RON/TOML deserialization.

pub mod behaviors;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use behaviors::{BehaviorConstructor, BehaviorRegistry};

#[cfg(feature = "loaders")]
pub use loaders::{
    CatalogFile, CatalogLoader, ConfigLoader, ContentFactory, EnemyFile, EnemyLoader, LoadResult,
};
