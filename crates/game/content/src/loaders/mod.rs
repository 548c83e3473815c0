//! Content loaders for reading game data from files.
//!
//! RON carries authored content (components, recipes, enemies); TOML carries
//! the tunable [`GameConfig`](game_core::GameConfig).

pub mod catalog;
pub mod config;
pub mod enemies;
pub mod factory;

pub use catalog::{CatalogFile, CatalogLoader};
pub use config::ConfigLoader;
pub use enemies::{EnemyFile, EnemyLoader};
pub use factory::ContentFactory;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
