//! Enemy template loader.

use std::path::Path;

use game_core::EnemyTemplate;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Enemy roster structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyFile {
    pub enemies: Vec<EnemyTemplate>,
}

/// Loader for enemy templates from RON files.
pub struct EnemyLoader;

impl EnemyLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<EnemyTemplate>> {
        let content = read_file(path)?;
        let file: EnemyFile = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy roster RON: {}", e))?;
        if let Some(bad) = file.enemies.iter().find(|enemy| enemy.max_health <= 0.0) {
            anyhow::bail!("enemy '{}' must have positive max_health", bad.id);
        }
        Ok(file.enemies)
    }
}
