//! Game configuration loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        validate(&config)?;
        Ok(config)
    }
}

fn validate(config: &GameConfig) -> LoadResult<()> {
    if !(0.0..=1.0).contains(&config.critical_chance) {
        anyhow::bail!(
            "critical_chance must be within [0, 1], got {}",
            config.critical_chance
        );
    }
    if config.choice_count == 0 {
        anyhow::bail!("choice_count must be at least 1");
    }
    if config.hero.max_health <= 0.0 {
        anyhow::bail!("hero.max_health must be positive, got {}", config.hero.max_health);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse("critical_chance = 0.25\n[hero]\nmax_health = 120.0\n")
            .expect("parse");
        assert_eq!(config.critical_chance, 0.25);
        assert_eq!(config.hero.max_health, 120.0);
        assert_eq!(config.weapon_slots, GameConfig::DEFAULT_WEAPON_SLOTS);
        assert_eq!(config.experience.base, 50);
    }

    #[test]
    fn out_of_range_crit_chance_is_rejected() {
        assert!(ConfigLoader::parse("critical_chance = 1.5").is_err());
    }
}
