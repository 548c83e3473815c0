//! Weapon, upgrade and evolution recipe catalog loader.

use std::collections::HashSet;
use std::path::Path;

use game_core::{Catalog, ComponentDefinition, ComponentKind, EvolutionRecipe};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::loaders::{LoadResult, read_file};

/// Catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub components: Vec<ComponentDefinition>,
    #[serde(default)]
    pub recipes: Vec<EvolutionRecipe>,
}

/// Loader for the component catalog from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    pub fn load(path: &Path) -> LoadResult<Catalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parses and validates a catalog.
    ///
    /// Duplicate ids are rejected. A recipe whose result is missing or is not
    /// a weapon is kept but logged: it simply never matches.
    pub fn parse(content: &str) -> LoadResult<Catalog> {
        let file: CatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog RON: {}", e))?;

        let mut seen = HashSet::new();
        for definition in &file.components {
            if !seen.insert(definition.id.clone()) {
                anyhow::bail!("duplicate component id '{}'", definition.id);
            }
        }

        for recipe in &file.recipes {
            let result = file
                .components
                .iter()
                .find(|definition| definition.id == recipe.result);
            match result {
                None => warn!(
                    target: "game_content::loaders",
                    result = %recipe.result,
                    "recipe result is not defined; recipe will never match"
                ),
                Some(definition) if definition.kind != ComponentKind::Weapon => warn!(
                    target: "game_content::loaders",
                    result = %recipe.result,
                    "recipe result is not a weapon"
                ),
                Some(_) => {}
            }
        }

        Ok(Catalog::new(file.components, file.recipes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"(
        components: [
            (
                id: "spitter",
                kind: Weapon,
                tags: ["toxic"],
                levels: ["spit", "more spit"],
                behavior: (kind: "toxic_spitter", params: {"tick_damage": 2.0}),
            ),
            (id: "synapse", kind: Upgrade, tags: ["nerve"], levels: ["a"]),
            (id: "nerve_toxin", kind: Weapon, levels: ["a", "b"]),
        ],
        recipes: [
            (
                required_weapon_tags: ["toxic"],
                required_upgrade_tags: ["nerve"],
                result: "nerve_toxin",
            ),
        ],
    )"#;

    #[test]
    fn parses_components_and_recipes() {
        let catalog = CatalogLoader::parse(SAMPLE).expect("parse");
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.weapons().len(), 2);
        assert_eq!(catalog.recipes()[0].offer_chance, EvolutionRecipe::DEFAULT_OFFER_CHANCE);

        let spitter = &catalog.weapons()[0];
        assert_eq!(spitter.max_level(), 2);
        assert_eq!(spitter.behavior.param("tick_damage"), Some(2.0));
        assert_eq!(catalog.starter_weapons().count(), 1);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let duplicated = r#"(components: [
            (id: "a", kind: Weapon, levels: ["x"]),
            (id: "a", kind: Upgrade, levels: ["x"]),
        ])"#;
        let err = CatalogLoader::parse(duplicated).expect_err("duplicate");
        assert!(err.to_string().contains("duplicate component id 'a'"));
    }
}
