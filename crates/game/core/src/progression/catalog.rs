use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::warn;

use crate::component::{ComponentDefinition, ComponentId, ComponentKind};
use crate::evolution::EvolutionRecipe;

/// Every authored weapon, upgrade and evolution recipe, in authoring order.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    weapons: Vec<Arc<ComponentDefinition>>,
    upgrades: Vec<Arc<ComponentDefinition>>,
    recipes: Vec<EvolutionRecipe>,
    by_id: HashMap<ComponentId, Arc<ComponentDefinition>>,
    evolution_results: HashSet<ComponentId>,
}

impl Catalog {
    /// Builds a catalog. A definition whose id was already seen is skipped.
    pub fn new(
        definitions: impl IntoIterator<Item = ComponentDefinition>,
        recipes: impl IntoIterator<Item = EvolutionRecipe>,
    ) -> Self {
        let mut catalog = Self::default();
        for definition in definitions {
            if catalog.by_id.contains_key(&definition.id) {
                warn!(
                    target: "game_core::progression",
                    component = %definition.id,
                    "duplicate definition skipped"
                );
                continue;
            }
            let definition = Arc::new(definition);
            catalog
                .by_id
                .insert(definition.id.clone(), Arc::clone(&definition));
            match definition.kind {
                ComponentKind::Weapon => catalog.weapons.push(definition),
                ComponentKind::Upgrade => catalog.upgrades.push(definition),
            }
        }
        for recipe in recipes {
            catalog.evolution_results.insert(recipe.result.clone());
            catalog.recipes.push(recipe);
        }
        catalog
    }

    pub fn definition(&self, id: &ComponentId) -> Option<&Arc<ComponentDefinition>> {
        self.by_id.get(id)
    }

    pub fn weapons(&self) -> &[Arc<ComponentDefinition>] {
        &self.weapons
    }

    pub fn upgrades(&self) -> &[Arc<ComponentDefinition>] {
        &self.upgrades
    }

    pub fn recipes(&self) -> &[EvolutionRecipe] {
        &self.recipes
    }

    /// True for definitions only reachable through evolution.
    pub fn is_evolution_result(&self, id: &ComponentId) -> bool {
        self.evolution_results.contains(id)
    }

    /// Weapons that may be offered on their own (not evolution-only).
    pub fn starter_weapons(&self) -> impl Iterator<Item = &Arc<ComponentDefinition>> {
        self.weapons
            .iter()
            .filter(|weapon| !self.is_evolution_result(&weapon.id))
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
