//! Finds evolution offers and performs the slot-replacement transaction.

use std::collections::HashSet;

use rand::Rng;
use tracing::{debug, info};

use crate::component::{CombatContext, ComponentId, EquipError, Loadout};
use crate::progression::{Catalog, EvolutionOffer};

/// Permanent record of what evolutions already consumed and produced.
#[derive(Clone, Debug, Default)]
pub struct EvolutionLedger {
    retired: HashSet<ComponentId>,
    pairs: HashSet<(ComponentId, ComponentId)>,
    results: HashSet<ComponentId>,
}

impl EvolutionLedger {
    /// Source ids consumed by an evolution never reappear in any option pool.
    pub fn is_retired(&self, id: &ComponentId) -> bool {
        self.retired.contains(id)
    }

    pub fn pair_used(&self, weapon: &ComponentId, upgrade: &ComponentId) -> bool {
        self.pairs.contains(&(weapon.clone(), upgrade.clone()))
    }

    pub fn is_evolved_result(&self, id: &ComponentId) -> bool {
        self.results.contains(id)
    }

    pub fn retired(&self) -> impl Iterator<Item = &ComponentId> {
        self.retired.iter()
    }

    fn record(&mut self, offer: &EvolutionOffer) {
        self.retired.insert(offer.weapon.clone());
        self.retired.insert(offer.upgrade.clone());
        self.pairs.insert((offer.weapon.clone(), offer.upgrade.clone()));
        self.results.insert(offer.result.id.clone());
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct EvolutionResolver;

impl EvolutionResolver {
    /// Rolls every eligible (recipe, maxed weapon, maxed upgrade) triple.
    ///
    /// A recipe whose result is missing from the catalog never matches.
    pub fn offers<R: Rng + ?Sized>(
        &self,
        catalog: &Catalog,
        loadout: &Loadout,
        ledger: &EvolutionLedger,
        rng: &mut R,
    ) -> Vec<EvolutionOffer> {
        let mut offers = Vec::new();
        for recipe in catalog.recipes() {
            let Some(result) = catalog.definition(&recipe.result) else {
                debug!(
                    target: "game_core::evolution",
                    result = %recipe.result,
                    "recipe result missing from catalog"
                );
                continue;
            };
            if loadout.contains(&result.id) || ledger.is_evolved_result(&result.id) {
                continue;
            }

            let maxed_weapons = loadout
                .weapons()
                .iter()
                .filter(|weapon| weapon.is_max_level() && !ledger.is_retired(weapon.id()));
            for weapon in maxed_weapons {
                let maxed_upgrades = loadout
                    .upgrades()
                    .iter()
                    .filter(|upgrade| upgrade.is_max_level() && !ledger.is_retired(upgrade.id()));
                for upgrade in maxed_upgrades {
                    if ledger.pair_used(weapon.id(), upgrade.id()) {
                        continue;
                    }
                    if !recipe.matches(weapon.definition(), upgrade.definition()) {
                        continue;
                    }
                    if !rng.gen_bool(f64::from(recipe.clamped_offer_chance())) {
                        continue;
                    }
                    offers.push(EvolutionOffer {
                        weapon: weapon.id().clone(),
                        upgrade: upgrade.id().clone(),
                        result: result.clone(),
                    });
                }
            }
        }
        offers
    }

    /// Replaces the source weapon with the result and retires both sources.
    ///
    /// The ledger is only updated once the replacement succeeded.
    pub fn apply(
        &self,
        offer: &EvolutionOffer,
        loadout: &mut Loadout,
        ledger: &mut EvolutionLedger,
        ctx: &mut dyn CombatContext,
    ) -> Result<u32, EquipError> {
        let level = loadout.replace(&offer.weapon, offer.result.clone(), ctx)?;
        ledger.record(offer);
        info!(
            target: "game_core::evolution",
            weapon = %offer.weapon,
            upgrade = %offer.upgrade,
            result = %offer.result.id,
            "evolution applied"
        );
        Ok(level)
    }
}
