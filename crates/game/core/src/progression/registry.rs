use std::collections::VecDeque;
use std::sync::Arc;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use super::{Catalog, Experience, OptionId, OptionKind, ProgressionOption, pick_options};
use crate::component::{CombatContext, ComponentId, EquipError, Loadout};
use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::evolution::{EvolutionLedger, EvolutionResolver};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProgressionError {
    #[error("option {id} is no longer available: {reason}")]
    StaleOption { id: OptionId, reason: &'static str },

    #[error("evolution option {0} carries no evolution offer")]
    MissingOffer(OptionId),

    #[error(transparent)]
    Equip(#[from] EquipError),
}

impl GameError for ProgressionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::StaleOption { .. } => ErrorSeverity::Recoverable,
            Self::MissingOffer(_) => ErrorSeverity::Validation,
            Self::Equip(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::StaleOption { .. } => "PROGRESSION_STALE_OPTION",
            Self::MissingOffer(_) => "PROGRESSION_MISSING_OFFER",
            Self::Equip(err) => err.error_code(),
        }
    }
}

/// What picking an option did to the loadout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionOutcome {
    Equipped(ComponentId),
    Upgraded { id: ComponentId, level: u32 },
    Evolved { from: ComponentId, into: ComponentId },
}

/// Tracks experience, queued level-ups and evolution history, and turns the
/// current loadout into level-up offers.
#[derive(Debug)]
pub struct ProgressionRegistry {
    catalog: Arc<Catalog>,
    experience: Experience,
    pending_levels: VecDeque<u32>,
    ledger: EvolutionLedger,
    resolver: EvolutionResolver,
}

impl ProgressionRegistry {
    pub fn new(catalog: Arc<Catalog>, config: &GameConfig) -> Self {
        Self {
            catalog,
            experience: Experience::new(&config.experience),
            pending_levels: VecDeque::new(),
            ledger: EvolutionLedger::default(),
            resolver: EvolutionResolver,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn experience(&self) -> &Experience {
        &self.experience
    }

    pub fn ledger(&self) -> &EvolutionLedger {
        &self.ledger
    }

    /// Adds experience and queues every level reached. Returns those levels.
    pub fn add_experience(&mut self, amount: u32) -> Vec<u32> {
        let reached = self.experience.add(amount);
        if !reached.is_empty() {
            debug!(target: "game_core::progression", levels = ?reached, "levels queued");
        }
        self.pending_levels.extend(reached.iter().copied());
        reached
    }

    pub fn pending_levels(&self) -> usize {
        self.pending_levels.len()
    }

    pub fn peek_pending_level(&self) -> Option<u32> {
        self.pending_levels.front().copied()
    }

    /// Consumes the oldest queued level-up.
    pub fn pop_pending_level(&mut self) -> Option<u32> {
        self.pending_levels.pop_front()
    }

    /// Every option currently valid for `loadout`, before screen composition.
    pub fn candidates<R: Rng + ?Sized>(
        &self,
        loadout: &Loadout,
        rng: &mut R,
    ) -> Vec<ProgressionOption> {
        let mut candidates = Vec::new();

        for upgrade in self.catalog.upgrades() {
            if self.ledger.is_retired(&upgrade.id) {
                continue;
            }
            let current = loadout.level_of(&upgrade.id).unwrap_or(0);
            if current < upgrade.max_level() {
                candidates.push(ProgressionOption::component(
                    OptionKind::Upgrade,
                    Arc::clone(upgrade),
                    current + 1,
                ));
            }
        }

        let free_slots = loadout.free_weapon_slots();
        if free_slots > 0 {
            let new_weapons = self
                .catalog
                .starter_weapons()
                .filter(|weapon| self.is_offerable_weapon(&weapon.id, loadout))
                .take(free_slots);
            for weapon in new_weapons {
                candidates.push(ProgressionOption::component(
                    OptionKind::NewWeapon,
                    Arc::clone(weapon),
                    1,
                ));
            }
        }

        for weapon in loadout.weapons() {
            if weapon.is_max_level() || self.ledger.is_retired(weapon.id()) {
                continue;
            }
            candidates.push(ProgressionOption::component(
                OptionKind::WeaponUpgrade,
                Arc::clone(weapon.definition()),
                weapon.level() + 1,
            ));
        }

        let offers = self
            .resolver
            .offers(&self.catalog, loadout, &self.ledger, rng);
        candidates.extend(offers.into_iter().map(ProgressionOption::evolution));

        candidates
    }

    /// Composes a level-up screen of at most `count` options.
    pub fn build_options<R: Rng + ?Sized>(
        &self,
        count: usize,
        loadout: &Loadout,
        rng: &mut R,
    ) -> Vec<ProgressionOption> {
        let candidates = self.candidates(loadout, rng);
        pick_options(candidates, count, loadout.is_full(), rng)
    }

    /// Opening screen: `count` random starter weapons.
    pub fn build_initial_options<R: Rng + ?Sized>(
        &self,
        count: usize,
        loadout: &Loadout,
        rng: &mut R,
    ) -> Vec<ProgressionOption> {
        let mut weapons: Vec<_> = self
            .catalog
            .starter_weapons()
            .filter(|weapon| self.is_offerable_weapon(&weapon.id, loadout))
            .collect();
        weapons.shuffle(rng);
        weapons
            .into_iter()
            .take(count)
            .map(|weapon| {
                ProgressionOption::component(OptionKind::NewWeapon, Arc::clone(weapon), 1)
            })
            .collect()
    }

    /// Applies a picked option to the loadout.
    pub fn select_option(
        &mut self,
        option: &ProgressionOption,
        loadout: &mut Loadout,
        ctx: &mut dyn CombatContext,
    ) -> Result<SelectionOutcome, ProgressionError> {
        let id = &option.definition.id;
        let outcome = match option.kind {
            OptionKind::Evolution => {
                let offer = option
                    .evolution
                    .as_ref()
                    .ok_or_else(|| ProgressionError::MissingOffer(option.id.clone()))?;
                if self.ledger.is_retired(&offer.weapon) || self.ledger.is_retired(&offer.upgrade) {
                    return Err(ProgressionError::StaleOption {
                        id: option.id.clone(),
                        reason: "source already consumed",
                    });
                }
                self.resolver
                    .apply(offer, loadout, &mut self.ledger, ctx)?;
                SelectionOutcome::Evolved {
                    from: offer.weapon.clone(),
                    into: offer.result.id.clone(),
                }
            }
            _ if self.ledger.is_retired(id) => {
                return Err(ProgressionError::StaleOption {
                    id: option.id.clone(),
                    reason: "component retired by evolution",
                });
            }
            OptionKind::NewWeapon => {
                loadout.equip(Arc::clone(&option.definition), ctx)?;
                SelectionOutcome::Equipped(id.clone())
            }
            OptionKind::Upgrade | OptionKind::WeaponUpgrade => {
                if loadout.contains(id) {
                    let level = loadout.upgrade(id, ctx)?;
                    SelectionOutcome::Upgraded {
                        id: id.clone(),
                        level,
                    }
                } else {
                    loadout.equip(Arc::clone(&option.definition), ctx)?;
                    SelectionOutcome::Equipped(id.clone())
                }
            }
        };
        info!(
            target: "game_core::progression",
            option = %option.id,
            kind = %option.kind,
            "option selected"
        );
        Ok(outcome)
    }

    fn is_offerable_weapon(&self, id: &ComponentId, loadout: &Loadout) -> bool {
        !loadout.contains(id) && !self.ledger.is_retired(id) && !self.ledger.is_evolved_result(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentDefinition;
    use crate::evolution::EvolutionRecipe;
    use crate::testing::{RecordingFactory, TestContext};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn catalog() -> Arc<Catalog> {
        Arc::new(Catalog::new(
            [
                ComponentDefinition::weapon("spitter", 2).with_tags(["toxic"]),
                ComponentDefinition::weapon("boomerang", 3).with_tags(["blade"]),
                ComponentDefinition::weapon("pulse", 3).with_tags(["void"]),
                ComponentDefinition::upgrade("synapse", 2).with_tags(["nerve"]),
                ComponentDefinition::upgrade("might", 3),
                ComponentDefinition::weapon("nerve_toxin", 5).with_tags(["toxic"]),
            ],
            [EvolutionRecipe::new(["toxic"], ["nerve"], "nerve_toxin").with_offer_chance(1.0)],
        ))
    }

    fn setup() -> (ProgressionRegistry, Loadout, TestContext) {
        let config = GameConfig::without_criticals();
        let registry = ProgressionRegistry::new(catalog(), &config);
        let loadout = Loadout::new(config.weapon_slots, Arc::new(RecordingFactory::default()));
        (registry, loadout, TestContext::new())
    }

    fn pick(
        registry: &mut ProgressionRegistry,
        loadout: &mut Loadout,
        ctx: &mut TestContext,
        kind: OptionKind,
        id: &str,
    ) -> SelectionOutcome {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let option = registry
            .candidates(loadout, &mut rng)
            .into_iter()
            .find(|option| option.kind == kind && option.definition.id.as_str() == id)
            .expect("candidate present");
        registry.select_option(&option, loadout, ctx).expect("select")
    }

    #[test]
    fn initial_options_are_starter_weapons() {
        let (registry, loadout, _) = setup();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let options = registry.build_initial_options(3, &loadout, &mut rng);
        assert_eq!(options.len(), 3);
        assert!(options.iter().all(|o| o.kind == OptionKind::NewWeapon));
        assert!(options.iter().all(|o| o.definition.id.as_str() != "nerve_toxin"));
    }

    #[test]
    fn unowned_upgrade_is_offered_at_level_one() {
        let (registry, loadout, _) = setup();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let candidates = registry.candidates(&loadout, &mut rng);
        let might = candidates
            .iter()
            .find(|o| o.definition.id.as_str() == "might")
            .expect("might offered");
        assert_eq!(might.kind, OptionKind::Upgrade);
        assert_eq!(might.level, 1);
    }

    #[test]
    fn picking_an_owned_upgrade_levels_it() {
        let (mut registry, mut loadout, mut ctx) = setup();
        let first = pick(&mut registry, &mut loadout, &mut ctx, OptionKind::Upgrade, "might");
        assert_eq!(first, SelectionOutcome::Equipped(ComponentId::new("might")));
        let second = pick(&mut registry, &mut loadout, &mut ctx, OptionKind::Upgrade, "might");
        assert_eq!(
            second,
            SelectionOutcome::Upgraded {
                id: ComponentId::new("might"),
                level: 2
            }
        );
    }

    #[test]
    fn experience_queues_levels() {
        let (mut registry, _, _) = setup();
        assert_eq!(registry.add_experience(50 + 56), vec![2, 3]);
        assert_eq!(registry.pending_levels(), 2);
        assert_eq!(registry.pop_pending_level(), Some(2));
        assert_eq!(registry.peek_pending_level(), Some(3));
    }

    #[test]
    fn evolution_sources_never_return() {
        let (mut registry, mut loadout, mut ctx) = setup();
        pick(&mut registry, &mut loadout, &mut ctx, OptionKind::NewWeapon, "spitter");
        pick(&mut registry, &mut loadout, &mut ctx, OptionKind::WeaponUpgrade, "spitter");
        pick(&mut registry, &mut loadout, &mut ctx, OptionKind::Upgrade, "synapse");
        pick(&mut registry, &mut loadout, &mut ctx, OptionKind::Upgrade, "synapse");

        let outcome = pick(
            &mut registry,
            &mut loadout,
            &mut ctx,
            OptionKind::Evolution,
            "nerve_toxin",
        );
        assert_eq!(
            outcome,
            SelectionOutcome::Evolved {
                from: ComponentId::new("spitter"),
                into: ComponentId::new("nerve_toxin"),
            }
        );

        for seed in 0..30 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            for option in registry.build_options(10, &loadout, &mut rng) {
                let id = option.definition.id.as_str();
                assert!(id != "spitter" && id != "synapse", "retired id {id} offered");
                if let Some(offer) = &option.evolution {
                    assert!(offer.weapon.as_str() != "spitter");
                }
            }
        }
        // The evolved weapon can still be levelled.
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        assert!(registry
            .candidates(&loadout, &mut rng)
            .iter()
            .any(|o| {
                o.kind == OptionKind::WeaponUpgrade && o.definition.id.as_str() == "nerve_toxin"
            }));
    }

    #[test]
    fn stale_evolution_is_rejected() {
        let (mut registry, mut loadout, mut ctx) = setup();
        pick(&mut registry, &mut loadout, &mut ctx, OptionKind::NewWeapon, "spitter");
        pick(&mut registry, &mut loadout, &mut ctx, OptionKind::WeaponUpgrade, "spitter");
        pick(&mut registry, &mut loadout, &mut ctx, OptionKind::Upgrade, "synapse");
        pick(&mut registry, &mut loadout, &mut ctx, OptionKind::Upgrade, "synapse");

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let offer = registry
            .candidates(&loadout, &mut rng)
            .into_iter()
            .find(|o| o.kind == OptionKind::Evolution)
            .expect("evolution offered");
        registry
            .select_option(&offer, &mut loadout, &mut ctx)
            .expect("first pick");
        assert!(matches!(
            registry.select_option(&offer, &mut loadout, &mut ctx),
            Err(ProgressionError::StaleOption { .. })
        ));
    }

    #[test]
    fn full_slots_stop_new_weapon_offers() {
        let config = GameConfig {
            weapon_slots: 1,
            ..GameConfig::without_criticals()
        };
        let mut registry = ProgressionRegistry::new(catalog(), &config);
        let mut loadout = Loadout::new(1, Arc::new(RecordingFactory::default()));
        let mut ctx = TestContext::new();
        pick(&mut registry, &mut loadout, &mut ctx, OptionKind::NewWeapon, "spitter");

        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let options = registry.build_options(3, &loadout, &mut rng);
            assert!(options.iter().all(|o| o.kind != OptionKind::NewWeapon));
        }
    }
}
