//! The hero's equipped weapons and upgrades.

use std::sync::Arc;

use tracing::{debug, warn};

use super::{
    BehaviorFactory, CombatContext, ComponentDefinition, ComponentId, ComponentInstance,
    ComponentKind,
};
use crate::error::{ErrorSeverity, GameError};
use crate::state::EntityId;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EquipError {
    #[error("{0} is already equipped")]
    AlreadyEquipped(ComponentId),

    #[error("all {capacity} weapon slots are occupied")]
    SlotsFull { capacity: usize },

    #[error("{0} is not equipped")]
    NotEquipped(ComponentId),
}

impl GameError for EquipError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SlotsFull { .. } => ErrorSeverity::Recoverable,
            Self::AlreadyEquipped(_) | Self::NotEquipped(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyEquipped(_) => "EQUIP_DUPLICATE",
            Self::SlotsFull { .. } => "EQUIP_SLOTS_FULL",
            Self::NotEquipped(_) => "EQUIP_NOT_EQUIPPED",
        }
    }
}

/// Weapons (limited slots) and upgrades (unbounded), each kept in equip order.
pub struct Loadout {
    weapons: Vec<ComponentInstance>,
    upgrades: Vec<ComponentInstance>,
    weapon_slots: usize,
    factory: Arc<dyn BehaviorFactory>,
}

impl Loadout {
    pub fn new(weapon_slots: usize, factory: Arc<dyn BehaviorFactory>) -> Self {
        Self {
            weapons: Vec::new(),
            upgrades: Vec::new(),
            weapon_slots,
            factory,
        }
    }

    pub fn weapons(&self) -> &[ComponentInstance] {
        &self.weapons
    }

    pub fn upgrades(&self) -> &[ComponentInstance] {
        &self.upgrades
    }

    /// Weapons then upgrades, each in equip order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentInstance> {
        self.weapons.iter().chain(self.upgrades.iter())
    }

    pub fn get(&self, id: &ComponentId) -> Option<&ComponentInstance> {
        self.iter().find(|instance| instance.id() == id)
    }

    pub fn contains(&self, id: &ComponentId) -> bool {
        self.get(id).is_some()
    }

    pub fn level_of(&self, id: &ComponentId) -> Option<u32> {
        self.get(id).map(ComponentInstance::level)
    }

    pub fn weapon_slots(&self) -> usize {
        self.weapon_slots
    }

    pub fn free_weapon_slots(&self) -> usize {
        self.weapon_slots.saturating_sub(self.weapons.len())
    }

    pub fn is_full(&self) -> bool {
        self.free_weapon_slots() == 0
    }

    /// Equips a new component at level 1 and runs its initialization.
    pub fn equip(
        &mut self,
        definition: Arc<ComponentDefinition>,
        ctx: &mut dyn CombatContext,
    ) -> Result<u32, EquipError> {
        if self.contains(&definition.id) {
            return Err(EquipError::AlreadyEquipped(definition.id.clone()));
        }
        if definition.kind == ComponentKind::Weapon && self.is_full() {
            return Err(EquipError::SlotsFull {
                capacity: self.weapon_slots,
            });
        }

        let instance = self.instantiate(definition, ctx);
        let level = instance.level();
        match instance.definition().kind {
            ComponentKind::Weapon => self.weapons.push(instance),
            ComponentKind::Upgrade => self.upgrades.push(instance),
        }
        Ok(level)
    }

    /// Levels up an equipped component, returning its new level.
    pub fn upgrade(
        &mut self,
        id: &ComponentId,
        ctx: &mut dyn CombatContext,
    ) -> Result<u32, EquipError> {
        let instance = self
            .weapons
            .iter_mut()
            .chain(self.upgrades.iter_mut())
            .find(|instance| instance.id() == id)
            .ok_or_else(|| EquipError::NotEquipped(id.clone()))?;
        let level = instance.upgrade(ctx);
        debug!(target: "game_core::component", component = %id, level, "component upgraded");
        Ok(level)
    }

    /// Replaces `source` with a fresh level-1 instance of `result` in the same slot.
    ///
    /// When `source` is not equipped the result is equipped normally instead.
    pub fn replace(
        &mut self,
        source: &ComponentId,
        result: Arc<ComponentDefinition>,
        ctx: &mut dyn CombatContext,
    ) -> Result<u32, EquipError> {
        if self.contains(&result.id) {
            return Err(EquipError::AlreadyEquipped(result.id.clone()));
        }
        let slots = match result.kind {
            ComponentKind::Weapon => &self.weapons,
            ComponentKind::Upgrade => &self.upgrades,
        };
        let Some(index) = slots.iter().position(|instance| instance.id() == source) else {
            return self.equip(result, ctx);
        };

        let kind = result.kind;
        let mut retired = self.slots_mut(kind).remove(index);
        retired.teardown(ctx);
        let fresh = self.instantiate(result, ctx);
        let level = fresh.level();
        self.slots_mut(kind).insert(index, fresh);
        Ok(level)
    }

    fn slots_mut(&mut self, kind: ComponentKind) -> &mut Vec<ComponentInstance> {
        match kind {
            ComponentKind::Weapon => &mut self.weapons,
            ComponentKind::Upgrade => &mut self.upgrades,
        }
    }

    /// Activates every instance in equip order. A failing behavior is logged and
    /// skipped; the rest still run. Returns the number of faults.
    pub fn tick(&mut self, ctx: &mut dyn CombatContext) -> usize {
        let mut faults = 0;
        for instance in self.weapons.iter_mut().chain(self.upgrades.iter_mut()) {
            if let Err(err) = instance.activate(ctx) {
                faults += 1;
                warn!(
                    target: "game_core::component",
                    component = %instance.id(),
                    error = %err,
                    "activation failed"
                );
            }
        }
        faults
    }

    pub fn notify_poison_tick(
        &mut self,
        ctx: &mut dyn CombatContext,
        target: EntityId,
        damage: f32,
    ) {
        for instance in self.weapons.iter_mut().chain(self.upgrades.iter_mut()) {
            instance.notify_poison_tick(ctx, target, damage);
        }
    }

    pub fn teardown_all(&mut self, ctx: &mut dyn CombatContext) {
        for mut instance in self.weapons.drain(..).chain(self.upgrades.drain(..)) {
            instance.teardown(ctx);
        }
    }

    fn instantiate(
        &self,
        definition: Arc<ComponentDefinition>,
        ctx: &mut dyn CombatContext,
    ) -> ComponentInstance {
        let behavior = self.factory.create(&definition);
        if behavior.is_none() {
            warn!(
                target: "game_core::component",
                component = %definition.id,
                kind = %definition.behavior.kind,
                "no behavior registered; component is inert"
            );
        }
        let mut instance = ComponentInstance::new(definition, behavior);
        instance.initialize(ctx);
        instance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatChannel;
    use crate::testing::{RecordingFactory, TestContext};
    use proptest::prelude::*;

    fn loadout(slots: usize) -> (Loadout, Arc<RecordingFactory>) {
        let factory = Arc::new(RecordingFactory::default());
        (Loadout::new(slots, factory.clone()), factory)
    }

    #[test]
    fn equip_initializes_at_level_one() {
        let (mut loadout, factory) = loadout(2);
        let mut ctx = TestContext::new();
        let level = loadout
            .equip(Arc::new(ComponentDefinition::weapon("boomerang", 5)), &mut ctx)
            .expect("equip");
        assert_eq!(level, 1);
        assert_eq!(factory.calls(), vec!["boomerang:init", "boomerang:upgrade:1"]);
    }

    #[test]
    fn duplicates_and_full_slots_are_rejected() {
        let (mut loadout, _) = loadout(1);
        let mut ctx = TestContext::new();
        let weapon = Arc::new(ComponentDefinition::weapon("boomerang", 5));
        loadout.equip(weapon.clone(), &mut ctx).expect("equip");

        assert_eq!(
            loadout.equip(weapon, &mut ctx),
            Err(EquipError::AlreadyEquipped(ComponentId::new("boomerang")))
        );
        assert_eq!(
            loadout.equip(Arc::new(ComponentDefinition::weapon("spitter", 5)), &mut ctx),
            Err(EquipError::SlotsFull { capacity: 1 })
        );
        // Upgrades never consume weapon slots.
        assert!(loadout
            .equip(Arc::new(ComponentDefinition::upgrade("carapace", 5)), &mut ctx)
            .is_ok());
    }

    #[test]
    fn upgrade_caps_at_max_level() {
        let (mut loadout, _) = loadout(4);
        let mut ctx = TestContext::new();
        let id = ComponentId::new("boomerang");
        loadout
            .equip(Arc::new(ComponentDefinition::weapon("boomerang", 5)), &mut ctx)
            .expect("equip");
        for _ in 0..10 {
            loadout.upgrade(&id, &mut ctx).expect("upgrade");
        }
        assert_eq!(loadout.level_of(&id), Some(5));
        assert!(loadout.get(&id).is_some_and(ComponentInstance::is_max_level));
    }

    #[test]
    fn upgrade_recomputes_from_absolute_level() {
        let (mut loadout, _) = loadout(4);
        let mut ctx = TestContext::new();
        let id = ComponentId::new("might");
        loadout
            .equip(Arc::new(ComponentDefinition::upgrade("might", 3)), &mut ctx)
            .expect("equip");
        for _ in 0..5 {
            loadout.upgrade(&id, &mut ctx).expect("upgrade");
        }
        // RecordingFactory behaviors keep one permanent +0.1 per level.
        let multiplier = ctx.modifiers.peek_multiplier(StatChannel::Damage, ctx.now);
        assert!((multiplier - 1.3).abs() < 1e-5);
    }

    #[test]
    fn failing_behavior_does_not_stop_others() {
        let (mut loadout, factory) = loadout(4);
        let mut ctx = TestContext::new();
        loadout
            .equip(Arc::new(ComponentDefinition::weapon("faulty", 1)), &mut ctx)
            .expect("equip");
        loadout
            .equip(Arc::new(ComponentDefinition::weapon("boomerang", 5)), &mut ctx)
            .expect("equip");

        assert_eq!(loadout.tick(&mut ctx), 1);
        assert!(factory.calls().contains(&"boomerang:activate".to_owned()));
    }

    #[test]
    fn replace_tears_down_source_before_building_result() {
        let (mut loadout, factory) = loadout(4);
        let mut ctx = TestContext::new();
        for id in ["boomerang", "spitter"] {
            loadout
                .equip(Arc::new(ComponentDefinition::weapon(id, 5)), &mut ctx)
                .expect("equip");
        }
        let level = loadout
            .replace(
                &ComponentId::new("boomerang"),
                Arc::new(ComponentDefinition::weapon("glaive", 5)),
                &mut ctx,
            )
            .expect("replace");
        assert_eq!(level, 1);

        let ids: Vec<_> = loadout.weapons().iter().map(|w| w.id().as_str()).collect();
        assert_eq!(ids, vec!["glaive", "spitter"]);
        assert_eq!(
            factory.calls(),
            vec![
                "boomerang:init",
                "boomerang:upgrade:1",
                "spitter:init",
                "spitter:upgrade:1",
                "boomerang:teardown",
                "glaive:init",
                "glaive:upgrade:1",
            ]
        );
    }

    #[test]
    fn replace_without_source_equips() {
        let (mut loadout, _) = loadout(4);
        let mut ctx = TestContext::new();
        loadout
            .replace(
                &ComponentId::new("missing"),
                Arc::new(ComponentDefinition::weapon("glaive", 5)),
                &mut ctx,
            )
            .expect("replace");
        assert!(loadout.contains(&ComponentId::new("glaive")));
    }

    proptest! {
        #[test]
        fn level_stays_within_bounds(max_level in 1u32..12, upgrades in 0usize..40) {
            let (mut loadout, _) = loadout(4);
            let mut ctx = TestContext::new();
            let id = ComponentId::new("blade");
            loadout
                .equip(Arc::new(ComponentDefinition::weapon("blade", max_level)), &mut ctx)
                .expect("equip");
            let mut previous = 1;
            for _ in 0..upgrades {
                let level = loadout.upgrade(&id, &mut ctx).expect("upgrade");
                prop_assert!(level >= previous);
                prop_assert!(level <= max_level);
                previous = level;
            }
        }
    }
}
