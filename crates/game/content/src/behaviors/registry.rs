use std::collections::HashMap;

use game_core::{Behavior, BehaviorFactory, ComponentDefinition};
use tracing::debug;

use super::upgrades::{BloodCapacitor, Carapace, FrostAura, StatBoost};
use super::weapons::{Boomerang, NerveToxin, PulseField, ToxicSpitter};

pub type BehaviorConstructor = fn(&ComponentDefinition) -> Box<dyn Behavior>;

/// Behavior constructors keyed by `BehaviorSpec::kind`.
#[derive(Clone, Default)]
pub struct BehaviorRegistry {
    constructors: HashMap<String, BehaviorConstructor>,
}

impl BehaviorRegistry {
    /// Empty registry; every definition resolves to an inert component.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in behavior.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(PulseField::KIND, PulseField::from_definition);
        registry.register(Boomerang::KIND, Boomerang::from_definition);
        registry.register(ToxicSpitter::KIND, ToxicSpitter::from_definition);
        registry.register(NerveToxin::KIND, NerveToxin::from_definition);
        registry.register(StatBoost::KIND, StatBoost::from_definition);
        registry.register(Carapace::KIND, Carapace::from_definition);
        registry.register(FrostAura::KIND, FrostAura::from_definition);
        registry.register(BloodCapacitor::KIND, BloodCapacitor::from_definition);
        registry
    }

    /// Registers or replaces the constructor for `kind`.
    pub fn register(&mut self, kind: impl Into<String>, constructor: BehaviorConstructor) {
        self.constructors.insert(kind.into(), constructor);
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.constructors.contains_key(kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl BehaviorFactory for BehaviorRegistry {
    fn create(&self, definition: &ComponentDefinition) -> Option<Box<dyn Behavior>> {
        let constructor = self.constructors.get(&definition.behavior.kind)?;
        debug!(
            target: "game_content::behaviors",
            component = %definition.id,
            kind = %definition.behavior.kind,
            "behavior created"
        );
        Some(constructor(definition))
    }
}

impl std::fmt::Debug for BehaviorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<_> = self.kinds().collect();
        kinds.sort_unstable();
        f.debug_struct("BehaviorRegistry").field("kinds", &kinds).finish()
    }
}
