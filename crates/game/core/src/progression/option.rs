use std::fmt;
use std::sync::Arc;

use crate::component::{ComponentDefinition, ComponentId};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum OptionKind {
    /// Acquire or level a passive upgrade.
    Upgrade,
    /// Equip a weapon into a free slot.
    NewWeapon,
    /// Level an equipped weapon.
    WeaponUpgrade,
    /// Fuse a maxed weapon and upgrade into a new weapon.
    Evolution,
}

/// Identifier used to deduplicate offers. Plain options reuse the component id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OptionId(String);

impl OptionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The maxed pair an evolution consumes and the recipe result it produces.
#[derive(Clone, Debug, PartialEq)]
pub struct EvolutionOffer {
    pub weapon: ComponentId,
    pub upgrade: ComponentId,
    pub result: Arc<ComponentDefinition>,
}

impl EvolutionOffer {
    pub fn option_id(&self) -> OptionId {
        OptionId::new(format!(
            "evo_{}_{}_{}",
            self.result.id, self.weapon, self.upgrade
        ))
    }
}

/// One entry of a level-up choice screen.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressionOption {
    pub id: OptionId,
    pub kind: OptionKind,
    /// Component acquired or levelled; the result definition for evolutions.
    pub definition: Arc<ComponentDefinition>,
    /// Level the component will have once this option is picked.
    pub level: u32,
    pub evolution: Option<EvolutionOffer>,
}

impl ProgressionOption {
    pub fn component(kind: OptionKind, definition: Arc<ComponentDefinition>, level: u32) -> Self {
        Self {
            id: OptionId::new(definition.id.as_str()),
            kind,
            definition,
            level,
            evolution: None,
        }
    }

    pub fn evolution(offer: EvolutionOffer) -> Self {
        Self {
            id: offer.option_id(),
            kind: OptionKind::Evolution,
            definition: Arc::clone(&offer.result),
            level: 1,
            evolution: Some(offer),
        }
    }

    pub fn title(&self) -> &str {
        self.definition.display_name()
    }

    pub fn description(&self) -> Option<&str> {
        self.definition.level_description(self.level)
    }
}
