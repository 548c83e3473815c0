use crate::component::{ComponentDefinition, ComponentId};

/// Authored rule fusing a maxed weapon and a maxed upgrade into `result`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolutionRecipe {
    #[cfg_attr(feature = "serde", serde(default))]
    pub required_weapon_tags: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub required_upgrade_tags: Vec<String>,
    pub result: ComponentId,
    /// Probability in [0, 1] that a matching pair is offered on a given level-up.
    #[cfg_attr(feature = "serde", serde(default = "default_offer_chance"))]
    pub offer_chance: f32,
}

#[cfg(feature = "serde")]
fn default_offer_chance() -> f32 {
    EvolutionRecipe::DEFAULT_OFFER_CHANCE
}

impl EvolutionRecipe {
    pub const DEFAULT_OFFER_CHANCE: f32 = 0.6;

    pub fn new<W, U, S>(weapon_tags: W, upgrade_tags: U, result: impl Into<String>) -> Self
    where
        W: IntoIterator<Item = S>,
        U: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required_weapon_tags: weapon_tags.into_iter().map(Into::into).collect(),
            required_upgrade_tags: upgrade_tags.into_iter().map(Into::into).collect(),
            result: ComponentId::new(result),
            offer_chance: Self::DEFAULT_OFFER_CHANCE,
        }
    }

    #[must_use]
    pub fn with_offer_chance(mut self, offer_chance: f32) -> Self {
        self.offer_chance = offer_chance;
        self
    }

    /// True when both tag sets are supersets of the recipe's requirements.
    pub fn matches(&self, weapon: &ComponentDefinition, upgrade: &ComponentDefinition) -> bool {
        weapon.has_tags(&self.required_weapon_tags) && upgrade.has_tags(&self.required_upgrade_tags)
    }

    pub fn clamped_offer_chance(&self) -> f32 {
        if self.offer_chance.is_nan() {
            0.0
        } else {
            self.offer_chance.clamp(0.0, 1.0)
        }
    }
}
