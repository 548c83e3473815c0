use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Stable authored identifier of a weapon or upgrade.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ComponentId(String);

impl ComponentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ComponentKind {
    /// Occupies one of the hero's limited weapon slots.
    Weapon,
    /// Passive; any number may be owned.
    Upgrade,
}

/// Factory key plus numeric tuning parameters for a behavior.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BehaviorSpec {
    pub kind: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub params: BTreeMap<String, f32>,
}

impl BehaviorSpec {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            params: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: f32) -> Self {
        self.params.insert(name.into(), value);
        self
    }

    pub fn param(&self, name: &str) -> Option<f32> {
        self.params.get(name).copied()
    }

    pub fn param_or(&self, name: &str, default: f32) -> f32 {
        self.param(name).unwrap_or(default)
    }
}

/// Immutable authored description of a weapon or upgrade.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentDefinition {
    pub id: ComponentId,
    pub kind: ComponentKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: BTreeSet<String>,
    /// One description per level; its length is the maximum level.
    #[cfg_attr(feature = "serde", serde(default))]
    pub levels: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub behavior: BehaviorSpec,
}

impl ComponentDefinition {
    pub fn new(id: impl Into<String>, kind: ComponentKind, max_level: u32) -> Self {
        let id = ComponentId::new(id);
        let levels = (1..=max_level).map(|level| format!("level {level}")).collect();
        Self {
            name: id.as_str().to_owned(),
            behavior: BehaviorSpec::new(id.as_str()),
            id,
            kind,
            tags: BTreeSet::new(),
            levels,
        }
    }

    pub fn weapon(id: impl Into<String>, max_level: u32) -> Self {
        Self::new(id, ComponentKind::Weapon, max_level)
    }

    pub fn upgrade(id: impl Into<String>, max_level: u32) -> Self {
        Self::new(id, ComponentKind::Upgrade, max_level)
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_behavior(mut self, behavior: BehaviorSpec) -> Self {
        self.behavior = behavior;
        self
    }

    /// Number of authored levels, never below 1.
    pub fn max_level(&self) -> u32 {
        u32::try_from(self.levels.len()).unwrap_or(u32::MAX).max(1)
    }

    pub fn is_weapon(&self) -> bool {
        self.kind == ComponentKind::Weapon
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.id.as_str()
        } else {
            &self.name
        }
    }

    /// Description of `level` (1-based).
    pub fn level_description(&self, level: u32) -> Option<&str> {
        let index = usize::try_from(level.checked_sub(1)?).ok()?;
        self.levels.get(index).map(String::as_str)
    }

    /// True when every non-blank required tag is present.
    pub fn has_tags<'a>(&self, required: impl IntoIterator<Item = &'a String>) -> bool {
        required
            .into_iter()
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
            .all(|tag| self.tags.contains(tag))
    }
}
