/// Tunable combat and progression parameters.
///
/// Loaded from `config.toml` by the content crate; every field has a default
/// so partial files are accepted.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Probability in [0, 1] that a normal-channel hit is critical.
    pub critical_chance: f32,
    pub critical_multiplier: f32,
    /// Damage multiplier used when a hit has no source entity.
    pub fallback_damage_multiplier: f32,
    /// Floor applied to the source damage multiplier before it scales a hit.
    pub min_damage_multiplier: f32,
    pub weapon_slots: usize,
    /// Number of options shown on each level-up screen.
    pub choice_count: usize,
    pub hero: HeroConfig,
    pub experience: ExperienceConfig,
}

impl GameConfig {
    pub const DEFAULT_CRITICAL_CHANCE: f32 = 0.10;
    pub const DEFAULT_CRITICAL_MULTIPLIER: f32 = 2.0;
    pub const DEFAULT_FALLBACK_DAMAGE_MULTIPLIER: f32 = 1.0;
    pub const DEFAULT_MIN_DAMAGE_MULTIPLIER: f32 = 0.0;
    pub const DEFAULT_WEAPON_SLOTS: usize = 4;
    pub const DEFAULT_CHOICE_COUNT: usize = 3;

    pub fn new() -> Self {
        Self {
            critical_chance: Self::DEFAULT_CRITICAL_CHANCE,
            critical_multiplier: Self::DEFAULT_CRITICAL_MULTIPLIER,
            fallback_damage_multiplier: Self::DEFAULT_FALLBACK_DAMAGE_MULTIPLIER,
            min_damage_multiplier: Self::DEFAULT_MIN_DAMAGE_MULTIPLIER,
            weapon_slots: Self::DEFAULT_WEAPON_SLOTS,
            choice_count: Self::DEFAULT_CHOICE_COUNT,
            hero: HeroConfig::default(),
            experience: ExperienceConfig::default(),
        }
    }

    /// Config with critical hits disabled, handy for deterministic scenarios.
    pub fn without_criticals() -> Self {
        Self {
            critical_chance: 0.0,
            ..Self::new()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeroConfig {
    pub max_health: f32,
    pub move_speed: f32,
    /// Seconds of contact-hit immunity after taking a hit.
    pub invulnerability_secs: f32,
    /// Fractional max-health increase per level gained.
    pub health_growth_per_level: f32,
    /// Fraction of the new max health restored on level up.
    pub heal_on_level_up: f32,
    /// Health regenerated per second. Zero disables regeneration.
    pub regeneration_per_sec: f32,
}

impl HeroConfig {
    pub const DEFAULT_MAX_HEALTH: f32 = 300.0;
    pub const DEFAULT_MOVE_SPEED: f32 = 4.0;
    pub const DEFAULT_INVULNERABILITY_SECS: f32 = 0.5;
    pub const DEFAULT_HEALTH_GROWTH_PER_LEVEL: f32 = 0.10;
    pub const DEFAULT_HEAL_ON_LEVEL_UP: f32 = 0.10;
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            max_health: Self::DEFAULT_MAX_HEALTH,
            move_speed: Self::DEFAULT_MOVE_SPEED,
            invulnerability_secs: Self::DEFAULT_INVULNERABILITY_SECS,
            health_growth_per_level: Self::DEFAULT_HEALTH_GROWTH_PER_LEVEL,
            heal_on_level_up: Self::DEFAULT_HEAL_ON_LEVEL_UP,
            regeneration_per_sec: 0.0,
        }
    }
}

/// Experience curve: `requirement(level) = max(1, round(base * growth^(level - 1)))`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExperienceConfig {
    pub base: u32,
    pub growth: f32,
    /// Last level with its own requirement; later levels reuse that value.
    pub max_defined_level: u32,
}

impl ExperienceConfig {
    pub const DEFAULT_BASE: u32 = 50;
    pub const DEFAULT_GROWTH: f32 = 1.12;
    pub const DEFAULT_MAX_DEFINED_LEVEL: u32 = 50;
}

impl Default for ExperienceConfig {
    fn default() -> Self {
        Self {
            base: Self::DEFAULT_BASE,
            growth: Self::DEFAULT_GROWTH,
            max_defined_level: Self::DEFAULT_MAX_DEFINED_LEVEL,
        }
    }
}
