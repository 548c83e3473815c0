use crate::stats::StatModifierStack;
use crate::status::StatusEffectController;

use super::{Defense, EntityId, Position, Tick, Vitals};

/// Authored stats for a spawnable enemy type.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub id: String,
    pub max_health: f32,
    pub move_speed: f32,
    pub contact_damage: f32,
    /// Seconds between two contact hits from the same enemy.
    #[cfg_attr(feature = "serde", serde(default = "default_contact_cooldown"))]
    pub contact_cooldown_secs: f32,
    #[cfg_attr(feature = "serde", serde(default = "default_contact_range"))]
    pub contact_range: f32,
    #[cfg_attr(feature = "serde", serde(default = "default_experience"))]
    pub experience: u32,
}

#[cfg(feature = "serde")]
fn default_contact_cooldown() -> f32 {
    EnemyTemplate::DEFAULT_CONTACT_COOLDOWN_SECS
}

#[cfg(feature = "serde")]
fn default_contact_range() -> f32 {
    EnemyTemplate::DEFAULT_CONTACT_RANGE
}

#[cfg(feature = "serde")]
fn default_experience() -> u32 {
    EnemyTemplate::DEFAULT_EXPERIENCE
}

impl EnemyTemplate {
    pub const DEFAULT_CONTACT_COOLDOWN_SECS: f32 = 1.0;
    pub const DEFAULT_CONTACT_RANGE: f32 = 0.6;
    pub const DEFAULT_EXPERIENCE: u32 = 1;

    pub fn new(
        id: impl Into<String>,
        max_health: f32,
        move_speed: f32,
        contact_damage: f32,
    ) -> Self {
        Self {
            id: id.into(),
            max_health,
            move_speed,
            contact_damage,
            contact_cooldown_secs: Self::DEFAULT_CONTACT_COOLDOWN_SECS,
            contact_range: Self::DEFAULT_CONTACT_RANGE,
            experience: Self::DEFAULT_EXPERIENCE,
        }
    }

    pub fn with_experience(mut self, experience: u32) -> Self {
        self.experience = experience;
        self
    }
}

/// Contact attack carried by an enemy.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ContactAttack {
    pub damage: f32,
    pub range: f32,
    pub cooldown: Tick,
    pub last_hit: Option<Tick>,
}

impl ContactAttack {
    pub fn is_ready(&self, now: Tick) -> bool {
        match self.last_hit {
            Some(hit) => now >= hit + self.cooldown,
            None => true,
        }
    }
}

/// Everything the combat rules need to know about one entity.
///
/// The modifier stack and status controller are exclusively owned here; other
/// systems reach them only through the owning combatant.
#[derive(Clone, Debug)]
pub struct Combatant {
    pub id: EntityId,
    pub position: Position,
    pub vitals: Vitals,
    pub modifiers: StatModifierStack,
    pub status: StatusEffectController,
    pub defense: Defense,
    /// Base movement speed in world units per second.
    pub move_speed: f32,
    pub contact: ContactAttack,
    /// Experience dropped on death.
    pub experience_reward: u32,
}

impl Combatant {
    pub fn new(id: EntityId, position: Position, max_health: f32) -> Self {
        Self {
            id,
            position,
            vitals: Vitals::new(max_health),
            modifiers: StatModifierStack::new(),
            status: StatusEffectController::new(),
            defense: Defense::default(),
            move_speed: 0.0,
            contact: ContactAttack::default(),
            experience_reward: 0,
        }
    }

    pub fn from_template(id: EntityId, position: Position, template: &EnemyTemplate) -> Self {
        let mut combatant = Self::new(id, position, template.max_health);
        combatant.move_speed = template.move_speed;
        combatant.contact = ContactAttack {
            damage: template.contact_damage,
            range: template.contact_range,
            cooldown: Tick::from_secs_f32(template.contact_cooldown_secs),
            last_hit: None,
        };
        combatant.experience_reward = template.experience;
        combatant
    }

    pub fn with_move_speed(mut self, move_speed: f32) -> Self {
        self.move_speed = move_speed;
        self
    }

    pub fn with_defense(mut self, defense: Defense) -> Self {
        self.defense = defense;
        self
    }

    pub fn is_dead(&self) -> bool {
        self.vitals.is_dead()
    }

    /// Movement speed after status effects and move-speed modifiers.
    pub fn effective_move_speed(&mut self, now: Tick) -> f32 {
        let modifier = self
            .modifiers
            .get_multiplier(crate::stats::StatChannel::MoveSpeed, now)
            .max(0.0);
        self.move_speed * self.vitals.speed_modifier * modifier
    }
}
