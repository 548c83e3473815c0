use super::Tick;

/// Health and the derived combat scalars shared by every damageable entity.
///
/// `speed_modifier` and `incoming_damage_multiplier` are owned by the status
/// controller: it is the only writer, everything else reads them.
#[derive(Clone, Debug, PartialEq)]
pub struct Vitals {
    pub health: f32,
    pub max_health: f32,
    /// Multiplier applied to base movement speed (1.0 = unaffected, 0.0 = rooted).
    pub speed_modifier: f32,
    /// Multiplier applied to every incoming hit before crit resolution.
    pub incoming_damage_multiplier: f32,
    dead: bool,
}

impl Vitals {
    pub fn new(max_health: f32) -> Self {
        let max_health = max_health.max(0.0);
        Self {
            health: max_health,
            max_health,
            speed_modifier: 1.0,
            incoming_damage_multiplier: 1.0,
            dead: false,
        }
    }

    /// True once the entity was killed, or if it never had health to begin with.
    pub fn is_dead(&self) -> bool {
        self.dead || self.health <= 0.0
    }

    /// Flags the entity as dead. Returns true only on the first transition.
    pub fn mark_dead(&mut self) -> bool {
        if self.dead {
            return false;
        }
        self.dead = true;
        true
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0.0 {
            0.0
        } else {
            self.health / self.max_health
        }
    }

    /// Changes the health cap, keeping current health inside it.
    pub fn set_max_health(&mut self, max_health: f32) {
        self.max_health = max_health.max(0.0);
        self.health = self.health.min(self.max_health);
    }
}

impl Default for Vitals {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Mitigation applied to contact hits taken by the hero.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Defense {
    /// Fraction of each contact hit that is absorbed, clamped to [0, 1] on use.
    pub damage_reduction: f32,
    /// Chance in [0, 1] to ignore a contact hit entirely.
    pub dodge_chance: f32,
    /// Grace window after a hit during which further contact hits are ignored.
    pub invulnerability: Tick,
    pub last_hit: Option<Tick>,
}

impl Defense {
    pub fn with_invulnerability(invulnerability: Tick) -> Self {
        Self {
            invulnerability,
            ..Self::default()
        }
    }

    pub fn is_invulnerable(&self, now: Tick) -> bool {
        match self.last_hit {
            Some(hit) => now < hit + self.invulnerability,
            None => false,
        }
    }
}
