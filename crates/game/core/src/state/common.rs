use std::fmt;
use std::ops::{Add, Sub};

/// Unique identifier for any entity tracked by the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the hero, the owner of the loadout and progression.
    pub const HERO: Self = Self(0);

    /// Returns true if this entity represents the hero.
    #[inline]
    pub const fn is_hero(self) -> bool {
        self.0 == Self::HERO.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::HERO
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Continuous world position in world units.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_squared(self, other: Position) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    pub fn distance(self, other: Position) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Moves towards `target` by at most `max_step`, never overshooting.
    pub fn step_towards(self, target: Position, max_step: f32) -> Position {
        let distance = self.distance(target);
        if distance <= max_step || distance <= f32::EPSILON {
            return target;
        }
        let t = max_step.max(0.0) / distance;
        Position::new(
            self.x + (target.x - self.x) * t,
            self.y + (target.y - self.y) * t,
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Game clock value in milliseconds.
///
/// Durations and absolute instants share this type. [`Tick::NEVER`] stands in
/// for "no expiry" and absorbs any addition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Self = Self(0);
    pub const NEVER: Self = Self(u64::MAX);

    pub const fn new(millis: u64) -> Self {
        Self(millis)
    }

    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Converts seconds to milliseconds, rounding to the nearest millisecond.
    /// Negative and NaN inputs collapse to zero.
    pub fn from_secs_f32(secs: f32) -> Self {
        if secs.is_nan() || secs <= 0.0 {
            return Self::ZERO;
        }
        if secs.is_infinite() {
            return Self::NEVER;
        }
        Self((f64::from(secs) * 1000.0).round() as u64)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    pub fn as_secs_f32(self) -> f32 {
        self.0 as f32 / 1000.0
    }

    pub const fn is_never(self) -> bool {
        self.0 == u64::MAX
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl Add for Tick {
    type Output = Tick;

    fn add(self, rhs: Tick) -> Tick {
        Tick(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Tick {
    type Output = Tick;

    fn sub(self, rhs: Tick) -> Tick {
        Tick(self.0.saturating_sub(rhs.0))
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_never() {
            write!(f, "never")
        } else {
            write!(f, "{}ms", self.0)
        }
    }
}
