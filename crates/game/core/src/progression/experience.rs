use crate::config::ExperienceConfig;

/// Hero experience and level, driven by an exponential requirement table.
#[derive(Clone, Debug, PartialEq)]
pub struct Experience {
    level: u32,
    current: u32,
    table: Vec<u32>,
}

impl Experience {
    pub fn new(config: &ExperienceConfig) -> Self {
        let max_level = config.max_defined_level.max(1);
        let table = (1..=max_level)
            .map(|level| {
                let exponent = i32::try_from(level - 1).unwrap_or(i32::MAX);
                let required = f64::from(config.base) * f64::from(config.growth).powi(exponent);
                (required.round() as u32).max(1)
            })
            .collect();
        Self {
            level: 1,
            current: 0,
            table,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Experience accumulated towards the next level.
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Experience needed to advance from `level` to `level + 1`.
    /// Levels past the table reuse its last entry.
    pub fn requirement_for(&self, level: u32) -> u32 {
        let index = usize::try_from(level.saturating_sub(1)).unwrap_or(usize::MAX);
        self.table
            .get(index)
            .or_else(|| self.table.last())
            .copied()
            .unwrap_or(1)
    }

    pub fn to_next_level(&self) -> u32 {
        self.requirement_for(self.level)
    }

    /// Adds experience and returns every level reached, in order.
    pub fn add(&mut self, amount: u32) -> Vec<u32> {
        let mut reached = Vec::new();
        self.current = self.current.saturating_add(amount);
        loop {
            let required = self.to_next_level();
            if self.current < required {
                break;
            }
            self.current -= required;
            self.level += 1;
            reached.push(self.level);
        }
        reached
    }
}

impl Default for Experience {
    fn default() -> Self {
        Self::new(&ExperienceConfig::default())
    }
}
