use crate::state::{EntityId, Position};

use super::{DamageChannel, DamageKind, DamageRequest, DamageSourceKind};

/// Spatial lookup supplied by whoever owns entity positions.
pub trait SpatialQuery {
    /// Living hostile entities whose position lies within `radius` of `center`.
    fn entities_within(&self, center: Position, radius: f32) -> Vec<EntityId>;

    /// Closest living hostile entity to `from`, if any.
    fn nearest(&self, from: Position) -> Option<(EntityId, Position)>;
}

/// Damage applied once to every entity inside a circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AreaDamage {
    pub source: Option<EntityId>,
    pub center: Position,
    pub radius: f32,
    pub amount: f32,
    pub channel: DamageChannel,
    pub kind: DamageKind,
    pub source_kind: DamageSourceKind,
    /// Entity skipped by the sweep, e.g. the one that triggered a pulse.
    pub exclude: Option<EntityId>,
}

impl AreaDamage {
    pub fn new(source: Option<EntityId>, center: Position, radius: f32, amount: f32) -> Self {
        Self {
            source,
            center,
            radius,
            amount,
            channel: DamageChannel::Normal,
            kind: DamageKind::Normal,
            source_kind: DamageSourceKind::Area,
            exclude: None,
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: DamageKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_source_kind(mut self, source_kind: DamageSourceKind) -> Self {
        self.source_kind = source_kind;
        self
    }

    #[must_use]
    pub fn excluding(mut self, entity: EntityId) -> Self {
        self.exclude = Some(entity);
        self
    }

    /// Targets selected by `query`, minus the excluded entity.
    pub fn targets(&self, query: &(impl SpatialQuery + ?Sized)) -> Vec<EntityId> {
        let mut targets = query.entities_within(self.center, self.radius);
        if let Some(excluded) = self.exclude {
            targets.retain(|id| *id != excluded);
        }
        targets
    }

    pub fn request_for(&self, target: EntityId) -> DamageRequest {
        DamageRequest {
            source: self.source,
            target,
            amount: self.amount,
            channel: self.channel,
            kind: self.kind,
            source_kind: self.source_kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Line(Vec<(EntityId, Position)>);

    impl SpatialQuery for Line {
        fn entities_within(&self, center: Position, radius: f32) -> Vec<EntityId> {
            self.0
                .iter()
                .filter(|(_, pos)| pos.distance(center) <= radius)
                .map(|(id, _)| *id)
                .collect()
        }

        fn nearest(&self, _from: Position) -> Option<(EntityId, Position)> {
            self.0.first().copied()
        }
    }

    #[test]
    fn excluded_entity_is_skipped() {
        let query = Line(vec![
            (EntityId(1), Position::new(0.5, 0.0)),
            (EntityId(2), Position::new(1.0, 0.0)),
            (EntityId(3), Position::new(9.0, 0.0)),
        ]);
        let area = AreaDamage::new(None, Position::ORIGIN, 2.0, 6.0).excluding(EntityId(1));
        assert_eq!(area.targets(&query), vec![EntityId(2)]);

        let request = area.request_for(EntityId(2));
        assert_eq!(request.source_kind, DamageSourceKind::Area);
        assert_eq!(request.amount, 6.0);
    }
}
