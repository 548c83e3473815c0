use game_core::{
    Behavior, BehaviorResult, CombatContext, ComponentDefinition, ComponentId, StatChannel,
};
use strum::IntoEnumIterator;

/// Permanent per-level bonuses on any stat channel.
///
/// Reads one `<channel>_per_level` parameter per channel, e.g.
/// `damage_per_level: 0.1`. Each level replaces the component's own entry in
/// the owner's stack; teardown removes it.
#[derive(Clone, Debug)]
pub struct StatBoost {
    source: ComponentId,
    per_level: Vec<(StatChannel, f32)>,
}

impl StatBoost {
    pub const KIND: &'static str = "stat_boost";

    pub fn from_definition(definition: &ComponentDefinition) -> Box<dyn Behavior> {
        let per_level = StatChannel::iter()
            .filter_map(|channel| {
                let key = format!("{}_per_level", channel.as_ref());
                definition
                    .behavior
                    .param(&key)
                    .map(|value| (channel, value))
            })
            .collect();
        Box::new(Self {
            source: definition.id.clone(),
            per_level,
        })
    }
}

impl Behavior for StatBoost {
    fn name(&self) -> &'static str {
        Self::KIND
    }

    fn activate(&mut self, _ctx: &mut dyn CombatContext) -> BehaviorResult {
        Ok(())
    }

    fn on_upgrade(&mut self, ctx: &mut dyn CombatContext, level: u32) -> BehaviorResult {
        let modifiers = ctx.modifiers();
        for (channel, per_level) in &self.per_level {
            modifiers.set_sourced(*channel, &self.source, per_level * level as f32);
        }
        Ok(())
    }

    fn teardown(&mut self, ctx: &mut dyn CombatContext) {
        ctx.modifiers().remove_source(&self.source);
    }
}
