use std::fmt;
use std::sync::Arc;

use tracing::warn;

use super::{Behavior, BehaviorError, CombatContext, ComponentDefinition, ComponentId};
use crate::state::EntityId;

/// A definition equipped at some level, with its live behavior.
pub struct ComponentInstance {
    definition: Arc<ComponentDefinition>,
    level: u32,
    behavior: Option<Box<dyn Behavior>>,
}

impl ComponentInstance {
    /// Creates a level-1 instance. Call [`initialize`](Self::initialize) before use.
    pub fn new(definition: Arc<ComponentDefinition>, behavior: Option<Box<dyn Behavior>>) -> Self {
        Self {
            definition,
            level: 1,
            behavior,
        }
    }

    pub fn definition(&self) -> &Arc<ComponentDefinition> {
        &self.definition
    }

    pub fn id(&self) -> &ComponentId {
        &self.definition.id
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn max_level(&self) -> u32 {
        self.definition.max_level()
    }

    pub fn is_max_level(&self) -> bool {
        self.level >= self.max_level()
    }

    pub fn behavior_name(&self) -> Option<&'static str> {
        self.behavior.as_ref().map(|behavior| behavior.name())
    }

    /// Runs `initialize` then `on_upgrade(level)`. Faults are logged, never propagated.
    pub fn initialize(&mut self, ctx: &mut dyn CombatContext) {
        let level = self.level;
        let Some(behavior) = self.behavior.as_mut() else {
            return;
        };
        if let Err(err) = behavior.initialize(ctx, &self.definition) {
            log_fault("initialize", &self.definition.id, &err);
        }
        if let Err(err) = behavior.on_upgrade(ctx, level) {
            log_fault("on_upgrade", &self.definition.id, &err);
        }
    }

    /// Raises the level by one (capped at max) and notifies the behavior.
    pub fn upgrade(&mut self, ctx: &mut dyn CombatContext) -> u32 {
        self.level = (self.level + 1).min(self.max_level());
        let level = self.level;
        if let Some(behavior) = self.behavior.as_mut() {
            if let Err(err) = behavior.on_upgrade(ctx, level) {
                log_fault("on_upgrade", &self.definition.id, &err);
            }
        }
        level
    }

    pub fn activate(&mut self, ctx: &mut dyn CombatContext) -> Result<(), BehaviorError> {
        match self.behavior.as_mut() {
            Some(behavior) => behavior.activate(ctx),
            None => Ok(()),
        }
    }

    pub fn notify_poison_tick(
        &mut self,
        ctx: &mut dyn CombatContext,
        target: EntityId,
        damage: f32,
    ) {
        let Some(behavior) = self.behavior.as_mut() else {
            return;
        };
        if let Err(err) = behavior.on_poison_tick(ctx, target, damage) {
            log_fault("on_poison_tick", &self.definition.id, &err);
        }
    }

    /// Tears the behavior down and releases it. The instance stays inert afterwards.
    pub fn teardown(&mut self, ctx: &mut dyn CombatContext) {
        if let Some(mut behavior) = self.behavior.take() {
            behavior.teardown(ctx);
        }
    }
}

impl fmt::Debug for ComponentInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentInstance")
            .field("id", &self.definition.id)
            .field("level", &self.level)
            .field("behavior", &self.behavior_name())
            .finish()
    }
}

fn log_fault(stage: &'static str, component: &ComponentId, err: &BehaviorError) {
    warn!(
        target: "game_core::component",
        %component,
        stage,
        error = %err,
        "behavior fault isolated"
    );
}
