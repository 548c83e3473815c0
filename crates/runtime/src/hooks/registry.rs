//! Hook registry for managing and executing combat hooks.

use std::sync::Arc;

use tracing::{debug, error};

use super::{CombatHook, HookContext, HookCriticality, HookError, SystemAction, ToxicCloudHook};
use crate::error::RuntimeError;

/// Priority-ordered set of combat hooks.
#[derive(Clone)]
pub struct HookRegistry {
    hooks: Arc<[Arc<dyn CombatHook>]>,
}

impl HookRegistry {
    /// Creates a registry. Hooks are sorted by priority (lower values first);
    /// equal priorities keep registration order.
    pub fn new(mut hooks: Vec<Arc<dyn CombatHook>>) -> Self {
        hooks.sort_by_key(|h| h.priority());
        Self {
            hooks: hooks.into(),
        }
    }

    /// Registry with no hooks.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Creates a registry with the default set of hooks.
    ///
    /// Default hooks include:
    /// - ToxicCloudHook: poison ticks burst onto nearby enemies while a
    ///   `miasma` component is equipped
    pub fn default_hooks() -> Self {
        Self::new(vec![
            Arc::new(ToxicCloudHook::default()) as Arc<dyn CombatHook>,
        ])
    }

    /// Collects the actions of every hook that triggers on `ctx`.
    ///
    /// # Error Handling
    ///
    /// - `Critical`: returns the error immediately
    /// - `Important`: logs the error and continues to the next hook
    /// - `Optional`: logs at debug level and continues silently
    pub fn execute(&self, ctx: &HookContext<'_>) -> Result<Vec<SystemAction>, RuntimeError> {
        let mut actions = Vec::new();
        for hook in self.hooks.iter() {
            if !hook.should_trigger(ctx) {
                continue;
            }
            match hook.create_actions(ctx) {
                Ok(created) => {
                    debug!(
                        target: "runtime::hooks",
                        hook = hook.name(),
                        actions = created.len(),
                        "hook triggered"
                    );
                    actions.extend(created);
                }
                Err(err) => self.handle_hook_error(hook.as_ref(), err)?,
            }
        }
        Ok(actions)
    }

    /// Returns the number of hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Returns true if no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Returns an iterator over hook names and priorities (for debugging).
    pub fn hooks(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        self.hooks.iter().map(|h| (h.name(), h.priority()))
    }

    /// Returns Ok(()) for Important/Optional hooks, Err for Critical hooks.
    fn handle_hook_error(
        &self,
        hook: &dyn CombatHook,
        error: HookError,
    ) -> Result<(), RuntimeError> {
        match hook.criticality() {
            HookCriticality::Critical => {
                error!(
                    target: "runtime::hooks",
                    hook = hook.name(),
                    criticality = "critical",
                    error = %error,
                    "Critical hook failed, dropping actions for this trigger"
                );
                Err(RuntimeError::Hook {
                    hook: hook.name(),
                    source: error,
                })
            }
            HookCriticality::Important => {
                error!(
                    target: "runtime::hooks",
                    hook = hook.name(),
                    criticality = "important",
                    error = %error,
                    "Hook failed, continuing"
                );
                Ok(())
            }
            HookCriticality::Optional => {
                debug!(
                    target: "runtime::hooks",
                    hook = hook.name(),
                    criticality = "optional",
                    error = %error,
                    "Optional hook failed"
                );
                Ok(())
            }
        }
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::default_hooks()
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.hooks()).finish()
    }
}
