//! Common error infrastructure for game-core.
//!
//! Domain errors (`BehaviorError`, `EquipError`, `ProgressionError`) live next
//! to the code that raises them and share the classification defined here.

use crate::state::{EntityId, Tick};

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the caller may retry later or pick another option
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistency worth investigating
/// - **Fatal**: the simulation cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: weapon slots full, option no longer offered.
    Recoverable,

    /// Examples: unknown component id, equipping a duplicate.
    Validation,

    /// Examples: a behavior fault, a catalog referencing a missing definition.
    Internal,

    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Contextual information attached to errors for diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ErrorContext {
    pub entity: Option<EntityId>,
    /// Game clock when the error was raised.
    pub at: Tick,
    pub message: Option<&'static str>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(at: Tick) -> Self {
        Self {
            entity: None,
            at,
            message: None,
        }
    }

    #[must_use]
    pub const fn with_entity(mut self, entity: EntityId) -> Self {
        self.entity = Some(entity);
        self
    }

    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

/// Common trait for all game-core errors.
///
/// Implement alongside `#[derive(thiserror::Error)]`; classify severity by
/// recoverability, not by impact.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Static identifier for this error variant, used in logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
