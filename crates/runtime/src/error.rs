//! Unified error type surfaced by the runtime API.
use game_core::{ErrorSeverity, GameError, ProgressionError};
use thiserror::Error;

use crate::hooks::HookError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("runtime is paused")]
    Paused,

    #[error("the hero is dead; the run is over")]
    GameOver,

    #[error("unknown enemy template '{0}'")]
    UnknownEnemy(String),

    #[error("runtime requires a catalog before building")]
    MissingCatalog,

    #[error(transparent)]
    Progression(#[from] ProgressionError),

    #[error("critical hook '{hook}' failed")]
    Hook {
        hook: &'static str,
        #[source]
        source: HookError,
    },
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Paused => ErrorSeverity::Recoverable,
            Self::GameOver => ErrorSeverity::Fatal,
            Self::UnknownEnemy(_) | Self::MissingCatalog => ErrorSeverity::Validation,
            Self::Progression(err) => err.severity(),
            Self::Hook { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Paused => "RUNTIME_PAUSED",
            Self::GameOver => "RUNTIME_GAME_OVER",
            Self::UnknownEnemy(_) => "RUNTIME_UNKNOWN_ENEMY",
            Self::MissingCatalog => "RUNTIME_MISSING_CATALOG",
            Self::Progression(err) => err.error_code(),
            Self::Hook { .. } => "RUNTIME_HOOK_FAILED",
        }
    }
}
