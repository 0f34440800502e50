use thiserror::Error;

use crate::parse::ParseError;
use crate::{EditError, StoreError};

/// Unified error type covering command parsing, rule edits, configuration
/// storage and host calls.
///
/// Returned by [`Engine::run_command()`](crate::Engine::run_command) and the
/// other entry points that touch more than one collaborator.
#[derive(Debug, Error)]
pub enum AutosortError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("host error: {0}")]
    Host(Box<dyn std::error::Error + Send + Sync>),
}

impl<E> From<crate::PassError<E>> for AutosortError
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(err: crate::PassError<E>) -> Self {
        Self::Host(Box::new(err))
    }
}
