//! Load failures.
//!
//! Every failure is fatal: a spec either loads completely or the load
//! returns one of these.

use std::path::PathBuf;
use thiserror::Error;
use tsenv_types::{ResolveError, SpecId};

#[derive(Debug, Error)]
pub enum SpecError {
    /// The input does not have the expected shape.
    #[error("malformed spec at {at}: {message}")]
    MalformedSpec { at: String, message: String },

    #[error("record {id} has unknown kind `{kind}`")]
    UnknownKind { id: SpecId, kind: String },

    #[error("id {id} is registered twice")]
    DuplicateId { id: SpecId },

    #[error("id {id} does not exist")]
    UnresolvedId { id: SpecId },

    #[error("invariant violation: {message}")]
    InvariantViolation { message: String },

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SpecError {
    pub(crate) fn malformed(at: impl Into<String>, message: impl Into<String>) -> Self {
        SpecError::MalformedSpec {
            at: at.into(),
            message: message.into(),
        }
    }

    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        SpecError::InvariantViolation {
            message: message.into(),
        }
    }
}

impl From<ResolveError> for SpecError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::DuplicateId { id } => SpecError::DuplicateId { id },
            ResolveError::UnresolvedId { id } => SpecError::UnresolvedId { id },
            ResolveError::InvariantViolation { message } => {
                SpecError::InvariantViolation { message }
            }
        }
    }
}
