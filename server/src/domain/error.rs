//! User-facing screen errors

use thiserror::Error;

/// Coarse classification, used by the HTTP layer to pick a status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewErrorKind {
    Unauthenticated,
    Invalid,
    NotFound,
    Failed,
}

/// An operation failure carrying the message shown to the user.
///
/// The underlying cause is logged where the error is created and not kept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ViewError {
    pub kind: ViewErrorKind,
    pub message: String,
}

impl ViewError {
    fn new(kind: ViewErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ViewErrorKind::Unauthenticated, message)
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(ViewErrorKind::Invalid, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ViewErrorKind::NotFound, message)
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(ViewErrorKind::Failed, message)
    }
}
