//! Error types for the data layer
//!
//! `DataError` covers table reads and writes; `AuthServiceError` covers the
//! auth collaborator, where a rejection carries a user-presentable message.

use thiserror::Error;

/// Error type for catalog table operations
#[derive(Error, Debug)]
pub enum DataError {
    /// Transport-level failure talking to the remote service
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote service answered with a non-success status
    #[error("{backend} returned {status}: {message}")]
    Remote {
        backend: &'static str,
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// Response body did not match the expected row shape
    #[error("Failed to decode {table} rows: {message}")]
    Decode { table: &'static str, message: String },

    /// Expected row does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DataError {
    /// Remote error code reported by the service (e.g. `PGRST116`, `23505`)
    pub fn remote_code(&self) -> Option<&str> {
        match self {
            Self::Remote { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

/// Error type for the auth collaborator
#[derive(Error, Debug)]
pub enum AuthServiceError {
    /// The auth service refused the request (bad credentials, unconfirmed email, ...)
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// Transport-level failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("Failed to decode auth response: {0}")]
    Decode(String),
}

impl AuthServiceError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }
}
