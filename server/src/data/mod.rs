//! Data access layer
//!
//! - `supabase` - hosted backend (PostgREST tables + GoTrue auth) over HTTP
//! - `memory` - in-process tables for local runs and tests
//! - `types` - row types shared by both backends
//! - `traits` - `CatalogRepository` and `AuthProvider`
//! - `error` - data and auth error types

pub mod error;
pub mod memory;
pub mod supabase;
pub mod traits;
pub mod types;

pub use error::{AuthServiceError, DataError};
pub use memory::MemoryService;
pub use supabase::SupabaseService;
pub use traits::{AuthProvider, CatalogRepository};

use std::sync::Arc;

use crate::core::config::{AppConfig, BackendKind};

/// Backend service enum
///
/// Wraps the configured backend. Both variants implement the table and auth
/// traits; callers go through `repository()` and `auth()`.
#[derive(Clone)]
pub enum BackendService {
    /// Hosted Supabase project
    Supabase(Arc<SupabaseService>),
    /// In-process tables
    Memory(Arc<MemoryService>),
}

impl BackendService {
    /// Initialize the backend selected in configuration
    pub fn init(config: &AppConfig) -> Result<Self, DataError> {
        match config.backend {
            BackendKind::Supabase => {
                let service = SupabaseService::new(&config.supabase)?;
                Ok(Self::Supabase(Arc::new(service)))
            }
            BackendKind::Memory => Ok(Self::Memory(Arc::new(MemoryService::new(&config.memory)))),
        }
    }

    /// Get the backend type
    pub fn kind(&self) -> BackendKind {
        match self {
            Self::Supabase(_) => BackendKind::Supabase,
            Self::Memory(_) => BackendKind::Memory,
        }
    }

    /// Table operations
    pub fn repository(&self) -> &dyn CatalogRepository {
        match self {
            Self::Supabase(s) => s.as_ref(),
            Self::Memory(m) => m.as_ref(),
        }
    }

    /// Auth operations
    pub fn auth(&self) -> &dyn AuthProvider {
        match self {
            Self::Supabase(s) => s.as_ref(),
            Self::Memory(m) => m.as_ref(),
        }
    }
}

impl From<Arc<MemoryService>> for BackendService {
    fn from(service: Arc<MemoryService>) -> Self {
        Self::Memory(service)
    }
}
