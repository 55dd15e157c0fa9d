//! Session handling for the web surface

mod extractors;
pub mod jwt;
mod manager;
pub mod middleware;

pub use extractors::CurrentSession;
pub use manager::SessionManager;
pub use middleware::{AuthError, SessionState, resolve_session};
