//! API route handlers

pub mod auth;
pub mod health;
pub mod lists;
pub mod repos;
pub mod reviews;

use std::sync::Arc;

use crate::api::auth::SessionManager;
use crate::data::BackendService;

/// State shared by the JSON and page handlers
#[derive(Clone)]
pub struct ApiState {
    pub backend: BackendService,
    pub sessions: Arc<SessionManager>,
}
