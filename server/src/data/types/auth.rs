use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identity of a signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Session issued by the auth service on sign-in
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Token lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<i64>,
    pub user: AuthUser,
}

/// Result of a sign-up request
#[derive(Debug, Clone)]
pub enum SignUpOutcome {
    /// Account created; a confirmation email is pending
    ConfirmationSent { user: Option<AuthUser> },
    /// Account created and confirmed immediately
    SignedIn(AuthSession),
}
