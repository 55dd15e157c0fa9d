//! Session flows against the auth collaborator
//!
//! Failures are logged here and mapped to the messages shown on the sign-in
//! form. Rejections keep the service's reason; transport failures collapse
//! to a generic message.

use crate::data::BackendService;
use crate::data::error::AuthServiceError;
use crate::data::types::{AuthSession, AuthUser, SignUpOutcome};

use super::error::ViewError;
use super::messages::{
    EMAIL_NOT_CONFIRMED, EMAIL_NOT_CONFIRMED_MARKER, RESEND_SUCCESS, SIGN_UP_SUCCESS,
    UNEXPECTED_ERROR,
};

/// A signed-in caller: the user and the access token sent with table calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: AuthUser,
    pub access_token: String,
}

impl Session {
    pub fn token(&self) -> Option<&str> {
        Some(self.access_token.as_str())
    }
}

impl From<&AuthSession> for Session {
    fn from(session: &AuthSession) -> Self {
        Self {
            user: session.user.clone(),
            access_token: session.access_token.clone(),
        }
    }
}

/// Token for table calls: the user's when signed in, none (anon) otherwise
pub(crate) fn token_of(session: Option<&Session>) -> Option<&str> {
    session.and_then(Session::token)
}

/// Map a sign-in failure to its user-visible message
pub fn sign_in_error(err: &AuthServiceError) -> ViewError {
    match err {
        AuthServiceError::Rejected { message, .. }
            if message.contains(EMAIL_NOT_CONFIRMED_MARKER) =>
        {
            ViewError::unauthenticated(EMAIL_NOT_CONFIRMED)
        }
        AuthServiceError::Rejected { message, .. } => {
            ViewError::unauthenticated(format!("Failed to sign in: {}", message))
        }
        _ => ViewError::failed(UNEXPECTED_ERROR),
    }
}

/// Outcome of a successful sign-up: the message to show and, on
/// auto-confirming backends, a session to store
#[derive(Debug)]
pub struct SignUpResult {
    pub message: &'static str,
    pub session: Option<AuthSession>,
}

pub async fn sign_in(
    backend: &BackendService,
    email: &str,
    password: &str,
) -> Result<AuthSession, ViewError> {
    backend
        .auth()
        .sign_in_with_password(email, password)
        .await
        .inspect(|s| tracing::debug!(user_id = %s.user.id, "User signed in"))
        .map_err(|e| {
            tracing::warn!(error = %e, "Sign in failed");
            sign_in_error(&e)
        })
}

pub async fn sign_up(
    backend: &BackendService,
    email: &str,
    password: &str,
) -> Result<SignUpResult, ViewError> {
    match backend.auth().sign_up(email, password).await {
        Ok(SignUpOutcome::ConfirmationSent { user }) => {
            tracing::debug!(user_id = ?user.map(|u| u.id), "Sign up pending confirmation");
            Ok(SignUpResult {
                message: SIGN_UP_SUCCESS,
                session: None,
            })
        }
        Ok(SignUpOutcome::SignedIn(session)) => {
            tracing::debug!(user_id = %session.user.id, "Sign up confirmed immediately");
            Ok(SignUpResult {
                message: SIGN_UP_SUCCESS,
                session: Some(session),
            })
        }
        Err(AuthServiceError::Rejected { message, .. }) => {
            tracing::warn!(reason = %message, "Sign up rejected");
            Err(ViewError::invalid(format!("Failed to sign up: {}", message)))
        }
        Err(e) => {
            tracing::error!(error = %e, "Sign up failed");
            Err(ViewError::failed(UNEXPECTED_ERROR))
        }
    }
}

/// Revoke the remote session. Failures are logged only; the caller clears
/// its cookie either way.
pub async fn sign_out(backend: &BackendService, session: &Session) {
    if let Err(e) = backend.auth().sign_out(&session.access_token).await {
        tracing::warn!(error = %e, "Remote sign out failed");
    }
}

pub async fn resend_confirmation(
    backend: &BackendService,
    email: &str,
) -> Result<&'static str, ViewError> {
    match backend.auth().resend_confirmation(email).await {
        Ok(()) => Ok(RESEND_SUCCESS),
        Err(AuthServiceError::Rejected { message, .. }) => {
            tracing::warn!(reason = %message, "Resend confirmation rejected");
            Err(ViewError::invalid(format!(
                "Failed to resend confirmation email: {}",
                message
            )))
        }
        Err(e) => {
            tracing::error!(error = %e, "Resend confirmation failed");
            Err(ViewError::failed(UNEXPECTED_ERROR))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::MemoryConfig;
    use crate::data::MemoryService;
    use crate::domain::error::ViewErrorKind;
    use std::sync::Arc;

    fn memory_backend(auto_confirm: bool) -> (Arc<MemoryService>, BackendService) {
        let memory = Arc::new(MemoryService::new(&MemoryConfig {
            seed: false,
            auto_confirm,
        }));
        (memory.clone(), BackendService::from(memory))
    }

    #[test]
    fn test_sign_in_error_email_not_confirmed() {
        let err = sign_in_error(&AuthServiceError::rejected(400, "Email not confirmed"));
        assert_eq!(err.message, EMAIL_NOT_CONFIRMED);
        assert_eq!(err.kind, ViewErrorKind::Unauthenticated);
    }

    #[test]
    fn test_sign_in_error_other_rejection() {
        let err = sign_in_error(&AuthServiceError::rejected(400, "Invalid login credentials"));
        assert_eq!(err.message, "Failed to sign in: Invalid login credentials");
    }

    #[test]
    fn test_sign_in_error_decode_is_generic() {
        let err = sign_in_error(&AuthServiceError::Decode("bad json".into()));
        assert_eq!(err.message, UNEXPECTED_ERROR);
        assert_eq!(err.kind, ViewErrorKind::Failed);
    }

    #[tokio::test]
    async fn test_sign_up_then_sign_in_requires_confirmation() {
        let (memory, backend) = memory_backend(false);

        let result = sign_up(&backend, "dev@example.com", "secret1").await.unwrap();
        assert_eq!(result.message, SIGN_UP_SUCCESS);
        assert!(result.session.is_none());

        let err = sign_in(&backend, "dev@example.com", "secret1").await.unwrap_err();
        assert_eq!(err.message, EMAIL_NOT_CONFIRMED);

        memory.confirm_email("dev@example.com");
        let session = sign_in(&backend, "dev@example.com", "secret1").await.unwrap();
        assert_eq!(session.user.email.as_deref(), Some("dev@example.com"));
    }

    #[tokio::test]
    async fn test_sign_up_rejection_message() {
        let (_, backend) = memory_backend(true);
        sign_up(&backend, "a@b.co", "secret1").await.unwrap();
        let err = sign_up(&backend, "a@b.co", "secret1").await.unwrap_err();
        assert_eq!(err.message, "Failed to sign up: User already registered");
    }

    #[tokio::test]
    async fn test_resend_confirmation_messages() {
        let (_, backend) = memory_backend(false);
        sign_up(&backend, "a@b.co", "secret1").await.unwrap();
        assert_eq!(
            resend_confirmation(&backend, "a@b.co").await.unwrap(),
            RESEND_SUCCESS
        );

        let (_, confirmed) = memory_backend(true);
        sign_up(&confirmed, "a@b.co", "secret1").await.unwrap();
        let err = resend_confirmation(&confirmed, "a@b.co").await.unwrap_err();
        assert!(err.message.starts_with("Failed to resend confirmation email:"));
    }

    #[tokio::test]
    async fn test_sign_out_revokes_token() {
        let (_, backend) = memory_backend(true);
        let result = sign_up(&backend, "a@b.co", "secret1").await.unwrap();
        let session = Session::from(&result.session.unwrap());

        sign_out(&backend, &session).await;
        let user = backend.auth().get_user(&session.access_token).await.unwrap();
        assert!(user.is_none());
    }
}
