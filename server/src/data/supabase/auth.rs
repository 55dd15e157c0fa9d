use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

use super::SupabaseService;
use crate::data::error::AuthServiceError;
use crate::data::traits::AuthProvider;
use crate::data::types::{AuthSession, AuthUser, SignUpOutcome};

/// GoTrue error bodies vary by version; the first populated field is the reason
#[derive(Debug, Default, Deserialize)]
struct GoTrueErrorBody {
    msg: Option<String>,
    error_description: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

impl GoTrueErrorBody {
    fn into_message(self) -> Option<String> {
        self.msg
            .or(self.error_description)
            .or(self.message)
            .or(self.error)
    }
}

impl SupabaseService {
    /// Turn a non-success GoTrue response into `Rejected`, passing success through
    async fn check_auth_response(
        resp: reqwest::Response,
    ) -> Result<reqwest::Response, AuthServiceError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let bytes = resp.bytes().await?;
        let message = serde_json::from_slice::<GoTrueErrorBody>(&bytes)
            .ok()
            .and_then(GoTrueErrorBody::into_message)
            .unwrap_or_else(|| format!("auth service returned {}", status));
        Err(AuthServiceError::rejected(status.as_u16(), message))
    }
}

#[async_trait]
impl AuthProvider for SupabaseService {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthServiceError> {
        let resp = self
            .client
            .post(self.auth_url("token?grant_type=password"))
            .bearer_auth(&self.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let resp = Self::check_auth_response(resp).await?;
        resp.json::<AuthSession>()
            .await
            .map_err(|e| AuthServiceError::Decode(e.to_string()))
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<AuthSession, AuthServiceError> {
        let resp = self
            .client
            .post(self.auth_url("token?grant_type=refresh_token"))
            .bearer_auth(&self.anon_key)
            .json(&json!({ "refresh_token": refresh_token }))
            .send()
            .await?;
        let resp = Self::check_auth_response(resp).await?;
        resp.json::<AuthSession>()
            .await
            .map_err(|e| AuthServiceError::Decode(e.to_string()))
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SignUpOutcome, AuthServiceError> {
        let resp = self
            .client
            .post(self.auth_url("signup"))
            .bearer_auth(&self.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let resp = Self::check_auth_response(resp).await?;
        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| AuthServiceError::Decode(e.to_string()))?;

        // Autoconfirm projects answer with a full session, others with the bare user
        if body.get("access_token").is_some() {
            let session = serde_json::from_value::<AuthSession>(body)
                .map_err(|e| AuthServiceError::Decode(e.to_string()))?;
            return Ok(SignUpOutcome::SignedIn(session));
        }
        let user = serde_json::from_value::<AuthUser>(body).ok();
        Ok(SignUpOutcome::ConfirmationSent { user })
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthServiceError> {
        let resp = self
            .client
            .post(self.auth_url("logout"))
            .bearer_auth(access_token)
            .send()
            .await?;
        Self::check_auth_response(resp).await?;
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> Result<Option<AuthUser>, AuthServiceError> {
        let resp = self
            .client
            .get(self.auth_url("user"))
            .bearer_auth(access_token)
            .send()
            .await?;
        if matches!(
            resp.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Ok(None);
        }
        let resp = Self::check_auth_response(resp).await?;
        let user = resp
            .json::<AuthUser>()
            .await
            .map_err(|e| AuthServiceError::Decode(e.to_string()))?;
        Ok(Some(user))
    }

    async fn resend_confirmation(&self, email: &str) -> Result<(), AuthServiceError> {
        let resp = self
            .client
            .post(self.auth_url("resend"))
            .bearer_auth(&self.anon_key)
            .json(&json!({ "type": "signup", "email": email }))
            .send()
            .await?;
        Self::check_auth_response(resp).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::supabase::test_service;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_sign_in_returns_session() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/auth/v1/token")
                    .query_param("grant_type", "password")
                    .json_body(json!({ "email": "a@b.co", "password": "hunter22" }));
                then.status(200).json_body(json!({
                    "access_token": "jwt-token",
                    "token_type": "bearer",
                    "expires_in": 3600,
                    "refresh_token": "refresh",
                    "user": { "id": "user-1", "email": "a@b.co", "aud": "authenticated" }
                }));
            })
            .await;

        let service = test_service(&server.base_url());
        let session = service
            .sign_in_with_password("a@b.co", "hunter22")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(session.access_token, "jwt-token");
        assert_eq!(session.expires_in, Some(3600));
        assert_eq!(session.user.id, "user-1");
    }

    #[tokio::test]
    async fn test_sign_in_rejection_carries_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/auth/v1/token");
                then.status(400).json_body(json!({
                    "code": 400,
                    "error_code": "email_not_confirmed",
                    "msg": "Email not confirmed"
                }));
            })
            .await;

        let service = test_service(&server.base_url());
        let err = service
            .sign_in_with_password("a@b.co", "hunter22")
            .await
            .unwrap_err();

        match err {
            AuthServiceError::Rejected { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Email not confirmed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_sign_in_legacy_error_description() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/auth/v1/token");
                then.status(400).json_body(json!({
                    "error": "invalid_grant",
                    "error_description": "Invalid login credentials"
                }));
            })
            .await;

        let service = test_service(&server.base_url());
        let err = service
            .sign_in_with_password("a@b.co", "wrong")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid login credentials");
    }

    #[tokio::test]
    async fn test_refresh_session_exchanges_token() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/auth/v1/token")
                    .query_param("grant_type", "refresh_token")
                    .header("apikey", "anon-key")
                    .json_body(json!({ "refresh_token": "old-refresh" }));
                then.status(200).json_body(json!({
                    "access_token": "fresh-jwt",
                    "token_type": "bearer",
                    "expires_in": 3600,
                    "refresh_token": "new-refresh",
                    "user": { "id": "user-1", "email": "a@b.co" }
                }));
            })
            .await;

        let service = test_service(&server.base_url());
        let session = service.refresh_session("old-refresh").await.unwrap();

        mock.assert_async().await;
        assert_eq!(session.access_token, "fresh-jwt");
        assert_eq!(session.refresh_token.as_deref(), Some("new-refresh"));
        assert_eq!(session.user.id, "user-1");
    }

    #[tokio::test]
    async fn test_refresh_session_spent_token_rejected() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/auth/v1/token")
                    .query_param("grant_type", "refresh_token");
                then.status(400).json_body(json!({
                    "code": 400,
                    "error_code": "refresh_token_already_used",
                    "msg": "Invalid Refresh Token: Already Used"
                }));
            })
            .await;

        let service = test_service(&server.base_url());
        let err = service.refresh_session("spent").await.unwrap_err();
        assert!(matches!(err, AuthServiceError::Rejected { status: 400, .. }));
        assert_eq!(err.to_string(), "Invalid Refresh Token: Already Used");
    }

    #[tokio::test]
    async fn test_sign_up_pending_confirmation() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/auth/v1/signup");
                then.status(200).json_body(json!({
                    "id": "user-2",
                    "email": "new@b.co",
                    "confirmation_sent_at": "2024-05-01T12:00:00Z"
                }));
            })
            .await;

        let service = test_service(&server.base_url());
        let outcome = service.sign_up("new@b.co", "hunter22").await.unwrap();
        match outcome {
            SignUpOutcome::ConfirmationSent { user } => {
                assert_eq!(user.unwrap().id, "user-2");
            }
            SignUpOutcome::SignedIn(_) => panic!("expected pending confirmation"),
        }
    }

    #[tokio::test]
    async fn test_get_user_invalid_token_is_none() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/auth/v1/user")
                    .header("authorization", "Bearer expired");
                then.status(401).json_body(json!({ "msg": "invalid JWT" }));
            })
            .await;

        let service = test_service(&server.base_url());
        assert!(service.get_user("expired").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_resend_confirmation_payload() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/auth/v1/resend")
                    .json_body(json!({ "type": "signup", "email": "new@b.co" }));
                then.status(200).json_body(json!({}));
            })
            .await;

        let service = test_service(&server.base_url());
        service.resend_confirmation("new@b.co").await.unwrap();
        mock.assert_async().await;
    }
}
