//! Session manager: cookie settings, access-token resolution and refresh

use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};

use super::jwt::validate_access_token;
use crate::core::config::AppConfig;
use crate::core::constants::{
    DEFAULT_SESSION_TTL_SECS, REFRESH_COOKIE_NAME, REFRESH_COOKIE_TTL_SECS, SESSION_COOKIE_NAME,
};
use crate::data::BackendService;
use crate::data::types::AuthSession;
use crate::domain::Session;

#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    /// Set when tokens can be verified locally instead of asking the auth service
    jwt_secret: Option<Vec<u8>>,
    secure_cookies: bool,
}

impl SessionManager {
    pub fn new(jwt_secret: Option<&str>, secure_cookies: bool) -> Self {
        let jwt_secret = jwt_secret
            .filter(|s| !s.is_empty())
            .map(|s| s.as_bytes().to_vec());
        if jwt_secret.is_some() {
            tracing::debug!("Access tokens verified locally");
        } else {
            tracing::debug!("Access tokens verified by the auth service");
        }
        Self {
            jwt_secret,
            secure_cookies,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.supabase.jwt_secret.as_deref(),
            config.auth.secure_cookies,
        )
    }

    /// Resolve an access token to a session. Invalid, expired or revoked
    /// tokens resolve to `None`.
    pub async fn resolve(&self, backend: &BackendService, token: &str) -> Option<Session> {
        if let Some(secret) = &self.jwt_secret {
            return match validate_access_token(token, secret) {
                Ok(claims) => Some(Session {
                    user: claims.user(),
                    access_token: token.to_string(),
                }),
                Err(e) => {
                    tracing::debug!(error = %e, "Rejected session token");
                    None
                }
            };
        }

        match backend.auth().get_user(token).await {
            Ok(user) => user.map(|user| Session {
                user,
                access_token: token.to_string(),
            }),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to resolve session");
                None
            }
        }
    }

    /// Trade a refresh token for a new session. A rejected or spent token
    /// resolves to `None`.
    pub async fn refresh(
        &self,
        backend: &BackendService,
        refresh_token: &str,
    ) -> Option<AuthSession> {
        match backend.auth().refresh_session(refresh_token).await {
            Ok(auth) => {
                tracing::debug!(user_id = %auth.user.id, "Session refreshed");
                Some(auth)
            }
            Err(e) => {
                tracing::debug!(error = %e, "Session refresh failed");
                None
            }
        }
    }

    fn cookie(&self, name: &'static str, value: String, max_age_secs: i64) -> Cookie<'static> {
        Cookie::build((name, value))
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure_cookies)
            .path("/")
            .max_age(time::Duration::seconds(max_age_secs))
            .build()
    }

    /// Cookie holding the access token for `max_age_secs`
    pub fn session_cookie(&self, token: String, max_age_secs: Option<i64>) -> Cookie<'static> {
        self.cookie(
            SESSION_COOKIE_NAME,
            token,
            max_age_secs.unwrap_or(DEFAULT_SESSION_TTL_SECS),
        )
    }

    pub fn refresh_cookie(&self, token: String) -> Cookie<'static> {
        self.cookie(REFRESH_COOKIE_NAME, token, REFRESH_COOKIE_TTL_SECS)
    }

    /// Store a freshly issued session: the access token, plus the refresh
    /// token when the auth service handed one out
    pub fn store(&self, jar: CookieJar, auth: AuthSession) -> CookieJar {
        let jar = jar.add(self.session_cookie(auth.access_token, auth.expires_in));
        match auth.refresh_token {
            Some(refresh) => jar.add(self.refresh_cookie(refresh)),
            None => jar,
        }
    }

    /// Expire both session cookies
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        jar.remove(self.cookie(SESSION_COOKIE_NAME, String::new(), 0))
            .remove(self.cookie(REFRESH_COOKIE_NAME, String::new(), 0))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::auth::jwt::tests::sign;
    use crate::data::MemoryService;
    use crate::data::types::SignUpOutcome;

    fn backend() -> BackendService {
        BackendService::from(Arc::new(MemoryService::empty()))
    }

    #[tokio::test]
    async fn test_resolve_locally_with_secret() {
        let manager = SessionManager::new(Some("secret"), false);
        let token = sign(b"secret", "user-9", 600);
        let session = manager.resolve(&backend(), &token).await.unwrap();
        assert_eq!(session.user.id, "user-9");
        assert_eq!(session.access_token, token);

        let expired = sign(b"secret", "user-9", -600);
        assert!(manager.resolve(&backend(), &expired).await.is_none());
    }

    #[tokio::test]
    async fn test_resolve_remotely_without_secret() {
        let manager = SessionManager::new(None, false);
        let backend = backend();
        let SignUpOutcome::SignedIn(auth) = backend
            .auth()
            .sign_up("a@b.co", "secret1")
            .await
            .unwrap()
        else {
            panic!("memory backend auto-confirms");
        };

        let session = manager.resolve(&backend, &auth.access_token).await.unwrap();
        assert_eq!(session.user.id, auth.user.id);
        assert!(manager.resolve(&backend, "unknown").await.is_none());
    }

    #[tokio::test]
    async fn test_refresh_issues_new_session() {
        let manager = SessionManager::new(None, false);
        let backend = backend();
        let SignUpOutcome::SignedIn(auth) = backend
            .auth()
            .sign_up("a@b.co", "secret1")
            .await
            .unwrap()
        else {
            panic!("memory backend auto-confirms");
        };
        let refresh = auth.refresh_token.unwrap();

        let renewed = manager.refresh(&backend, &refresh).await.unwrap();
        assert_eq!(renewed.user.id, auth.user.id);
        assert_ne!(renewed.access_token, auth.access_token);
        assert!(manager.refresh(&backend, &refresh).await.is_none());
    }

    #[test]
    fn test_store_sets_both_cookies() {
        let manager = SessionManager::new(None, false);
        let jar = manager.store(
            CookieJar::new(),
            AuthSession {
                access_token: "access".into(),
                refresh_token: Some("refresh".into()),
                expires_in: Some(600),
                user: crate::data::types::AuthUser {
                    id: "u1".into(),
                    email: None,
                },
            },
        );
        let access = jar.get(SESSION_COOKIE_NAME).unwrap();
        assert_eq!(access.value(), "access");
        assert_eq!(access.max_age(), Some(time::Duration::seconds(600)));
        let refresh = jar.get(REFRESH_COOKIE_NAME).unwrap();
        assert_eq!(refresh.value(), "refresh");
        assert_eq!(refresh.http_only(), Some(true));

        let cleared = manager.clear(jar);
        assert!(cleared.get(SESSION_COOKIE_NAME).is_none());
        assert!(cleared.get(REFRESH_COOKIE_NAME).is_none());
    }

    #[test]
    fn test_empty_secret_means_remote() {
        let manager = SessionManager::new(Some(""), true);
        assert!(manager.jwt_secret.is_none());
        let cookie = manager.session_cookie("t".into(), Some(120));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(120)));
        assert_eq!(cookie.path(), Some("/"));
    }
}
