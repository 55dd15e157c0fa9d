//! Router harness for handler tests

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use super::auth::SessionManager;
use super::build_router;
use super::middleware::AllowedOrigins;
use super::routes::ApiState;
use crate::core::config::MemoryConfig;
use crate::core::constants::{REFRESH_COOKIE_NAME, SESSION_COOKIE_NAME};
use crate::data::{BackendService, MemoryService};

pub(crate) struct TestApp {
    pub router: Router,
    pub memory: Arc<MemoryService>,
}

pub(crate) struct TestResponse {
    pub status: StatusCode,
    /// Set-Cookie header for the session cookie
    pub set_cookie: Option<String>,
    pub set_cookies: Vec<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }

    /// `name=value` pair of the session cookie
    pub fn cookie(&self) -> String {
        let header = self.set_cookie.as_deref().unwrap();
        header.split(';').next().unwrap().to_string()
    }

    /// Set-Cookie header for the cookie called `name`
    pub fn set_cookie_named(&self, name: &str) -> Option<&str> {
        let prefix = format!("{name}=");
        self.set_cookies
            .iter()
            .find(|c| c.starts_with(&prefix))
            .map(String::as_str)
    }

    /// `name=value` pair of the refresh cookie
    pub fn refresh_cookie(&self) -> String {
        let header = self.set_cookie_named(REFRESH_COOKIE_NAME).unwrap();
        header.split(';').next().unwrap().to_string()
    }
}

impl TestApp {
    /// Seeded catalog, sign-ups confirmed immediately
    pub fn new() -> Self {
        Self::with_config(true)
    }

    /// Seeded catalog with email confirmation required
    pub fn pending_confirmation() -> Self {
        Self::with_config(false)
    }

    fn with_config(auto_confirm: bool) -> Self {
        let memory = Arc::new(MemoryService::new(&MemoryConfig {
            seed: true,
            auto_confirm,
        }));
        let state = ApiState {
            backend: BackendService::from(memory.clone()),
            sessions: Arc::new(SessionManager::default()),
        };
        let router = build_router(state, AllowedOrigins::new("127.0.0.1", 5390));
        Self { router, memory }
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let header_str = |name| {
            response
                .headers()
                .get(name)
                .map(|v| v.to_str().unwrap().to_string())
        };
        let set_cookies: Vec<String> = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect();
        let set_cookie = set_cookies
            .iter()
            .find(|c| c.starts_with(&format!("{SESSION_COOKIE_NAME}=")))
            .cloned();
        let content_type = header_str(header::CONTENT_TYPE);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        TestResponse {
            status,
            set_cookie,
            set_cookies,
            content_type,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.send(Method::GET, uri, None, cookie).await
    }

    pub async fn post(&self, uri: &str, body: Value, cookie: Option<&str>) -> TestResponse {
        self.send(Method::POST, uri, Some(body), cookie).await
    }

    /// Create an account and return its session cookie
    pub async fn sign_up(&self, email: &str) -> String {
        let response = self
            .post(
                "/api/v1/auth/sign-up",
                serde_json::json!({ "email": email, "password": "secret1" }),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        response.cookie()
    }
}
