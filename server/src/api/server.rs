//! API server initialization

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use super::auth::{SessionManager, SessionState, resolve_session};
use super::embedded;
use super::middleware::{self, AllowedOrigins};
use super::openapi::{openapi_json, swagger_ui_html};
use super::pages;
use super::routes::{ApiState, auth, health, lists, repos, reviews};
use crate::core::CoreApp;
use crate::core::constants::{AUTH_BODY_LIMIT, DEFAULT_BODY_LIMIT};

pub struct ApiServer {
    app: CoreApp,
    allowed_origins: AllowedOrigins,
}

impl ApiServer {
    pub fn new(app: CoreApp) -> Self {
        let allowed_origins = AllowedOrigins::new(&app.config.server.host, app.config.server.port);
        Self {
            app,
            allowed_origins,
        }
    }

    /// Serve until shutdown is signalled, then drain in-flight requests.
    /// Returns CoreApp for the caller's own cleanup.
    pub async fn start(self) -> Result<CoreApp> {
        let Self {
            app,
            allowed_origins,
        } = self;

        let shutdown = app.shutdown.clone();
        let addr = SocketAddr::new(app.config.server.host.parse()?, app.config.server.port);

        let state = ApiState {
            backend: app.backend.clone(),
            sessions: Arc::new(SessionManager::from_config(&app.config)),
        };
        let router = build_router(state, allowed_origins);

        let listener = TcpListener::bind(addr).await?;
        tracing::debug!(%addr, "HTTP server listening");

        let server = axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown.wait())
        .into_future();
        tokio::pin!(server);

        tokio::select! {
            result = &mut server => result?,
            _ = shutdown.wait() => {
                match tokio::time::timeout(shutdown.drain_timeout(), &mut server).await {
                    Ok(result) => result?,
                    Err(_) => tracing::warn!(
                        timeout_secs = shutdown.drain_timeout().as_secs(),
                        "Shutdown drain timed out, dropping open connections"
                    ),
                }
            }
        }

        tracing::debug!("HTTP server stopped");
        Ok(app)
    }
}

/// Full application router: JSON API, HTML pages and static assets. Session
/// resolution runs on the API and page routes only.
pub fn build_router(state: ApiState, allowed_origins: AllowedOrigins) -> Router {
    let session_state = SessionState {
        sessions: state.sessions.clone(),
        backend: state.backend.clone(),
        allowed_origins: allowed_origins.clone(),
    };

    let auth_routes = auth::routes(state.clone()).layer(DefaultBodyLimit::max(AUTH_BODY_LIMIT));

    let api_routes = Router::new()
        .merge(repos::routes(state.clone()))
        .merge(reviews::routes(state.clone()))
        .merge(lists::routes(state.clone()));

    let session_routes = Router::new()
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1", api_routes)
        .merge(pages::routes(state.clone()))
        .route_layer(axum::middleware::from_fn_with_state(
            session_state,
            resolve_session,
        ));

    Router::new()
        .route("/api/v1/health", get(health::health).with_state(state))
        .route("/api/openapi.json", get(openapi_json))
        .route("/api/docs", get(swagger_ui_html))
        .route("/api/docs/", get(swagger_ui_html))
        .route("/static/{*path}", get(embedded::serve_static))
        .merge(session_routes)
        .fallback(middleware::handle_404)
        .layer(CompressionLayer::new())
        .layer(middleware::cors(&allowed_origins))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(DEFAULT_BODY_LIMIT))
}
