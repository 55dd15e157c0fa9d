//! HTTP middleware (CORS, origin checks, 404 handler)

use axum::extract::Request;
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::core::config::is_all_interfaces;

/// Origins allowed to make credentialed requests
#[derive(Debug, Clone)]
pub struct AllowedOrigins {
    origins: Vec<String>,
}

impl AllowedOrigins {
    pub fn new(host: &str, port: u16) -> Self {
        let is_all = is_all_interfaces(host);
        let base_hosts: Vec<&str> = if is_all || host == "127.0.0.1" || host == "localhost" {
            vec!["localhost", "127.0.0.1"]
        } else {
            vec![host]
        };

        let mut origins = Vec::new();
        for h in &base_hosts {
            origins.push(format!("http://{}:{}", h, port));
            origins.push(format!("https://{}:{}", h, port));
            origins.push(format!("http://{}", h));
            origins.push(format!("https://{}", h));
        }

        // LAN addresses are reachable when binding to all interfaces
        if is_all && let Ok(interfaces) = local_ip_address::list_afinet_netifas() {
            for (_, ip) in interfaces
                .iter()
                .filter(|(_, ip)| ip.is_ipv4() && !ip.is_loopback())
            {
                origins.push(format!("http://{}:{}", ip, port));
            }
        }

        Self { origins }
    }

    pub fn is_allowed(&self, origin: &str) -> bool {
        self.origins.iter().any(|o| o == origin)
    }

    fn as_header_values(&self) -> Vec<HeaderValue> {
        self.origins.iter().filter_map(|o| o.parse().ok()).collect()
    }

    /// Origin of a request from `Origin`, falling back to the `Referer` URL
    pub fn request_origin(headers: &HeaderMap) -> Option<String> {
        if let Some(origin) = headers.get(header::ORIGIN).and_then(|v| v.to_str().ok()) {
            return Some(origin.to_string());
        }
        let referer = headers.get(header::REFERER)?.to_str().ok()?;
        let url = match reqwest::Url::parse(referer) {
            Ok(url) => url,
            Err(_) => {
                tracing::debug!(referer = %referer, "Failed to parse Referer URL");
                return None;
            }
        };
        let host = url.host_str()?;
        Some(match url.port() {
            Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
            None => format!("{}://{}", url.scheme(), host),
        })
    }
}

pub fn cors(allowed: &AllowedOrigins) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed.as_header_values()))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
            header::CACHE_CONTROL,
        ])
        .allow_credentials(true)
}

/// JSON 404 for `/api` paths, plain text elsewhere
pub async fn handle_404(req: Request) -> Response {
    tracing::debug!(method = %req.method(), uri = %req.uri(), "[404] No route");
    if req.uri().path().starts_with("/api/") {
        return (
            StatusCode::NOT_FOUND,
            axum::Json(serde_json::json!({
                "error": "not_found",
                "code": "ROUTE_NOT_FOUND",
                "message": format!("No route for {}", req.uri().path())
            })),
        )
            .into_response();
    }
    (StatusCode::NOT_FOUND, "404 Not Found").into_response()
}
