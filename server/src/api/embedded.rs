//! Static assets embedded in the binary from `server/web`

use axum::body::Body;
use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "web"]
pub struct Assets;

// Asset names are not content-hashed, so clients revalidate with the ETag
const CACHE_REVALIDATE: &str = "public, max-age=0, must-revalidate";

pub async fn serve_static(Path(path): Path<String>, headers: HeaderMap) -> Response {
    let path = path.trim_start_matches('/');
    let Some(file) = Assets::get(path) else {
        tracing::debug!(path, "Static asset not found");
        return (StatusCode::NOT_FOUND, "404 Not Found").into_response();
    };

    let etag = format!("\"{}\"", hex::encode(file.metadata.sha256_hash()));
    let matches_etag = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == etag);
    if matches_etag {
        return (
            StatusCode::NOT_MODIFIED,
            [(header::ETAG, etag.as_str())],
        )
            .into_response();
    }

    let mime = mime_guess::from_path(path).first_or_octet_stream();
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, mime.as_ref()),
            (header::CACHE_CONTROL, CACHE_REVALIDATE),
            (header::ETAG, etag.as_str()),
        ],
        Body::from(file.data.into_owned()),
    )
        .into_response()
}
