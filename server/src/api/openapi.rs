//! OpenAPI specification and Swagger UI

use axum::http::header;
use axum::response::{Html, IntoResponse, Json};
use utoipa::OpenApi;

use crate::api::routes::{auth, health, lists, repos, reviews};
use crate::api::types::MessageResponse;
use crate::data::types::{ListRow, RepoKind, RepoRow, ReviewRow};
use crate::domain::leaderboard::LeaderboardEntry;
use crate::domain::rating::StarRow;
use crate::domain::{ListingScreen, ReviewDraft, ReviewPanel, SavedRepo};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ReplRepo API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Starter template catalog"
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "auth", description = "Sign-in and account endpoints"),
        (name = "repos", description = "Catalog listing, detail and saving"),
        (name = "reviews", description = "Repo reviews"),
        (name = "lists", description = "Personal lists of saved repos")
    ),
    paths(
        health::health,
        auth::sign_in,
        auth::sign_up,
        auth::sign_out,
        auth::resend_confirmation,
        auth::auth_status,
        repos::list_repos,
        repos::get_repo,
        repos::save_repo,
        repos::leaderboard,
        reviews::list_reviews,
        reviews::submit_review,
        lists::get_lists,
        lists::create_list,
        lists::move_saved_repo,
        lists::remove_saved_repo,
    ),
    components(schemas(
        MessageResponse,
        health::HealthResponse,
        auth::CredentialsRequest,
        auth::EmailRequest,
        auth::UserDto,
        auth::AuthResponse,
        auth::AuthStatusResponse,
        RepoKind,
        RepoRow,
        ListingScreen,
        StarRow,
        LeaderboardEntry,
        repos::RepoDetailResponse,
        ReviewRow,
        ReviewDraft,
        ReviewPanel,
        reviews::SubmitReviewResponse,
        ListRow,
        SavedRepo,
        lists::CreateListRequest,
        lists::MoveRequest,
        lists::ListsResponse,
        lists::MoveResponse,
    ))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        Json(ApiDoc::openapi()),
    )
}

/// Swagger UI loaded from CDN
pub async fn swagger_ui_html() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

const SWAGGER_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>ReplRepo API Documentation</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = () => {
            window.ui = SwaggerUIBundle({
                url: "/api/openapi.json",
                dom_id: '#swagger-ui',
                deepLinking: true
            });
        };
    </script>
</body>
</html>"#;
