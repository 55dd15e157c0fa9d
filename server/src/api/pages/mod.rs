//! Server-rendered HTML pages
//!
//! Pages are plain strings assembled from the screen types in `domain`.
//! Interactive actions (save, review, list edits, sign-in) are form posts
//! handled by `/static/app.js` against the JSON API.

mod home;
mod lists;
mod repo;

use axum::Router;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;

use super::routes::ApiState;
use crate::core::constants::APP_NAME;
use crate::domain::Session;
use crate::utils::string::escape_html;

pub fn routes(state: ApiState) -> Router {
    Router::new()
        .route("/", get(home::home))
        .route("/fragments/repos", get(home::repo_grid_fragment))
        .route("/repo/{id}", get(repo::repo_page))
        .route("/my-lists", get(lists::my_lists))
        .with_state(state)
}

/// Full HTML document with the navigation bar
fn layout(title: &str, session: Option<&Session>, query: &str, body: &str) -> String {
    let account = match session {
        Some(s) => format!(
            r#"<span class="nav-user">{}</span>"#,
            escape_html(s.user.email.as_deref().unwrap_or(&s.user.id))
        ),
        None => String::new(),
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title} | {app}</title>
<link rel="stylesheet" href="/static/app.css">
<script src="/static/app.js" defer></script>
</head>
<body>
<nav class="navbar">
  <a class="brand" href="/">{app}</a>
  <form class="nav-search" action="/" method="get" role="search">
    <input type="search" name="q" value="{query}" placeholder="Search templates..." data-live-search autocomplete="off">
    <button type="submit">Search</button>
  </form>
  <div class="nav-links">
    <a href="/">Home</a>
    <a href="/my-lists">My Lists</a>
    {account}
  </div>
</nav>
<p id="flash" class="flash" hidden></p>
<div class="container">
{body}
</div>
</body>
</html>"#,
        title = escape_html(title),
        app = APP_NAME,
        query = escape_html(query),
        account = account,
        body = body,
    )
}

/// Full-page error panel with a refresh button
fn error_page(status: StatusCode, session: Option<&Session>, message: &str) -> Response {
    let body = format!(
        r#"<section class="panel error-panel">
  <h2>Error</h2>
  <p>{}</p>
  <button type="button" data-action="reload">Refresh Page</button>
</section>"#,
        escape_html(message)
    );
    (status, Html(layout("Error", session, "", &body))).into_response()
}

#[cfg(test)]
#[path = "pages_tests.rs"]
mod tests;
