//! Listing page, grid fragment and leaderboard

use std::fmt::Write;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;

use super::{ApiState, error_page, layout};
use crate::api::auth::CurrentSession;
use crate::data::types::{RepoKind, RepoRow};
use crate::domain::leaderboard::most_used;
use crate::domain::rating::{StarRow, card_label};
use crate::domain::{CategoryFilter, ListingScreen, Session};
use crate::utils::string::{escape_html, group_thousands};

#[derive(Debug, Default, Deserialize)]
pub(super) struct HomeQuery {
    #[serde(default)]
    q: String,
    #[serde(default, rename = "type")]
    kind: String,
}

impl HomeQuery {
    fn category(&self) -> Result<CategoryFilter, String> {
        self.kind.parse()
    }
}

async fn load_screen(
    state: &ApiState,
    session: Option<&Session>,
    query: &HomeQuery,
) -> Result<ListingScreen, Response> {
    let category = query
        .category()
        .map_err(|e| error_page(StatusCode::BAD_REQUEST, session, &e))?;
    let mut screen = ListingScreen::load(&state.backend, session)
        .await
        .map_err(|e| error_page(StatusCode::INTERNAL_SERVER_ERROR, session, &e.message))?;
    screen.search(&query.q);
    screen.set_category(category);
    Ok(screen)
}

pub(super) async fn home(
    State(state): State<ApiState>,
    current: CurrentSession,
    Query(query): Query<HomeQuery>,
) -> Response {
    let session = current.session();
    let screen = match load_screen(&state, session, &query).await {
        Ok(screen) => screen,
        Err(response) => return response,
    };

    let mut body = String::new();
    body.push_str(&render_welcome(session));
    let _ = write!(
        body,
        r#"<main>
<div class="panel toolbar">
  <h2>Top Projects</h2>
  <label class="type-filter">Type:
    {select}
  </label>
</div>
<div id="repo-grid" class="repo-grid">{grid}</div>
{leaderboard}
</main>"#,
        select = render_category_select(screen.category()),
        grid = render_grid(screen.visible()),
        leaderboard = render_leaderboard(),
    );

    Html(layout("Home", session, screen.query(), &body)).into_response()
}

/// Grid markup only, fetched by the navbar's live search
pub(super) async fn repo_grid_fragment(
    State(state): State<ApiState>,
    current: CurrentSession,
    Query(query): Query<HomeQuery>,
) -> Response {
    let session = current.session();
    let category = match query.category() {
        Ok(category) => category,
        Err(e) => return (StatusCode::BAD_REQUEST, e).into_response(),
    };
    match ListingScreen::load(&state.backend, session).await {
        Ok(mut screen) => {
            screen.search(&query.q);
            screen.set_category(category);
            Html(render_grid(screen.visible())).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(format!(r#"<p class="error">{}</p>"#, escape_html(&e.message))),
        )
            .into_response(),
    }
}

fn render_welcome(session: Option<&Session>) -> String {
    let auth = match session {
        Some(s) => format!(
            r#"<div class="signed-in">
  <p>Signed in as: {}</p>
  <button type="button" class="danger" data-action="sign-out">Sign Out</button>
</div>"#,
            escape_html(s.user.email.as_deref().unwrap_or(&s.user.id))
        ),
        None => r#"<form id="auth-form" class="auth-form">
  <input type="email" name="email" placeholder="Email" required>
  <input type="password" name="password" placeholder="Password" required>
  <button type="submit">Sign In</button>
  <button type="button" class="secondary" data-action="sign-up">Sign Up</button>
  <button type="button" data-action="resend" hidden>Resend Confirmation Email</button>
</form>"#
            .to_string(),
    };
    format!(
        r#"<header class="panel welcome">
  <h1>Welcome to ReplRepo! 👋</h1>
  <p>Find the perfect starting point for your next project.</p>
  {auth}
</header>"#
    )
}

fn render_category_select(selected: CategoryFilter) -> String {
    let mut out = String::from(r#"<select name="type" data-category-filter>"#);
    let options = std::iter::once(CategoryFilter::All)
        .chain(RepoKind::ALL.into_iter().map(CategoryFilter::Kind));
    for option in options {
        let label = match option {
            CategoryFilter::All => "All",
            CategoryFilter::Kind(kind) => kind.as_str(),
        };
        let _ = write!(
            out,
            r#"<option value="{}"{}>{}</option>"#,
            option.as_str(),
            if option == selected { " selected" } else { "" },
            label
        );
    }
    out.push_str("</select>");
    out
}

pub(super) fn render_stars(rating: Option<f64>) -> String {
    match rating {
        Some(r) => format!(
            r#"<span class="stars" title="{label}">{glyphs}</span> <span class="rating-value">{label}</span>"#,
            glyphs = StarRow::from_average(r).glyphs(),
            label = card_label(Some(r)),
        ),
        None => r#"<span class="muted">No rating</span>"#.to_string(),
    }
}

fn render_card(repo: &RepoRow) -> String {
    let tags: String = repo
        .tags
        .iter()
        .flatten()
        .map(|t| format!(r#"<span class="tag">{}</span>"#, escape_html(t)))
        .collect();
    format!(
        r#"<article class="repo-card">
  <a href="/repo/{id}" class="card-link">
    <div class="card-head">
      <img src="{icon}" alt="" class="repo-icon" loading="lazy">
      <h3>{name}</h3>
      <span class="badge badge-{kind_lower}">{kind}</span>
    </div>
    <p class="description">{description}</p>
    <div class="tags">{tags}</div>
  </a>
  <div class="card-foot">
    <span class="upvotes">▲ {upvotes}</span>
    {stars}
    <button type="button" data-action="save" data-repo-id="{id}">Save</button>
  </div>
</article>"#,
        id = repo.id,
        icon = escape_html(&repo.icon),
        name = escape_html(&repo.name),
        kind = repo.kind,
        kind_lower = repo.kind.as_str().to_lowercase(),
        description = escape_html(&repo.description),
        tags = tags,
        upvotes = repo.upvotes,
        stars = render_stars(repo.rating),
    )
}

pub(super) fn render_grid(repos: &[RepoRow]) -> String {
    if repos.is_empty() {
        return r#"<p class="muted empty">No templates match your search.</p>"#.to_string();
    }
    repos.iter().map(render_card).collect()
}

fn render_leaderboard() -> String {
    let rows: String = most_used()
        .iter()
        .map(|e| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                e.rank,
                escape_html(e.name),
                e.kind,
                group_thousands(e.uses)
            )
        })
        .collect();
    format!(
        r#"<section class="leaderboard">
  <h2>Most Used Templates</h2>
  <table class="panel">
    <thead><tr><th>Rank</th><th>Name</th><th>Type</th><th>Uses</th></tr></thead>
    <tbody>{rows}</tbody>
  </table>
</section>"#
    )
}
