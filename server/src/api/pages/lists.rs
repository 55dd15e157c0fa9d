//! "My Lists" page

use std::fmt::Write;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;

use super::{ApiState, error_page, layout};
use crate::api::auth::CurrentSession;
use crate::domain::messages::{ALL_SAVED_HEADING, LISTS_REQUIRE_LOGIN, UNSORTED_LABEL};
use crate::domain::{ListsScreen, SavedRepo};
use crate::utils::string::escape_html;

#[derive(Debug, Default, Deserialize)]
pub(super) struct ListsPageQuery {
    list: Option<i64>,
}

pub(super) async fn my_lists(
    State(state): State<ApiState>,
    current: CurrentSession,
    Query(query): Query<ListsPageQuery>,
) -> Response {
    let Some(session) = current.session() else {
        let body = format!(
            r#"<section class="panel"><h1>My Lists</h1><p>{LISTS_REQUIRE_LOGIN}</p><a class="button" href="/">Sign in</a></section>"#
        );
        return (
            StatusCode::UNAUTHORIZED,
            Html(layout("My Lists", None, "", &body)),
        )
            .into_response();
    };

    let mut screen = match ListsScreen::load(&state.backend, session).await {
        Ok(screen) => screen,
        Err(e) => return error_page(StatusCode::INTERNAL_SERVER_ERROR, Some(session), &e.message),
    };
    screen.select(query.list);

    let body = format!(
        r#"<div class="lists-layout">
<aside class="panel lists-sidebar">
  <h2>My Lists</h2>
  {sidebar}
  {create_form}
</aside>
<section class="panel saved-repos">
  <h1>{heading}</h1>
  {saved}
</section>
</div>"#,
        sidebar = render_sidebar(&screen),
        create_form = CREATE_LIST_FORM,
        heading = escape_html(screen.heading()),
        saved = render_saved(&screen),
    );
    Html(layout("My Lists", Some(session), "", &body)).into_response()
}

const CREATE_LIST_FORM: &str = r#"<form id="create-list-form" class="create-list">
  <input type="text" name="name" placeholder="New list name" required maxlength="100">
  <input type="text" name="description" placeholder="Description (optional)" maxlength="500">
  <button type="submit">Create List</button>
</form>"#;

fn render_sidebar(screen: &ListsScreen) -> String {
    let mut out = String::from("<ul class=\"list-links\">");
    let _ = write!(
        out,
        r#"<li><a href="/my-lists"{}>{}</a></li>"#,
        active(screen.selected().is_none()),
        ALL_SAVED_HEADING
    );
    for list in screen.lists() {
        let _ = write!(
            out,
            r#"<li><a href="/my-lists?list={id}"{active} title="{description}">{name}</a></li>"#,
            id = list.id,
            active = active(screen.selected() == Some(list.id)),
            description = escape_html(list.description.as_deref().unwrap_or_default()),
            name = escape_html(&list.name),
        );
    }
    out.push_str("</ul>");
    out
}

fn active(is_active: bool) -> &'static str {
    if is_active { r#" class="active""# } else { "" }
}

fn render_move_select(screen: &ListsScreen, repo: &SavedRepo) -> String {
    let mut out = format!(
        r#"<select data-action="move" data-repo-id="{}" data-current="{}" aria-label="Move to list">"#,
        repo.id,
        repo.list_id.unwrap_or(0)
    );
    let _ = write!(
        out,
        r#"<option value="0"{}>{}</option>"#,
        if repo.list_id.is_none() { " selected" } else { "" },
        UNSORTED_LABEL
    );
    for list in screen.lists() {
        let _ = write!(
            out,
            r#"<option value="{}"{}>{}</option>"#,
            list.id,
            if repo.list_id == Some(list.id) { " selected" } else { "" },
            escape_html(&list.name)
        );
    }
    out.push_str("</select>");
    out
}

fn render_saved(screen: &ListsScreen) -> String {
    let items: String = screen
        .visible()
        .map(|repo| {
            format!(
                r#"<li class="saved-repo" data-repo-id="{id}">
  <div>
    <a href="{url}" target="_blank" rel="noopener noreferrer">{name}</a>
    <p class="description">{description}</p>
  </div>
  <div class="saved-actions">
    {select}
    <button type="button" class="danger" data-action="remove" data-repo-id="{id}">Remove</button>
  </div>
</li>"#,
                id = repo.id,
                url = escape_html(&repo.url),
                name = escape_html(&repo.name),
                description = escape_html(&repo.description),
                select = render_move_select(screen, repo),
            )
        })
        .collect();
    if items.is_empty() {
        return r#"<p class="muted">No saved repos yet.</p>"#.to_string();
    }
    format!(r#"<ul class="saved-list">{items}</ul>"#)
}
