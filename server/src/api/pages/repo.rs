//! Repo detail page with its review panel

use std::fmt::Write;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use super::home::render_stars;
use super::{ApiState, error_page, layout};
use crate::api::auth::CurrentSession;
use crate::domain::messages::{NO_REVIEWS, REVIEW_REQUIRES_LOGIN};
use crate::domain::rating::StarRow;
use crate::domain::repo_detail::parse_repo_id;
use crate::domain::{RepoDetail, ReviewPanel, Session, ViewErrorKind};
use crate::utils::string::escape_html;

pub(super) async fn repo_page(
    State(state): State<ApiState>,
    current: CurrentSession,
    Path(raw_id): Path<String>,
) -> Response {
    let session = current.session();
    let id = match parse_repo_id(&raw_id) {
        Ok(id) => id,
        Err(e) => return error_page(StatusCode::BAD_REQUEST, session, &e.message),
    };
    let detail = match RepoDetail::load(&state.backend, session, id).await {
        Ok(detail) => detail,
        Err(e) => {
            let status = match e.kind {
                ViewErrorKind::NotFound => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            return error_page(status, session, &e.message);
        }
    };

    let reviews = match ReviewPanel::load(&state.backend, session, id).await {
        Ok(panel) => render_reviews(&panel),
        Err(e) => format!(r#"<p class="error">{}</p>"#, escape_html(&e.message)),
    };

    let body = format!(
        "{}\n<section class=\"panel reviews\">\n<h2>Reviews</h2>\n{}\n{}\n</section>",
        render_detail(&detail),
        render_review_form(id, session),
        reviews
    );
    Html(layout(&detail.repo.name, session, "", &body)).into_response()
}

fn render_detail(detail: &RepoDetail) -> String {
    let repo = &detail.repo;
    let tags = match detail.tags_label() {
        Some(label) => format!(r#"<span class="muted">{label}</span>"#),
        None => detail
            .tags()
            .iter()
            .map(|t| {
                format!(
                    r#"<a class="tag" href="/?q={}">{}</a>"#,
                    urlencoding::encode(t),
                    escape_html(t)
                )
            })
            .collect(),
    };
    let rating = match detail.stars() {
        Some(_) => render_stars(repo.rating),
        None => format!(r#"<span class="muted">{}</span>"#, detail.rating_label()),
    };
    format!(
        r#"<article class="panel repo-detail">
  <div class="card-head">
    <img src="{icon}" alt="" class="repo-icon large">
    <h1>{name}</h1>
    <span class="badge badge-{kind_lower}">{kind}</span>
  </div>
  <p class="description">{description}</p>
  <div class="tags">{tags}</div>
  <div class="rating">{rating}</div>
  <a class="button" href="{url}" target="_blank" rel="noopener noreferrer">{link_label}</a>
</article>"#,
        icon = escape_html(&repo.icon),
        name = escape_html(&repo.name),
        kind = repo.kind,
        kind_lower = repo.kind.as_str().to_lowercase(),
        description = escape_html(&repo.description),
        tags = tags,
        rating = rating,
        url = escape_html(&repo.url),
        link_label = escape_html(&detail.link_label()),
    )
}

fn render_review_form(repo_id: i64, session: Option<&Session>) -> String {
    if session.is_none() {
        return format!(r#"<p class="muted">{REVIEW_REQUIRES_LOGIN}</p>"#);
    }
    let mut options = String::from(r#"<option value="0">Select a rating</option>"#);
    for stars in 1..=5 {
        let _ = write!(
            options,
            r#"<option value="{stars}">{stars} Star{}</option>"#,
            if stars == 1 { "" } else { "s" }
        );
    }
    format!(
        r#"<form id="review-form" class="review-form" data-repo-id="{repo_id}">
  <select name="rating">{options}</select>
  <textarea name="content" rows="3" placeholder="Write your review..."></textarea>
  <button type="submit">Submit Review</button>
</form>"#
    )
}

fn render_reviews(panel: &ReviewPanel) -> String {
    if panel.reviews.is_empty() {
        return format!(r#"<p class="muted">{NO_REVIEWS}</p>"#);
    }
    let items: String = panel
        .reviews
        .iter()
        .map(|r| {
            format!(
                r#"<li class="review">
  <span class="stars">{}</span>
  <time datetime="{}">{}</time>
  <p>{}</p>
</li>"#,
                StarRow::from_review(r.rating).glyphs(),
                r.created_at.to_rfc3339(),
                r.created_at.format("%Y-%m-%d"),
                escape_html(&r.content)
            )
        })
        .collect();
    format!(r#"<ul class="review-list">{items}</ul>"#)
}
