use super::*;
use crate::api::test_support::TestApp;
use crate::domain::messages::{SAVE_REQUIRES_LOGIN, SAVE_SUCCESS};
use axum::http::StatusCode;
use serde_json::{Value, json};

fn names(body: &Value) -> Vec<String> {
    body["repos"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_list_repos_unfiltered() {
    let app = TestApp::new();
    let response = app.get("/api/v1/repos", None).await;
    assert_eq!(response.status, StatusCode::OK);

    let body = response.json();
    assert_eq!(body["query"], "");
    assert_eq!(body["category"], "all");
    assert_eq!(names(&body).len(), 7);
    assert_eq!(names(&body)[0], "Next.js Starter");
}

#[tokio::test]
async fn test_list_repos_search_and_category_intersect() {
    let app = TestApp::new();

    let body = app.get("/api/v1/repos?q=REACT", None).await.json();
    assert_eq!(names(&body), vec!["Next.js Starter", "React Todo App"]);

    let body = app
        .get("/api/v1/repos?q=react&type=Replit", None)
        .await
        .json();
    assert_eq!(names(&body), vec!["React Todo App"]);
    assert_eq!(body["category"], "Replit");

    let body = app.get("/api/v1/repos?type=GitHub", None).await.json();
    assert!(
        body["repos"]
            .as_array()
            .unwrap()
            .iter()
            .all(|r| r["type"] == "GitHub")
    );
}

#[tokio::test]
async fn test_list_repos_unknown_type() {
    let app = TestApp::new();
    let response = app.get("/api/v1/repos?type=Bitbucket", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["code"], "INVALID_TYPE");
}

#[tokio::test]
async fn test_get_repo_detail_labels() {
    let app = TestApp::new();
    let body = app.get("/api/v1/repos/1", None).await.json();
    assert_eq!(body["repo"]["name"], "Next.js Starter");
    assert_eq!(body["rating_label"], "4.7");
    assert_eq!(body["stars"]["full"], 4);
    assert_eq!(body["stars"]["half"], true);
    assert_eq!(body["link_label"], "View on GitHub");
    assert!(body["tags_label"].is_null());

    // Seeded "Rust Axum Service" has no rating; "Discord Bot" has no tags
    let unrated = app.get("/api/v1/repos/6", None).await.json();
    assert_eq!(unrated["rating_label"], "No rating available");
    assert!(unrated["stars"].is_null());
    let untagged = app.get("/api/v1/repos/7", None).await.json();
    assert_eq!(untagged["tags_label"], "No tags available");
}

#[tokio::test]
async fn test_get_repo_invalid_and_missing() {
    let app = TestApp::new();

    let invalid = app.get("/api/v1/repos/abc", None).await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
    assert_eq!(invalid.json()["code"], "INVALID_REPO_ID");

    let zero = app.get("/api/v1/repos/0", None).await;
    assert_eq!(zero.status, StatusCode::BAD_REQUEST);

    let missing = app.get("/api/v1/repos/9999", None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.json()["message"], "Repo not found");
}

#[tokio::test]
async fn test_save_requires_session() {
    let app = TestApp::new();
    let response = app.post("/api/v1/repos/1/save", json!({}), None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.json()["message"], SAVE_REQUIRES_LOGIN);
    assert_eq!(app.memory.list_repo_count(), 0);
}

#[tokio::test]
async fn test_save_lands_in_saved_list() {
    let app = TestApp::new();
    let cookie = app.sign_up("dev@example.com").await;

    for id in [1, 3] {
        let response = app
            .post(&format!("/api/v1/repos/{id}/save"), json!({}), Some(&cookie))
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.json()["message"], SAVE_SUCCESS);
    }

    let lists = app.get("/api/v1/lists", Some(&cookie)).await.json();
    let saved_lists: Vec<&Value> = lists["lists"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|l| l["name"] == "Saved")
        .collect();
    assert_eq!(saved_lists.len(), 1);
    assert_eq!(lists["saved"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_leaderboard() {
    let app = TestApp::new();
    let body = app.get("/api/v1/leaderboard", None).await.json();
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0]["rank"], 1);
    assert!(rows[0]["type"].is_string());
}

#[test]
fn test_query_category_default_is_all() {
    let query = ListReposQuery::default();
    assert_eq!(query.category().unwrap(), CategoryFilter::All);
}
