use super::*;
use crate::api::test_support::TestApp;
use crate::domain::messages::ALL_SAVED_HEADING;
use axum::http::{Method, StatusCode};
use serde_json::{Value, json};

async fn create(app: &TestApp, cookie: &str, name: &str) -> i64 {
    let response = app
        .post("/api/v1/lists", json!({ "name": name }), Some(cookie))
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    response.json()["id"].as_i64().unwrap()
}

fn saved_ids(body: &Value) -> Vec<i64> {
    body["saved"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_lists_require_session() {
    let app = TestApp::new();

    let response = app.get("/api/v1/lists", None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.json()["message"], LISTS_REQUIRE_LOGIN);

    let response = app
        .post("/api/v1/lists", json!({ "name": "Later" }), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .send(Method::DELETE, "/api/v1/lists/saved/1", None, None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_list_and_empty_screen() {
    let app = TestApp::new();
    let cookie = app.sign_up("dev@example.com").await;

    let id = create(&app, &cookie, "  Weekend  ").await;
    let body = app.get("/api/v1/lists", Some(&cookie)).await.json();
    assert_eq!(body["heading"], ALL_SAVED_HEADING);
    assert!(body["selected"].is_null());
    assert_eq!(body["lists"][0]["id"], id);
    assert_eq!(body["lists"][0]["name"], "Weekend");
    assert!(saved_ids(&body).is_empty());
}

#[tokio::test]
async fn test_create_list_blank_name() {
    let app = TestApp::new();
    let cookie = app.sign_up("dev@example.com").await;

    let empty = app
        .post("/api/v1/lists", json!({ "name": "" }), Some(&cookie))
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);

    let blank = app
        .post("/api/v1/lists", json!({ "name": "   " }), Some(&cookie))
        .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_move_between_lists_and_unsorted() {
    let app = TestApp::new();
    let cookie = app.sign_up("dev@example.com").await;
    app.post("/api/v1/repos/1/save", json!({}), Some(&cookie))
        .await;
    let weekend = create(&app, &cookie, "Weekend").await;

    let moved = app
        .send(
            Method::PUT,
            "/api/v1/lists/saved/1",
            Some(json!({ "list_id": weekend })),
            Some(&cookie),
        )
        .await;
    assert_eq!(moved.status, StatusCode::OK);
    assert_eq!(moved.json()["list_id"], weekend);

    let selected = app
        .get(&format!("/api/v1/lists?list_id={weekend}"), Some(&cookie))
        .await
        .json();
    assert_eq!(selected["heading"], "Weekend");
    assert_eq!(saved_ids(&selected), vec![1]);

    let unsorted = app
        .send(
            Method::PUT,
            "/api/v1/lists/saved/1",
            Some(json!({ "list_id": 0 })),
            Some(&cookie),
        )
        .await;
    assert_eq!(unsorted.status, StatusCode::OK);
    assert!(unsorted.json()["list_id"].is_null());
    assert_eq!(app.memory.list_repo_count(), 0);
}

#[tokio::test]
async fn test_move_to_foreign_list_is_not_found() {
    let app = TestApp::new();
    let owner = app.sign_up("owner@example.com").await;
    let other = app.sign_up("other@example.com").await;
    let foreign = create(&app, &owner, "Private").await;
    app.post("/api/v1/repos/1/save", json!({}), Some(&other))
        .await;

    let response = app
        .send(
            Method::PUT,
            "/api/v1/lists/saved/1",
            Some(json!({ "list_id": foreign })),
            Some(&other),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json()["code"], "LIST_NOT_FOUND");
}

#[tokio::test]
async fn test_remove_saved_repo() {
    let app = TestApp::new();
    let cookie = app.sign_up("dev@example.com").await;
    for id in [1, 2] {
        app.post(&format!("/api/v1/repos/{id}/save"), json!({}), Some(&cookie))
            .await;
    }

    let response = app
        .send(Method::DELETE, "/api/v1/lists/saved/1", None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let body = app.get("/api/v1/lists", Some(&cookie)).await.json();
    assert_eq!(saved_ids(&body), vec![2]);
}

#[tokio::test]
async fn test_lists_are_private() {
    let app = TestApp::new();
    let owner = app.sign_up("owner@example.com").await;
    let other = app.sign_up("other@example.com").await;
    app.post("/api/v1/repos/1/save", json!({}), Some(&owner))
        .await;

    let body = app.get("/api/v1/lists", Some(&other)).await.json();
    assert!(body["lists"].as_array().unwrap().is_empty());
    assert!(saved_ids(&body).is_empty());
}
