//! End-to-end HTTP scenarios against a real server bound to port 0.

use jotlist_core::client::{self, api::ApiClient, UiState};
use jotlist_core::{HttpServer, TaskStore};
use std::sync::Arc;

async fn spawn_server(store: Arc<TaskStore>) -> String {
    let bound = HttpServer::new(store).bind("127.0.0.1:0").await.expect("bind server");
    let addr = bound.local_addr();
    tokio::spawn(async move {
        let _ = bound.serve().await;
    });
    format!("http://{addr}")
}

async fn spawn_in_memory_server() -> String {
    spawn_server(Arc::new(TaskStore::open_in_memory().expect("open store"))).await
}

async fn list_body(base: &str) -> serde_json::Value {
    let response = reqwest::get(format!("{base}/api/getTasks")).await.expect("list request");
    assert_eq!(response.status(), 200);
    response.json().await.expect("list json")
}

async fn post_text(base: &str, body: serde_json::Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{base}/api/addTask"))
        .json(&body)
        .send()
        .await
        .expect("create request")
}

#[tokio::test]
async fn empty_table_lists_nothing() {
    let base = spawn_in_memory_server().await;

    let body = list_body(&base).await;
    assert_eq!(body, serde_json::json!({ "tasks": [] }));

    // The client renders the empty state for this response
    let mut state = UiState::new();
    client::load_tasks(&mut state, &ApiClient::new(base)).await;
    assert_eq!(state.render(), "No tasks yet. Add one above!");
}

#[tokio::test]
async fn create_then_list_orders_newest_first() {
    let base = spawn_in_memory_server().await;

    let response = post_text(&base, serde_json::json!({ "text": "Buy milk" })).await;
    assert_eq!(response.status(), 201);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Task added successfully");

    post_text(&base, serde_json::json!({ "text": "Walk dog" })).await;

    let body = list_body(&base).await;
    let tasks = body["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["text"], "Walk dog");
    assert_eq!(tasks[1]["text"], "Buy milk");
    assert!(tasks[0]["id"].as_i64().unwrap() > tasks[1]["id"].as_i64().unwrap());
    // created_at is a parseable timestamp
    let raw = tasks[0]["created_at"].as_str().unwrap();
    chrono::DateTime::parse_from_rfc3339(raw).expect("rfc3339 created_at");
}

#[tokio::test]
async fn rejects_empty_whitespace_and_missing_text() {
    let base = spawn_in_memory_server().await;

    for body in [
        serde_json::json!({ "text": "" }),
        serde_json::json!({ "text": "   " }),
        serde_json::json!({}),
        serde_json::json!({ "text": 42 }),
        serde_json::json!(null),
    ] {
        let response = post_text(&base, body).await;
        assert_eq!(response.status(), 400);
        let payload: serde_json::Value = response.json().await.unwrap();
        assert_eq!(payload["error"], "Task text is required and must be a non-empty string.");
    }

    // No row was inserted by any of the rejected requests
    assert_eq!(list_body(&base).await["tasks"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn rejects_oversized_text() {
    let base = spawn_in_memory_server().await;

    let response = post_text(&base, serde_json::json!({ "text": "x".repeat(256) })).await;
    assert_eq!(response.status(), 400);
    let payload: serde_json::Value = response.json().await.unwrap();
    assert_eq!(payload["error"], "Task text must be 255 characters or less.");

    // 255 raw characters is still fine
    let response = post_text(&base, serde_json::json!({ "text": "x".repeat(255) })).await;
    assert_eq!(response.status(), 201);

    assert_eq!(list_body(&base).await["tasks"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn wrong_verbs_get_405_with_allow_header() {
    let base = spawn_in_memory_server().await;
    let http = reqwest::Client::new();

    let response = http.post(format!("{base}/api/getTasks")).send().await.unwrap();
    assert_eq!(response.status(), 405);
    assert_eq!(response.headers().get("allow").unwrap(), "GET");

    for request in [
        http.get(format!("{base}/api/addTask")),
        http.put(format!("{base}/api/addTask")).json(&serde_json::json!({ "text": "x" })),
        http.delete(format!("{base}/api/getTasks")),
    ] {
        let response = request.send().await.unwrap();
        assert_eq!(response.status(), 405);
        let payload: serde_json::Value = response.json().await.unwrap();
        assert_eq!(payload["error"], "Method Not Allowed");
    }

    // None of the rejected verbs touched storage
    assert_eq!(list_body(&base).await["tasks"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn list_is_idempotent() {
    let base = spawn_in_memory_server().await;
    post_text(&base, serde_json::json!({ "text": "one" })).await;
    post_text(&base, serde_json::json!({ "text": "two" })).await;

    assert_eq!(list_body(&base).await, list_body(&base).await);
}

#[tokio::test]
async fn unknown_paths_are_404_and_root_serves_the_page() {
    let base = spawn_in_memory_server().await;

    let response = reqwest::get(format!("{base}/")).await.unwrap();
    assert_eq!(response.status(), 200);
    assert!(response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert!(response.text().await.unwrap().contains("<form"));

    let response = reqwest::get(format!("{base}/api/nope")).await.unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn storage_failure_yields_500_and_client_error_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.db");
    let base = spawn_server(Arc::new(TaskStore::open(&path).expect("open store"))).await;

    // Break storage out from under the running server
    let saboteur = rusqlite::Connection::open(&path).unwrap();
    saboteur.execute_batch("DROP TABLE tasks;").unwrap();

    let response = reqwest::get(format!("{base}/api/getTasks")).await.unwrap();
    assert_eq!(response.status(), 500);
    let payload: serde_json::Value = response.json().await.unwrap();
    assert_eq!(payload["error"], "Internal Server Error");
    assert!(!payload["details"].as_str().unwrap().is_empty());

    let response = post_text(&base, serde_json::json!({ "text": "Buy milk" })).await;
    assert_eq!(response.status(), 500);

    // The client surfaces the failure and stops its loading indicator
    let mut state = UiState::new();
    client::load_tasks(&mut state, &ApiClient::new(base)).await;
    assert!(!state.loading);
    assert!(state.render().starts_with("Error: "));
}

#[tokio::test]
async fn client_submit_refetches_on_success_and_keeps_input_on_failure() {
    let base = spawn_in_memory_server().await;
    let client_api = ApiClient::new(base);

    let mut state = UiState::new();
    client::load_tasks(&mut state, &client_api).await;

    state.input = "Buy milk".to_owned();
    client::submit_task(&mut state, &client_api).await;
    assert!(state.input.is_empty());
    assert_eq!(state.tasks.len(), 1);
    assert_eq!(state.tasks[0].text, "Buy milk");

    // Oversized input is rejected by the server; it stays in the box
    state.input = "x".repeat(256);
    client::submit_task(&mut state, &client_api).await;
    assert_eq!(state.input.chars().count(), 256);
    assert_eq!(state.error.as_deref(), Some("Task text must be 255 characters or less."));
    assert_eq!(state.tasks.len(), 1);
}
