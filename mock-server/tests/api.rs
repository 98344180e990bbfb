use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_server::{app, Todo};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

/// Send one request through a shared router, keeping its state.
async fn send(app: &Router, req: Request<String>) -> axum::response::Response {
    app.clone().oneshot(req).await.unwrap()
}

// --- list ---

#[tokio::test]
async fn list_todos_empty() {
    let resp = app().oneshot(empty_request("GET", "/todos")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    assert!(todos.is_empty());
}

// --- create ---

#[tokio::test]
async fn create_todo_returns_201_with_sequential_ids() {
    let app = app();

    let resp = send(&app, json_request("POST", "/todos", r#"{"title":"Buy milk"}"#)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let first: Todo = body_json(resp).await;
    assert_eq!(first.id, 1);
    assert_eq!(first.title, "Buy milk");
    assert!(!first.completed);

    let resp = send(&app, json_request("POST", "/todos", r#"{"title":"Walk dog"}"#)).await;
    let second: Todo = body_json(resp).await;
    assert_eq!(second.id, 2);
}

#[tokio::test]
async fn create_todo_always_starts_pending() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/todos",
            r#"{"title":"Already done","completed":true}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let todo: Todo = body_json(resp).await;
    assert!(!todo.completed);
}

#[tokio::test]
async fn create_todo_blank_title_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/todos", r#"{"title":"   "}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_todo_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/todos", r#"{"not_title":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- update ---

#[tokio::test]
async fn update_todo_not_found() {
    let resp = app()
        .oneshot(json_request(
            "PUT",
            "/todos/99",
            r#"{"title":"Nope","completed":false}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_todo_bad_id_returns_400() {
    let resp = app()
        .oneshot(json_request(
            "PUT",
            "/todos/not-a-number",
            r#"{"title":"x","completed":false}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_todo_partial_body_is_rejected() {
    let app = app();
    send(&app, json_request("POST", "/todos", r#"{"title":"Walk dog"}"#)).await;

    let resp = send(&app, json_request("PUT", "/todos/1", r#"{"completed":true}"#)).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- delete ---

#[tokio::test]
async fn delete_todo_not_found() {
    let resp = app()
        .oneshot(empty_request("DELETE", "/todos/1"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    let app = app();

    // create two
    let resp = send(&app, json_request("POST", "/todos", r#"{"title":"Walk dog"}"#)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let dog: Todo = body_json(resp).await;
    let resp = send(&app, json_request("POST", "/todos", r#"{"title":"Buy milk"}"#)).await;
    let milk: Todo = body_json(resp).await;

    // list — creation order
    let resp = send(&app, empty_request("GET", "/todos")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(todos, vec![dog.clone(), milk.clone()]);

    // update — full replace
    let resp = send(
        &app,
        json_request(
            "PUT",
            &format!("/todos/{}", dog.id),
            r#"{"title":"Walk cat","completed":true}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Todo = body_json(resp).await;
    assert_eq!(updated.id, dog.id);
    assert_eq!(updated.title, "Walk cat");
    assert!(updated.completed);

    // delete
    let resp = send(&app, empty_request("DELETE", &format!("/todos/{}", dog.id))).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // delete again — 404
    let resp = send(&app, empty_request("DELETE", &format!("/todos/{}", dog.id))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // list — only milk left
    let resp = send(&app, empty_request("GET", "/todos")).await;
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(todos, vec![milk]);

    // ids are not reused
    let resp = send(&app, json_request("POST", "/todos", r#"{"title":"Third"}"#)).await;
    let third: Todo = body_json(resp).await;
    assert_eq!(third.id, 3);
}
