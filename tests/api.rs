use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use serde_json::{Value, json};
use tower::util::ServiceExt;

use match_ladder_back::{
    config::AppConfig,
    dao::sheet_store::memory::MemorySheetStore,
    routes,
    state::{AppState, SharedState},
};

fn setup() -> (MemorySheetStore, SharedState, Router) {
    let store = MemorySheetStore::new();
    let state = AppState::with_store(AppConfig::default(), Arc::new(store.clone()));
    let app = routes::router(state.clone());
    (store, state, app)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let resp = app.clone().oneshot(request).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

async fn create_group(app: &Router, code: &str, players: &[&str]) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/groups",
        Some(json!({ "groupCode": code, "players": players })),
    )
    .await
}

#[tokio::test]
async fn create_group_returns_normalized_code() {
    let (_, _, app) = setup();

    let (status, body) = create_group(&app, "abc12", &["Alice", "Bob"]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["groupCode"], "ABC12");
    assert!(body["message"].is_string());

    let (status, body) = send(&app, Method::GET, "/groups/abc12/players", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "players": ["Alice", "Bob"] }));
}

#[tokio::test]
async fn legacy_create_path_is_accepted() {
    let (_, _, app) = setup();
    let (status, body) = send(
        &app,
        Method::POST,
        "/groups/create",
        Some(json!({ "groupCode": "LEGAC", "players": ["Alice", "Bob"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["groupCode"], "LEGAC");
}

#[tokio::test]
async fn duplicate_and_malformed_codes_are_bad_requests() {
    let (store, _, app) = setup();
    create_group(&app, "ABCDE", &["Alice", "Bob"]).await;

    let (status, body) = create_group(&app, "abcde", &["Carol", "Dave"]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let calls = store.call_count();
    let (status, _) = create_group(&app, "ABC", &["Carol", "Dave"]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = create_group(&app, "ZZZZZ", &["Carol"]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(store.call_count(), calls);
}

#[tokio::test]
async fn unknown_group_players_are_not_found() {
    let (_, _, app) = setup();
    let (status, body) = send(&app, Method::GET, "/groups/QWERT/players", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn recorded_matches_update_the_leaderboard() {
    let (_, _, app) = setup();
    create_group(&app, "ABCDE", &["Alice", "Bob"]).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/match",
        Some(json!({ "groupCode": "ABCDE", "players": ["Alice", "Bob"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (status, body) = send(&app, Method::GET, "/rankings?groupCode=ABCDE", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "rankings": [
            { "name": "Alice", "score": 1 },
            { "name": "Bob", "score": 0 }
        ] })
    );

    for _ in 0..2 {
        send(
            &app,
            Method::POST,
            "/match",
            Some(json!({ "groupCode": "ABCDE", "players": ["Bob", "Alice"] })),
        )
        .await;
    }
    let (_, body) = send(&app, Method::GET, "/rankings?groupCode=abcde", None).await;
    assert_eq!(body["rankings"][0], json!({ "name": "Bob", "score": 2 }));
}

#[tokio::test]
async fn invalid_matches_are_rejected() {
    let (_, _, app) = setup();
    create_group(&app, "ABCDE", &["Alice", "Bob"]).await;

    for players in [
        json!(["Alice"]),
        json!(["A", "B", "C", "D", "E"]),
        json!(["Alice", "Alice"]),
        json!(["Alice", " "]),
    ] {
        let (status, body) = send(
            &app,
            Method::POST,
            "/match",
            Some(json!({ "groupCode": "ABCDE", "players": players })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{players}");
        assert!(body["error"].is_string());
    }

    let (status, _) = send(
        &app,
        Method::POST,
        "/match",
        Some(json!({ "groupCode": "NOPE1", "players": ["Alice", "Bob"] })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn mistyped_bodies_are_bad_requests_with_error_body() {
    let (_, _, app) = setup();
    create_group(&app, "ABCDE", &["Alice", "Bob"]).await;

    let cases = [
        ("/match", json!({ "groupCode": "ABCDE", "players": "Alice" })),
        ("/match", json!({ "groupCode": "ABCDE", "players": [1, 2] })),
        ("/groups", json!({ "groupCode": 12345, "players": ["Alice", "Bob"] })),
        ("/groups/create", json!({ "groupCode": "QWERT", "players": "Alice" })),
        ("/auth/verify", json!({ "code": 12345 })),
    ];
    for (uri, body) in cases {
        let (status, response) = send(&app, Method::POST, uri, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(response["error"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn non_json_bodies_are_bad_requests() {
    let (_, _, app) = setup();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/match")
        .body(Body::from("players=Alice,Bob"))
        .unwrap();

    let resp = app.oneshot(request).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn rankings_require_a_group_code() {
    let (_, _, app) = setup();
    let (status, body) = send(&app, Method::GET, "/rankings", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Group code is required");

    let (status, _) = send(&app, Method::GET, "/rankings?groupCode=NOPE1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn verify_distinguishes_bad_format_from_unknown_code() {
    let (_, _, app) = setup();
    create_group(&app, "12345", &["Alice", "Bob"]).await;

    let verify = |code: &'static str| {
        let app = app.clone();
        async move { send(&app, Method::POST, "/auth/verify", Some(json!({ "code": code }))).await }
    };

    assert_eq!(verify("12345").await.0, StatusCode::OK);
    assert_eq!(verify("12").await.0, StatusCode::BAD_REQUEST);
    assert_eq!(verify("99999").await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn degraded_mode_answers_service_unavailable() {
    let (_, state, app) = setup();
    state.clear_sheet_store().await;

    let (status, body) = send(&app, Method::GET, "/rankings?groupCode=ABCDE", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].is_string());

    let (status, body) = send(&app, Method::GET, "/healthcheck", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
}

#[tokio::test]
async fn storage_failures_are_internal_errors_without_details() {
    let (store, _, app) = setup();
    create_group(&app, "ABCDE", &["Alice", "Bob"]).await;
    store.set_unavailable(true);

    let (status, body) = send(
        &app,
        Method::POST,
        "/match",
        Some(json!({ "groupCode": "ABCDE", "players": ["Alice", "Bob"] })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "internal server error" }));
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (_, _, app) = setup();
    let (status, body) = send(&app, Method::GET, "/api-doc/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/match"].is_object());
}
