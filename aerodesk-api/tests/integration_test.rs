use aerodesk_api::{app, AppState};
use aerodesk_core::repository::Collection;
use aerodesk_core::{Flight, Profile};
use aerodesk_store::{JsonFileCollection, MemoryCollection};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn flight_body() -> Value {
    json!({
        "flightNumber": "AA100",
        "departure": "New York",
        "arrival": "Los Angeles",
        "date": "2025-07-01",
        "time": "10:00",
        "airline": "American Airlines"
    })
}

fn profile(name: &str, email: &str) -> Profile {
    Profile {
        name: name.into(),
        email: email.into(),
        country: "India".into(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_health_text() {
    let app = app(AppState::in_memory());
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"Server is running...");
}

#[tokio::test]
async fn test_create_flight_assigns_sequential_ids() {
    let app = app(AppState::in_memory());

    let (status, first) = send(&app, "POST", "/api/flights", Some(flight_body())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["id"], 1);
    assert_eq!(first["flightNumber"], "AA100");

    let mut second_body = flight_body();
    second_body["flightNumber"] = json!("AA200");
    let (_, second) = send(&app, "POST", "/api/flights", Some(second_body)).await;
    assert_eq!(second["id"], 2);

    let (status, list) = send(&app, "GET", "/api/flights", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_flight_missing_airline_is_400_and_not_stored() {
    let state = AppState::in_memory();
    let app = app(state.clone());
    send(&app, "POST", "/api/flights", Some(flight_body())).await;

    let mut body = flight_body();
    body.as_object_mut().unwrap().remove("airline");
    let (status, error) = send(&app, "POST", "/api/flights", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["error"].as_str().unwrap().contains("airline"));
    assert_eq!(state.flights.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let app = app(AppState::in_memory());
    let request = Request::builder()
        .method("POST")
        .uri("/api/flights")
        .header("content-type", "application/json")
        .body(Body::from("{\"flightNumber\": "))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_profile_routes_share_one_collection() {
    let app = app(AppState::in_memory());

    let (status, created) = send(
        &app,
        "POST",
        "/api/profile",
        Some(json!({"name": "Meera", "email": "meera@example.com", "districtCode": "411"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["districtCode"], "411");

    let (_, users) = send(&app, "GET", "/api/users", None).await;
    assert_eq!(users.as_array().unwrap().len(), 1);
    assert_eq!(users[0]["email"], "meera@example.com");
}

#[tokio::test]
async fn test_profile_is_stored_as_sent() {
    let app = app(AppState::in_memory());
    let sent = json!({
        "name": "Ravi",
        "email": "ravi@example.com",
        "districtCode": "007",
        "phone": "+91 98450 00000"
    });

    let (status, created) = send(&app, "POST", "/api/users", Some(sent.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["districtCode"], "007");

    let (_, users) = send(&app, "GET", "/api/profile", None).await;
    assert_eq!(users[0]["districtCode"], "007");
    assert_eq!(users[0]["phone"], sent["phone"]);

    let (status, _) = send(
        &app,
        "POST",
        "/api/users",
        Some(json!({"name": "Ravi", "email": "r2@example.com", "districtCode": "560 001"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_profile_without_email_is_400() {
    let state = AppState::in_memory();
    let app = app(state.clone());

    let (status, error) = send(&app, "POST", "/api/users", Some(json!({"name": "NoMail"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["error"].is_string());
    assert!(state.profiles.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_by_email_removes_all_matches() {
    let profiles = Arc::new(MemoryCollection::with_records(vec![
        profile("A", "dup@example.com"),
        profile("B", "dup@example.com"),
        profile("C", "keep@example.com"),
    ]));
    let state = AppState {
        flights: Arc::new(MemoryCollection::<Flight>::new()),
        profiles: profiles.clone(),
    };
    let app = app(state);

    let (status, body) = send(&app, "DELETE", "/api/users/dup@example.com", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    let left = profiles.list().await.unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].email, "keep@example.com");
}

#[tokio::test]
async fn test_delete_unknown_email_is_noop_success() {
    let profiles = Arc::new(MemoryCollection::with_records(vec![profile("A", "a@example.com")]));
    let state = AppState {
        flights: Arc::new(MemoryCollection::<Flight>::new()),
        profiles: profiles.clone(),
    };
    let app = app(state);

    let (status, body) = send(&app, "DELETE", "/api/profile/ghost@example.com", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(profiles.list().await.unwrap(), vec![profile("A", "a@example.com")]);
}

#[tokio::test]
async fn test_corrupt_users_file_is_500() {
    let dir = tempfile::tempdir().unwrap();
    let users = JsonFileCollection::<Profile>::in_dir(dir.path());
    std::fs::write(users.path(), "not json").unwrap();

    let state = AppState {
        flights: Arc::new(JsonFileCollection::<Flight>::in_dir(dir.path())),
        profiles: Arc::new(users),
    };
    let app = app(state);

    let (status, body) = send(&app, "GET", "/api/users", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal Server Error");

    // The flights file is untouched by the broken users file.
    let (status, _) = send(&app, "GET", "/api/flights", None).await;
    assert_eq!(status, StatusCode::OK);
}
