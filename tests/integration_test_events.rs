mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{AuthHeaders, TestApp};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_event(app: &TestApp, auth: &AuthHeaders, payload: Value) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/events")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(payload.to_string())).unwrap()
    ).await.unwrap()
}

#[tokio::test]
async fn test_event_lifecycle() {
    let app = TestApp::new().await;
    let auth = app.signup_and_login("alice").await;

    // 1. Create
    let res = create_event(&app, &auth, json!({
        "title": "Dentist",
        "description": "Bring referral",
        "location": "Main St 5",
        "starts_at": "2024-03-08T14:00:00Z",
        "ends_at": "2024-03-08T14:30:00Z"
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let event = parse_body(res).await;
    let event_id = event["id"].as_str().unwrap().to_string();
    assert_eq!(event["title"], "Dentist");
    assert!(event["category_id"].is_null());

    // 2. Get
    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(format!("/api/v1/events/{}", event_id))
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // 3. Partial update
    let res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri(format!("/api/v1/events/{}", event_id))
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"title": "Dentist (moved)", "starts_at": "2024-03-08T15:00:00Z", "ends_at": "2024-03-08T15:30:00Z"}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated = parse_body(res).await;
    assert_eq!(updated["title"], "Dentist (moved)");
    assert_eq!(updated["description"], "Bring referral");

    // 4. Delete, then the id is gone
    let res = app.router.clone().oneshot(
        Request::builder().method("DELETE").uri(format!("/api/v1/events/{}", event_id))
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(format!("/api/v1/events/{}", event_id))
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_event_validation() {
    let app = TestApp::new().await;
    let auth = app.signup_and_login("bob").await;

    // End before start
    let res = create_event(&app, &auth, json!({
        "title": "Backwards",
        "starts_at": "2024-03-08T14:00:00Z",
        "ends_at": "2024-03-08T13:00:00Z"
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Zero-length
    let res = create_event(&app, &auth, json!({
        "title": "Instant",
        "starts_at": "2024-03-08T14:00:00Z",
        "ends_at": "2024-03-08T14:00:00Z"
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Blank title
    let res = create_event(&app, &auth, json!({
        "title": "   ",
        "starts_at": "2024-03-08T14:00:00Z",
        "ends_at": "2024-03-08T15:00:00Z"
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Category that does not exist
    let res = create_event(&app, &auth, json!({
        "title": "Orphan",
        "starts_at": "2024-03-08T14:00:00Z",
        "ends_at": "2024-03-08T15:00:00Z",
        "category_id": "no-such-category"
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_clears_optional_text_fields_with_empty_string() {
    let app = TestApp::new().await;
    let auth = app.signup_and_login("dora").await;

    let res = create_event(&app, &auth, json!({
        "title": "Dinner",
        "description": "Table for two",
        "location": "Trattoria",
        "starts_at": "2024-03-08T19:00:00Z",
        "ends_at": "2024-03-08T21:00:00Z"
    })).await;
    let event_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri(format!("/api/v1/events/{}", event_id))
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"description": "", "location": "Osteria"}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated = parse_body(res).await;
    assert!(updated["description"].is_null());
    assert_eq!(updated["location"], "Osteria");

    // Omitting the fields leaves them untouched.
    let res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri(format!("/api/v1/events/{}", event_id))
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"title": "Late dinner"}).to_string())).unwrap()
    ).await.unwrap();
    let updated = parse_body(res).await;
    assert_eq!(updated["location"], "Osteria");
    assert!(updated["description"].is_null());
}

#[tokio::test]
async fn test_range_listing_uses_overlap_semantics() {
    let app = TestApp::new().await;
    let auth = app.signup_and_login("carol").await;

    // Fully inside the window
    create_event(&app, &auth, json!({
        "title": "Inside",
        "starts_at": "2024-05-01T10:00:00Z", "ends_at": "2024-05-01T11:00:00Z"
    })).await;
    // Straddles the window start
    create_event(&app, &auth, json!({
        "title": "Straddles start",
        "starts_at": "2024-04-30T23:00:00Z", "ends_at": "2024-05-01T01:00:00Z"
    })).await;
    // Ends exactly at the window start: not an overlap
    create_event(&app, &auth, json!({
        "title": "Touches start",
        "starts_at": "2024-04-30T22:00:00Z", "ends_at": "2024-05-01T00:00:00Z"
    })).await;
    // Starts exactly at the window end: not an overlap
    create_event(&app, &auth, json!({
        "title": "Touches end",
        "starts_at": "2024-05-02T00:00:00Z", "ends_at": "2024-05-02T01:00:00Z"
    })).await;

    let res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/v1/events?start=2024-05-01T00:00:00Z&end=2024-05-02T00:00:00Z")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let events = parse_body(res).await;
    let titles: Vec<&str> = events.as_array().unwrap().iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Straddles start", "Inside"]);

    // Half-open range params are rejected
    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/events?start=2024-05-01T00:00:00Z")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/v1/events?start=2024-05-02T00:00:00Z&end=2024-05-01T00:00:00Z")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_events_are_owner_scoped() {
    let app = TestApp::new().await;
    let alice = app.signup_and_login("alice").await;
    let mallory = app.signup_and_login("mallory").await;

    let res = create_event(&app, &alice, json!({
        "title": "Private meeting",
        "starts_at": "2024-03-08T14:00:00Z", "ends_at": "2024-03-08T15:00:00Z"
    })).await;
    let event_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    // A foreign id reads as not-found, never as forbidden.
    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(format!("/api/v1/events/{}", event_id))
            .header(header::COOKIE, format!("access_token={}", mallory.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app.router.clone().oneshot(
        Request::builder().method("DELETE").uri(format!("/api/v1/events/{}", event_id))
            .header(header::COOKIE, format!("access_token={}", mallory.access_token))
            .header("X-CSRF-Token", &mallory.csrf_token)
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Alice still sees it.
    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(format!("/api/v1/events/{}", event_id))
            .header(header::COOKIE, format!("access_token={}", alice.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}
