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

async fn get_week(app: &TestApp, auth: &AuthHeaders, uri: &str) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder().method("GET").uri(uri)
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap()
}

async fn post_json(app: &TestApp, auth: &AuthHeaders, uri: &str, payload: Value) -> Value {
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri(uri)
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(payload.to_string())).unwrap()
    ).await.unwrap();
    assert!(res.status().is_success(), "setup request failed: {}", res.status());
    parse_body(res).await
}

#[tokio::test]
async fn test_week_buckets_in_user_timezone() {
    let app = TestApp::new().await;
    let auth = app.signup_and_login_tz("kenji", "Asia/Tokyo").await;

    // 23:00 UTC on Monday Jan 1 is already Tuesday 08:00 in Tokyo.
    post_json(&app, &auth, "/api/v1/events", json!({
        "title": "Late call",
        "starts_at": "2024-01-01T23:00:00Z", "ends_at": "2024-01-01T23:30:00Z"
    })).await;
    post_json(&app, &auth, "/api/v1/events", json!({
        "title": "Lunch",
        "starts_at": "2024-01-02T03:00:00Z", "ends_at": "2024-01-02T04:00:00Z"
    })).await;
    post_json(&app, &auth, "/api/v1/periods", json!({
        "name": "Standup", "weekday": 0, "start_time": "09:30", "end_time": "09:45"
    })).await;

    // Any date in the week normalizes to its Monday.
    let res = get_week(&app, &auth, "/api/v1/calendar/week?start=2024-01-03").await;
    assert_eq!(res.status(), StatusCode::OK);
    let week = parse_body(res).await;

    assert_eq!(week["week_start"], "2024-01-01");
    let days = week["days"].as_array().unwrap();
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["date"], "2024-01-01");
    assert_eq!(days[6]["date"], "2024-01-07");

    // Both events land on the local Tuesday, ordered by start instant.
    assert_eq!(days[0]["events"].as_array().unwrap().len(), 0);
    let tuesday: Vec<&str> = days[1]["events"].as_array().unwrap().iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(tuesday, vec!["Late call", "Lunch"]);

    // The weekly period shows on Monday regardless of the week queried.
    assert_eq!(days[0]["periods"][0]["name"], "Standup");
    assert_eq!(days[1]["periods"].as_array().unwrap().len(), 0);

    // A malformed start date is rejected.
    let res = get_week(&app, &auth, "/api/v1/calendar/week?start=January").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Omitting start falls back to the current week.
    let res = get_week(&app, &auth, "/api/v1/calendar/week").await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_shared_week_requires_follow_and_hides_private() {
    let app = TestApp::new().await;
    let alice = app.signup_and_login("alice").await;
    let bob = app.signup_and_login("bob").await;

    let secret = post_json(&app, &alice, "/api/v1/categories", json!({
        "name": "Therapy", "color": "#222222", "is_private": true
    })).await;
    let secret_id = secret["id"].as_str().unwrap();

    post_json(&app, &alice, "/api/v1/events", json!({
        "title": "Therapy session",
        "starts_at": "2024-06-11T10:00:00Z", "ends_at": "2024-06-11T11:00:00Z",
        "category_id": secret_id
    })).await;
    post_json(&app, &alice, "/api/v1/events", json!({
        "title": "Book club",
        "starts_at": "2024-06-11T18:00:00Z", "ends_at": "2024-06-11T19:00:00Z"
    })).await;
    post_json(&app, &alice, "/api/v1/periods", json!({
        "name": "Journaling", "weekday": 1, "start_time": "08:00", "end_time": "08:30",
        "category_id": secret_id
    })).await;

    // Not following yet
    let res = get_week(&app, &bob, "/api/v1/users/alice/calendar/week?start=2024-06-10").await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Unknown owner is a 404, not a 403.
    let res = get_week(&app, &bob, "/api/v1/users/nobody/calendar/week?start=2024-06-10").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    post_json(&app, &bob, "/api/v1/follows", json!({"username": "alice"})).await;

    // Now visible, minus the private category.
    let res = get_week(&app, &bob, "/api/v1/users/alice/calendar/week?start=2024-06-10").await;
    assert_eq!(res.status(), StatusCode::OK);
    let week = parse_body(res).await;
    let tuesday = &week["days"][1];
    let titles: Vec<&str> = tuesday["events"].as_array().unwrap().iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Book club"]);
    assert_eq!(tuesday["periods"].as_array().unwrap().len(), 0);

    // The owner's own view keeps everything.
    let res = get_week(&app, &alice, "/api/v1/calendar/week?start=2024-06-10").await;
    let week = parse_body(res).await;
    assert_eq!(week["days"][1]["events"].as_array().unwrap().len(), 2);
    assert_eq!(week["days"][1]["periods"].as_array().unwrap().len(), 1);

    // Viewing yourself through the public route is also unfiltered.
    let res = get_week(&app, &alice, "/api/v1/users/alice/calendar/week?start=2024-06-10").await;
    let week = parse_body(res).await;
    assert_eq!(week["days"][1]["events"].as_array().unwrap().len(), 2);
}
