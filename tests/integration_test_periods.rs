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

async fn create_period(app: &TestApp, auth: &AuthHeaders, payload: Value) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/periods")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(payload.to_string())).unwrap()
    ).await.unwrap()
}

#[tokio::test]
async fn test_period_lifecycle() {
    let app = TestApp::new().await;
    let auth = app.signup_and_login("alice").await;

    // 1. Create
    let res = create_period(&app, &auth, json!({
        "name": "Gym", "weekday": 1, "start_time": "18:00", "end_time": "19:30"
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let period = parse_body(res).await;
    let period_id = period["id"].as_str().unwrap().to_string();
    assert_eq!(period["weekday"], 1);

    // 2. List
    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/periods")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await.as_array().unwrap().len(), 1);

    // 3. Move to Thursday mornings
    let res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri(format!("/api/v1/periods/{}", period_id))
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"weekday": 3, "start_time": "07:00", "end_time": "08:00"}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated = parse_body(res).await;
    assert_eq!(updated["weekday"], 3);
    assert_eq!(updated["name"], "Gym");

    // 4. Delete
    let res = app.router.clone().oneshot(
        Request::builder().method("DELETE").uri(format!("/api/v1/periods/{}", period_id))
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.router.clone().oneshot(
        Request::builder().method("DELETE").uri(format!("/api/v1/periods/{}", period_id))
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_period_validation() {
    let app = TestApp::new().await;
    let auth = app.signup_and_login("bob").await;

    // Weekday out of range
    let res = create_period(&app, &auth, json!({
        "name": "Bad day", "weekday": 7, "start_time": "10:00", "end_time": "11:00"
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Unparseable clock
    let res = create_period(&app, &auth, json!({
        "name": "Bad clock", "weekday": 2, "start_time": "25:99", "end_time": "11:00"
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Overnight periods are not supported
    let res = create_period(&app, &auth, json!({
        "name": "Night shift", "weekday": 2, "start_time": "22:00", "end_time": "06:00"
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Blank name
    let res = create_period(&app, &auth, json!({
        "name": "", "weekday": 2, "start_time": "10:00", "end_time": "11:00"
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Updates re-run the same checks against the merged record.
    let res = create_period(&app, &auth, json!({
        "name": "Valid", "weekday": 2, "start_time": "10:00", "end_time": "11:00"
    })).await;
    let period_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri(format!("/api/v1/periods/{}", period_id))
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"start_time": "12:00"}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST, "start moved past the existing end");
}

#[tokio::test]
async fn test_period_category_filter_and_detach() {
    let app = TestApp::new().await;
    let auth = app.signup_and_login("carol").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/categories")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"name": "Sport", "color": "#00ff00"}).to_string())).unwrap()
    ).await.unwrap();
    let category_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = create_period(&app, &auth, json!({
        "name": "Gym", "weekday": 1, "start_time": "18:00", "end_time": "19:30",
        "category_id": category_id
    })).await;
    let period_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    create_period(&app, &auth, json!({
        "name": "Reading", "weekday": 4, "start_time": "20:00", "end_time": "21:00"
    })).await;

    // Filter by category
    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(format!("/api/v1/periods?category_id={}", category_id))
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let filtered = parse_body(res).await;
    assert_eq!(filtered.as_array().unwrap().len(), 1);
    assert_eq!(filtered[0]["name"], "Gym");

    // Empty string detaches
    let res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri(format!("/api/v1/periods/{}", period_id))
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"category_id": ""}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(parse_body(res).await["category_id"].is_null());
}
