use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put, delete},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{health, auth, profile, event, period, category, calendar, follow, share, ics};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/v1/auth/signup", post(auth::signup))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route("/api/v1/auth/logout", post(auth::logout))

        // Profile
        .route("/api/v1/me", get(profile::get_me).put(profile::update_me))
        .route("/api/v1/users/{username}", get(profile::get_user))

        // Events
        .route("/api/v1/events", post(event::create_event).get(event::list_events))
        .route("/api/v1/events/{event_id}", get(event::get_event).put(event::update_event).delete(event::delete_event))

        // Periods
        .route("/api/v1/periods", post(period::create_period).get(period::list_periods))
        .route("/api/v1/periods/{period_id}", put(period::update_period).delete(period::delete_period))

        // Categories
        .route("/api/v1/categories", post(category::create_category).get(category::list_categories))
        .route("/api/v1/categories/{category_id}", put(category::update_category).delete(category::delete_category))

        // Week views
        .route("/api/v1/calendar/week", get(calendar::get_week))
        .route("/api/v1/users/{username}/calendar/week", get(calendar::get_user_week))

        // Follows
        .route("/api/v1/follows", post(follow::create_follow).get(follow::list_following))
        .route("/api/v1/followers", get(follow::list_followers))
        .route("/api/v1/follows/{username}", delete(follow::delete_follow))

        // Shares
        .route("/api/v1/shares", post(share::create_share).get(share::list_shares))
        .route("/api/v1/shares/{share_id}", delete(share::delete_share))

        // ICS export / import, plus the public token feed
        .route("/api/v1/export/calendar.ics", get(ics::export_calendar))
        .route("/api/v1/import/ics", post(ics::import_ics))
        .route("/api/v1/ics/{token}", get(ics::shared_calendar))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
