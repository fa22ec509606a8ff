use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::responses::{DayView, WeekResponse};
use crate::domain::models::user::User;
use crate::domain::services::{schedule, visibility};
use crate::error::AppError;
use std::sync::Arc;
use std::collections::HashMap;
use chrono::{Duration, NaiveDate, Utc};
use chrono_tz::Tz;

/// Stored timezones are validated on write; treat anything that no longer
/// parses as UTC rather than failing the request.
pub(crate) fn user_tz(user: &User) -> Tz {
    user.timezone.parse().unwrap_or(chrono_tz::UTC)
}

/// The caller's own week: every event and period, in their timezone.
pub async fn get_week(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let week = build_week(&state, &auth.0, user_tz(&auth.0), params.get("start"), false).await?;
    Ok(Json(week))
}

/// Another user's week, rendered in the viewer's timezone. Requires the
/// viewer to follow the owner; private categories stay hidden.
pub async fn get_user_week(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(username): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let owner = state.user_repo.find_by_username(&username).await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    if owner.id == auth.0.id {
        let week = build_week(&state, &owner, user_tz(&auth.0), params.get("start"), false).await?;
        return Ok(Json(week));
    }

    if !state.follow_repo.exists(&auth.0.id, &owner.id).await? {
        return Err(AppError::Forbidden("You do not follow this user".into()));
    }

    let week = build_week(&state, &owner, user_tz(&auth.0), params.get("start"), true).await?;
    Ok(Json(week))
}

async fn build_week(
    state: &AppState,
    owner: &User,
    tz: Tz,
    start_param: Option<&String>,
    shared_only: bool,
) -> Result<WeekResponse, AppError> {
    let reference = match start_param {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| AppError::Validation("start must be a YYYY-MM-DD date".into()))?,
        None => Utc::now().with_timezone(&tz).date_naive(),
    };
    let monday = schedule::week_start(reference);

    // Fetch one local week of events; periods recur and are fetched whole.
    let range_start = schedule::day_start_utc(monday, tz);
    let range_end = schedule::day_start_utc(monday + Duration::days(7), tz);

    let mut events = state.event_repo.list_by_range(&owner.id, range_start, range_end).await?;
    let mut periods = state.period_repo.list_by_user(&owner.id).await?;

    if shared_only {
        let categories = state.category_repo.list_by_user(&owner.id).await?;
        events = visibility::shared_events(events, &categories);
        periods = visibility::shared_periods(periods, &categories);
    }

    let event_days = schedule::events_by_day(&events, monday, tz);
    let period_days = schedule::periods_by_day(&periods);

    let days = event_days
        .into_iter()
        .zip(period_days)
        .enumerate()
        .map(|(offset, (events, periods))| DayView {
            date: monday + Duration::days(offset as i64),
            events,
            periods,
        })
        .collect();

    Ok(WeekResponse { week_start: monday, days })
}
