use axum::{extract::{State, Path}, response::IntoResponse, Json, http::{header, StatusCode}};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::responses::ImportSummary;
use crate::api::handlers::calendar::user_tz;
use crate::domain::models::{event::Event, period::Period, user::User};
use crate::domain::services::{ics, visibility};
use crate::error::AppError;
use std::sync::Arc;
use uuid::Uuid;
use chrono::Utc;
use tracing::info;

fn ics_response(body: String) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/calendar; charset=utf-8")],
        body,
    )
}

/// The authenticated export: everything the owner has, private included.
pub async fn export_calendar(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_repo.list_by_user(&auth.0.id).await?;
    let periods = state.period_repo.list_by_user(&auth.0.id).await?;

    let body = ics::calendar_ics(&auth.0.display_name, &events, &periods);

    Ok(ics_response(body))
}

/// Public feed behind a share token. Serves the owner's visible calendar
/// until the share is revoked; an unknown token is indistinguishable from
/// a revoked one.
pub async fn shared_calendar(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let share = state.share_repo.find_by_token(&token).await?
        .ok_or(AppError::NotFound("Unknown share token".into()))?;

    let owner = state.user_repo.find_by_id(&share.user_id).await?
        .ok_or(AppError::NotFound("Unknown share token".into()))?;

    let categories = state.category_repo.list_by_user(&owner.id).await?;
    let events = visibility::shared_events(
        state.event_repo.list_by_user(&owner.id).await?,
        &categories,
    );
    let periods = visibility::shared_periods(
        state.period_repo.list_by_user(&owner.id).await?,
        &categories,
    );

    let body = ics::calendar_ics(&owner.display_name, &events, &periods);

    Ok(ics_response(body))
}

pub async fn import_ics(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    body: String,
) -> Result<impl IntoResponse, AppError> {
    let parsed = ics::parse_calendar(&body, user_tz(&auth.0))?;

    let mut summary = ImportSummary {
        events_imported: 0,
        periods_imported: 0,
        skipped: parsed.skipped,
    };

    for imported in parsed.events {
        let event = event_from_import(&auth.0, imported);
        state.event_repo.create(&event).await?;
        summary.events_imported += 1;
    }

    for imported in parsed.periods {
        let period = period_from_import(&auth.0, imported);
        state.period_repo.create(&period).await?;
        summary.periods_imported += 1;
    }

    info!(
        "Imported {} events and {} periods for user {} ({} skipped)",
        summary.events_imported, summary.periods_imported, auth.0.id, summary.skipped
    );

    Ok((StatusCode::CREATED, Json(summary)))
}

fn event_from_import(owner: &User, imported: ics::ImportedEvent) -> Event {
    Event {
        id: Uuid::new_v4().to_string(),
        user_id: owner.id.clone(),
        title: imported.title,
        description: imported.description,
        location: imported.location,
        starts_at: imported.starts_at,
        ends_at: imported.ends_at,
        category_id: None,
        created_at: Utc::now(),
    }
}

fn period_from_import(owner: &User, imported: ics::ImportedPeriod) -> Period {
    Period {
        id: Uuid::new_v4().to_string(),
        user_id: owner.id.clone(),
        name: imported.name,
        weekday: imported.weekday,
        start_time: imported.start_time,
        end_time: imported.end_time,
        category_id: None,
        created_at: Utc::now(),
    }
}
