use axum::{extract::{State, Path, Query}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{CreatePeriodRequest, UpdatePeriodRequest};
use crate::api::handlers::category::ensure_category;
use crate::domain::models::period::Period;
use crate::domain::services::schedule::parse_clock;
use crate::error::AppError;
use std::sync::Arc;
use std::collections::HashMap;
use uuid::Uuid;
use chrono::Utc;
use tracing::info;

fn validate_slot(weekday: i32, start_time: &str, end_time: &str) -> Result<(), AppError> {
    if !(0..=6).contains(&weekday) {
        return Err(AppError::Validation("Weekday must be 0 (Monday) to 6 (Sunday)".into()));
    }
    let Some(start) = parse_clock(start_time) else {
        return Err(AppError::Validation("start_time must be HH:MM".into()));
    };
    let Some(end) = parse_clock(end_time) else {
        return Err(AppError::Validation("end_time must be HH:MM".into()));
    };
    if end <= start {
        return Err(AppError::Validation("end_time must be after start_time".into()));
    }
    Ok(())
}

pub async fn create_period(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(payload): Json<CreatePeriodRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Name cannot be empty".into()));
    }
    validate_slot(payload.weekday, &payload.start_time, &payload.end_time)?;

    let category_id = match payload.category_id {
        Some(id) if !id.is_empty() => Some(ensure_category(&state, &auth.0.id, &id).await?),
        _ => None,
    };

    let period = Period {
        id: Uuid::new_v4().to_string(),
        user_id: auth.0.id.clone(),
        name: payload.name,
        weekday: payload.weekday,
        start_time: payload.start_time,
        end_time: payload.end_time,
        category_id,
        created_at: Utc::now(),
    };

    let created = state.period_repo.create(&period).await?;

    info!("Period created: {}", created.id);

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_periods(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let periods = state.period_repo.list_by_user(&auth.0.id).await?;

    let periods = match params.get("category_id") {
        Some(category_id) => periods
            .into_iter()
            .filter(|period| period.category_id.as_deref() == Some(category_id.as_str()))
            .collect(),
        None => periods,
    };

    Ok(Json(periods))
}

pub async fn update_period(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(period_id): Path<String>,
    Json(payload): Json<UpdatePeriodRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut period = state.period_repo.find_by_id(&auth.0.id, &period_id).await?
        .ok_or(AppError::NotFound("Period not found".into()))?;

    if let Some(val) = payload.name {
        if val.trim().is_empty() {
            return Err(AppError::Validation("Name cannot be empty".into()));
        }
        period.name = val;
    }
    if let Some(val) = payload.weekday { period.weekday = val; }
    if let Some(val) = payload.start_time { period.start_time = val; }
    if let Some(val) = payload.end_time { period.end_time = val; }
    if let Some(val) = payload.category_id {
        period.category_id = if val.is_empty() {
            None
        } else {
            Some(ensure_category(&state, &auth.0.id, &val).await?)
        };
    }

    validate_slot(period.weekday, &period.start_time, &period.end_time)?;

    let updated = state.period_repo.update(&period).await?;

    info!("Period updated: {}", updated.id);

    Ok(Json(updated))
}

pub async fn delete_period(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(period_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.period_repo.delete(&auth.0.id, &period_id).await?;

    info!("Period deleted: {}", period_id);

    Ok(Json(serde_json::json!({"status": "deleted"})))
}
