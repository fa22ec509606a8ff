use axum::{extract::{State, Path, Query}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{CreateEventRequest, UpdateEventRequest};
use crate::api::handlers::category::ensure_category;
use crate::domain::models::event::Event;
use crate::error::AppError;
use std::sync::Arc;
use std::collections::HashMap;
use uuid::Uuid;
use chrono::{DateTime, Utc};
use tracing::info;

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.title.trim().is_empty() {
        return Err(AppError::Validation("Title cannot be empty".into()));
    }
    if payload.ends_at <= payload.starts_at {
        return Err(AppError::Validation("End must be after start".into()));
    }

    let category_id = match payload.category_id {
        Some(id) if !id.is_empty() => Some(ensure_category(&state, &auth.0.id, &id).await?),
        _ => None,
    };

    let event = Event {
        id: Uuid::new_v4().to_string(),
        user_id: auth.0.id.clone(),
        title: payload.title,
        description: payload.description,
        location: payload.location,
        starts_at: payload.starts_at,
        ends_at: payload.ends_at,
        category_id,
        created_at: Utc::now(),
    };

    let created = state.event_repo.create(&event).await?;

    info!("Event created: {}", created.id);

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_events(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let events = match (params.get("start"), params.get("end")) {
        (Some(start), Some(end)) => {
            let start = start.parse::<DateTime<Utc>>()
                .map_err(|_| AppError::Validation("start must be an RFC 3339 timestamp".into()))?;
            let end = end.parse::<DateTime<Utc>>()
                .map_err(|_| AppError::Validation("end must be an RFC 3339 timestamp".into()))?;
            if end <= start {
                return Err(AppError::Validation("end must be after start".into()));
            }
            state.event_repo.list_by_range(&auth.0.id, start, end).await?
        }
        (None, None) => state.event_repo.list_by_user(&auth.0.id).await?,
        _ => return Err(AppError::Validation("start and end must be given together".into())),
    };

    let events = match params.get("category_id") {
        Some(category_id) => events
            .into_iter()
            .filter(|event| event.category_id.as_deref() == Some(category_id.as_str()))
            .collect(),
        None => events,
    };

    Ok(Json(events))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&auth.0.id, &event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    Ok(Json(event))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(event_id): Path<String>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut event = state.event_repo.find_by_id(&auth.0.id, &event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if let Some(val) = payload.title {
        if val.trim().is_empty() {
            return Err(AppError::Validation("Title cannot be empty".into()));
        }
        event.title = val;
    }
    if let Some(val) = payload.description {
        event.description = (!val.is_empty()).then_some(val);
    }
    if let Some(val) = payload.location {
        event.location = (!val.is_empty()).then_some(val);
    }
    if let Some(val) = payload.starts_at { event.starts_at = val; }
    if let Some(val) = payload.ends_at { event.ends_at = val; }
    if let Some(val) = payload.category_id {
        event.category_id = if val.is_empty() {
            None
        } else {
            Some(ensure_category(&state, &auth.0.id, &val).await?)
        };
    }

    if event.ends_at <= event.starts_at {
        return Err(AppError::Validation("End must be after start".into()));
    }

    let updated = state.event_repo.update(&event).await?;

    info!("Event updated: {}", updated.id);

    Ok(Json(updated))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.event_repo.delete(&auth.0.id, &event_id).await?;

    info!("Event deleted: {}", event_id);

    Ok(Json(serde_json::json!({"status": "deleted"})))
}
