use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::UpdateProfileRequest;
use std::sync::Arc;
use crate::error::AppError;
use tracing::info;

pub async fn get_me(auth: AuthUser) -> impl IntoResponse {
    Json(auth.0)
}

pub async fn update_me(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut user = auth.0;

    if let Some(display_name) = payload.display_name {
        if display_name.trim().is_empty() {
            return Err(AppError::Validation("Display name cannot be empty".into()));
        }
        user.display_name = display_name;
    }
    if let Some(timezone) = payload.timezone {
        if timezone.parse::<chrono_tz::Tz>().is_err() {
            return Err(AppError::Validation(format!("Unknown timezone: {}", timezone)));
        }
        user.timezone = timezone;
    }

    let updated = state.user_repo.update(&user).await?;

    info!("Updated profile for user: {}", updated.id);

    Ok(Json(updated))
}

/// Public profile lookup; exposes only what a visitor may see.
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.user_repo.find_by_username(&username).await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    Ok(Json(serde_json::json!({
        "id": user.id,
        "username": user.username,
        "display_name": user.display_name,
    })))
}
