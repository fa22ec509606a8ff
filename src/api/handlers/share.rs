use axum::{extract::{State, Path}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::CreateShareRequest;
use crate::domain::models::share::Share;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_share(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(payload): Json<CreateShareRequest>,
) -> Result<impl IntoResponse, AppError> {
    let share = Share::new(auth.0.id.clone(), payload.label);
    let created = state.share_repo.create(&share).await?;

    info!("Share created: {} for user {}", created.id, created.user_id);

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_shares(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let shares = state.share_repo.list_by_user(&auth.0.id).await?;
    Ok(Json(shares))
}

pub async fn delete_share(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(share_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.share_repo.delete(&auth.0.id, &share_id).await?;

    info!("Share revoked: {}", share_id);

    Ok(Json(serde_json::json!({"status": "revoked"})))
}
