use axum::{extract::{State, Path}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::CreateFollowRequest;
use crate::domain::models::{follow::Follow, user::User};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

fn public_profile(user: &User) -> serde_json::Value {
    serde_json::json!({
        "id": user.id,
        "username": user.username,
        "display_name": user.display_name,
    })
}

pub async fn create_follow(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(payload): Json<CreateFollowRequest>,
) -> Result<impl IntoResponse, AppError> {
    let target = state.user_repo.find_by_username(&payload.username).await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    if target.id == auth.0.id {
        return Err(AppError::Conflict("Cannot follow yourself".into()));
    }
    if state.follow_repo.exists(&auth.0.id, &target.id).await? {
        return Err(AppError::Conflict("Already following this user".into()));
    }

    let follow = Follow::new(auth.0.id.clone(), target.id.clone());
    state.follow_repo.create(&follow).await?;

    info!("User {} now follows {}", auth.0.id, target.id);

    Ok((StatusCode::CREATED, Json(public_profile(&target))))
}

pub async fn list_following(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let users = state.follow_repo.list_following(&auth.0.id).await?;
    let profiles: Vec<_> = users.iter().map(public_profile).collect();
    Ok(Json(profiles))
}

pub async fn list_followers(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let users = state.follow_repo.list_followers(&auth.0.id).await?;
    let profiles: Vec<_> = users.iter().map(public_profile).collect();
    Ok(Json(profiles))
}

pub async fn delete_follow(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let target = state.user_repo.find_by_username(&username).await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    state.follow_repo.delete(&auth.0.id, &target.id).await?;

    info!("User {} unfollowed {}", auth.0.id, target.id);

    Ok(Json(serde_json::json!({"status": "deleted"})))
}
