use axum::{extract::{State, Path}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{CreateCategoryRequest, UpdateCategoryRequest};
use crate::domain::models::category::Category;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

/// Checks that a category id exists and belongs to `user_id`.
pub(crate) async fn ensure_category(
    state: &AppState,
    user_id: &str,
    id: &str,
) -> Result<String, AppError> {
    state.category_repo.find_by_id(user_id, id).await?
        .ok_or_else(|| AppError::Validation("Unknown category".into()))?;
    Ok(id.to_string())
}

pub async fn create_category(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Name cannot be empty".into()));
    }

    let category = Category::new(
        auth.0.id.clone(),
        payload.name,
        payload.color,
        payload.is_private.unwrap_or(false),
    );
    let created = state.category_repo.create(&category).await?;

    info!("Category created: {}", created.id);

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_categories(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let categories = state.category_repo.list_by_user(&auth.0.id).await?;
    Ok(Json(categories))
}

pub async fn update_category(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(category_id): Path<String>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut category = state.category_repo.find_by_id(&auth.0.id, &category_id).await?
        .ok_or(AppError::NotFound("Category not found".into()))?;

    if let Some(val) = payload.name {
        if val.trim().is_empty() {
            return Err(AppError::Validation("Name cannot be empty".into()));
        }
        category.name = val;
    }
    if let Some(val) = payload.color { category.color = val; }
    if let Some(val) = payload.is_private { category.is_private = val; }

    let updated = state.category_repo.update(&category).await?;

    info!("Category updated: {}", updated.id);

    Ok(Json(updated))
}

pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(category_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.category_repo.delete(&auth.0.id, &category_id).await?;

    info!("Category deleted: {}", category_id);

    Ok(Json(serde_json::json!({"status": "deleted"})))
}
