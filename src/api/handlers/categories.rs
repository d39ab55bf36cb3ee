use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    api::{handlers::IncludeInactive, state::AppState},
    domain::{Category, CreateCategoryRequest, UpdateCategoryRequest},
    error::{AppError, Result},
};

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<IncludeInactive>,
) -> Result<Json<Vec<Category>>> {
    let categories = state.service_context.category_repo
        .list(params.include_inactive)
        .await?;

    Ok(Json(categories))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Category>> {
    let category = state.service_context.category_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

    Ok(Json(category))
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>)> {
    if request.name.trim().is_empty() {
        return Err(AppError::BadRequest("Category name is required".to_string()));
    }

    let category = state.service_context.category_repo
        .create(request)
        .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCategoryRequest>,
) -> Result<Json<Category>> {
    let category = state.service_context.category_repo
        .update(id, request)
        .await?;

    Ok(Json(category))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state.service_context.category_repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
