use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    api::{handlers::IncludeInactive, state::AppState},
    domain::{CreateLocationRequest, Location, UpdateLocationRequest},
    error::{AppError, Result},
};

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<IncludeInactive>,
) -> Result<Json<Vec<Location>>> {
    let locations = state.service_context.location_repo
        .list(params.include_inactive)
        .await?;

    Ok(Json(locations))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Location>> {
    let location = state.service_context.location_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Location not found".to_string()))?;

    Ok(Json(location))
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateLocationRequest>,
) -> Result<(StatusCode, Json<Location>)> {
    if request.name.trim().is_empty() || request.city.trim().is_empty() {
        return Err(AppError::BadRequest("Location name and city are required".to_string()));
    }

    let location = state.service_context.location_repo
        .create(request)
        .await?;

    Ok((StatusCode::CREATED, Json(location)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateLocationRequest>,
) -> Result<Json<Location>> {
    let location = state.service_context.location_repo
        .update(id, request)
        .await?;

    Ok(Json(location))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state.service_context.location_repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
