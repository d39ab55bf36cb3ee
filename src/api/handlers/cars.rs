use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    api::{handlers::ListParams, state::AppState},
    domain::{Badge, Car, Colored, CreateCarRequest, UpdateCarRequest},
    error::{AppError, Result},
};

#[derive(Debug, Serialize)]
pub struct ListResponse {
    cars: Vec<CarDto>,
    total: i64,
}

#[derive(Debug, Serialize)]
pub struct CarDto {
    id: Uuid,
    category_id: Option<Uuid>,
    name: String,
    slug: String,
    make: String,
    model: String,
    year: i32,
    license_plate: String,
    seats: i32,
    fuel_type: &'static str,
    fuel_type_label: &'static str,
    transmission: &'static str,
    transmission_label: &'static str,
    daily_rate_cents: i64,
    status: Badge,
    is_active: bool,
    is_featured: bool,
    bookable: bool,
    description: Option<String>,
    image_url: Option<String>,
    created_at: String,
    updated_at: String,
}

impl From<Car> for CarDto {
    fn from(car: Car) -> Self {
        let bookable = car.is_bookable();
        Self {
            id: car.id,
            category_id: car.category_id,
            name: car.name,
            slug: car.slug,
            make: car.make,
            model: car.model,
            year: car.year,
            license_plate: car.license_plate,
            seats: car.seats,
            fuel_type: car.fuel_type.as_str(),
            fuel_type_label: car.fuel_type.label(),
            transmission: car.transmission.as_str(),
            transmission_label: car.transmission.label(),
            daily_rate_cents: car.daily_rate_cents,
            status: car.status.badge(),
            is_active: car.is_active,
            is_featured: car.is_featured,
            bookable,
            description: car.description,
            image_url: car.image_url,
            created_at: car.created_at.to_rfc3339(),
            updated_at: car.updated_at.to_rfc3339(),
        }
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>> {
    let cars = state.service_context.car_repo
        .list(params.limit, params.offset)
        .await?;

    let total = state.service_context.car_repo.count().await?;
    let cars: Vec<CarDto> = cars.into_iter().map(Into::into).collect();

    Ok(Json(ListResponse { cars, total }))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CarDto>> {
    let car = state.service_context.car_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

    Ok(Json(car.into()))
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateCarRequest>,
) -> Result<(StatusCode, Json<CarDto>)> {
    if request.daily_rate_cents < 0 {
        return Err(AppError::BadRequest("Daily rate cannot be negative".to_string()));
    }

    if let Some(category_id) = request.category_id {
        state.service_context.category_repo
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;
    }

    let car = state.service_context.car_repo
        .create(request)
        .await?;

    tracing::info!(slug = %car.slug, "Car added to fleet");

    Ok((StatusCode::CREATED, Json(car.into())))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCarRequest>,
) -> Result<Json<CarDto>> {
    if matches!(request.daily_rate_cents, Some(rate) if rate < 0) {
        return Err(AppError::BadRequest("Daily rate cannot be negative".to_string()));
    }

    let car = state.service_context.car_repo
        .update(id, request)
        .await?;

    Ok(Json(car.into()))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state.service_context.car_repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
