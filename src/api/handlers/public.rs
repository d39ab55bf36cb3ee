use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    api::state::AppState,
    domain::{Car, Category, ContactRequest, Location},
    error::Result,
    reporting::format_cents,
};

#[derive(Debug, Deserialize)]
pub struct FleetQuery {
    pub category: Option<String>,
}

/// Customer-facing view of a car. Plates and internal flags stay in admin.
#[derive(Debug, Serialize)]
pub struct PublicCar {
    id: Uuid,
    category_id: Option<Uuid>,
    name: String,
    slug: String,
    make: String,
    model: String,
    year: i32,
    seats: i32,
    fuel_type: &'static str,
    transmission: &'static str,
    daily_rate_cents: i64,
    daily_rate: String,
    is_featured: bool,
    description: Option<String>,
    image_url: Option<String>,
}

impl PublicCar {
    fn from_car(car: Car, currency_symbol: &str) -> Self {
        Self {
            daily_rate: format_cents(car.daily_rate_cents, currency_symbol),
            id: car.id,
            category_id: car.category_id,
            name: car.name,
            slug: car.slug,
            make: car.make,
            model: car.model,
            year: car.year,
            seats: car.seats,
            fuel_type: car.fuel_type.label(),
            transmission: car.transmission.label(),
            daily_rate_cents: car.daily_rate_cents,
            is_featured: car.is_featured,
            description: car.description,
            image_url: car.image_url,
        }
    }
}

pub async fn list_cars(
    State(state): State<AppState>,
    Query(query): Query<FleetQuery>,
) -> Result<Json<Vec<PublicCar>>> {
    let cars = state.service_context.fleet_service
        .available_cars(query.category.as_deref())
        .await?;

    let symbol = &state.settings.business.currency_symbol;
    Ok(Json(cars.into_iter().map(|c| PublicCar::from_car(c, symbol)).collect()))
}

pub async fn get_car(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PublicCar>> {
    let car = state.service_context.fleet_service
        .car_by_slug(&slug)
        .await?;

    Ok(Json(PublicCar::from_car(car, &state.settings.business.currency_symbol)))
}

pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = state.service_context.category_repo
        .list(false)
        .await?;

    Ok(Json(categories))
}

pub async fn list_locations(State(state): State<AppState>) -> Result<Json<Vec<Location>>> {
    let locations = state.service_context.location_repo
        .list(false)
        .await?;

    Ok(Json(locations))
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    message: String,
}

pub async fn contact(
    State(state): State<AppState>,
    Json(request): Json<ContactRequest>,
) -> Result<(StatusCode, Json<ContactResponse>)> {
    state.service_context.contact_service
        .submit(request)
        .await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(ContactResponse {
            message: "Thank you, we will be in touch shortly".to_string(),
        }),
    ))
}
