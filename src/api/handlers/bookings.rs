use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    api::{handlers::{payments::PaymentDto, ListParams}, state::AppState},
    domain::{
        Badge, Booking, BookingFilter, BookingStatus, Colored, CreateBookingRequest,
        UpdateBookingRequest,
    },
    error::{AppError, Result},
};

#[derive(Debug, Serialize)]
pub struct ListResponse {
    bookings: Vec<BookingDto>,
    total: i64,
}

#[derive(Debug, Serialize)]
pub struct BookingDto {
    id: Uuid,
    reference: String,
    customer_id: Uuid,
    car_id: Uuid,
    pickup_location_id: Uuid,
    dropoff_location_id: Option<Uuid>,
    pickup_date: String,
    dropoff_date: String,
    actual_dropoff_date: Option<String>,
    rental_days: i64,
    daily_rate_cents: i64,
    total_amount_cents: i64,
    status: Badge,
    balance_due_cents: Option<i64>,
    balance_payment_url: Option<String>,
    notes: Option<String>,
    created_at: String,
    updated_at: String,
}

impl From<Booking> for BookingDto {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            rental_days: booking.rental_days(),
            balance_due_cents: booking.balance_due(),
            balance_payment_url: booking.balance_payment_url().map(str::to_string),
            reference: booking.reference,
            customer_id: booking.customer_id,
            car_id: booking.car_id,
            pickup_location_id: booking.pickup_location_id,
            dropoff_location_id: booking.dropoff_location_id,
            pickup_date: booking.pickup_date.to_rfc3339(),
            dropoff_date: booking.dropoff_date.to_rfc3339(),
            actual_dropoff_date: booking.actual_dropoff_date.map(|dt| dt.to_rfc3339()),
            daily_rate_cents: booking.daily_rate_cents,
            total_amount_cents: booking.total_amount_cents,
            status: booking.status.badge(),
            notes: booking.notes,
            created_at: booking.created_at.to_rfc3339(),
            updated_at: booking.updated_at.to_rfc3339(),
        }
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<BookingFilter>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>> {
    let bookings = state.service_context.booking_repo
        .list(&filter, params.limit, params.offset)
        .await?;

    let total = state.service_context.booking_repo.count(&filter).await?;
    let bookings: Vec<BookingDto> = bookings.into_iter().map(Into::into).collect();

    Ok(Json(ListResponse { bookings, total }))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingDto>> {
    let booking = state.service_context.booking_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    Ok(Json(booking.into()))
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingDto>)> {
    let booking = state.service_context.booking_service
        .create_booking(request)
        .await?;

    Ok((StatusCode::CREATED, Json(booking.into())))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBookingRequest>,
) -> Result<Json<BookingDto>> {
    let booking = state.service_context.booking_service
        .update_booking(id, request)
        .await?;

    Ok(Json(booking.into()))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    status: String,
}

pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<StatusUpdate>,
) -> Result<Json<BookingDto>> {
    let status: BookingStatus = body.status.parse()?;

    let booking = state.service_context.booking_repo
        .update_status(id, status)
        .await?;

    tracing::info!(reference = %booking.reference, status = %status, "Booking status changed");

    Ok(Json(booking.into()))
}

pub async fn send_reminder(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingDto>> {
    let booking = state.service_context.booking_service
        .send_payment_reminder(id)
        .await?;

    Ok(Json(booking.into()))
}

pub async fn payments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<PaymentDto>>> {
    state.service_context.booking_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    let payments = state.service_context.payment_repo
        .find_by_booking(id)
        .await?;

    Ok(Json(payments.into_iter().map(Into::into).collect()))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state.service_context.booking_repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
