use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    api::{handlers::ListParams, state::AppState},
    domain::{Badge, Colored, CreatePaymentRequest, Payment, PaymentStatus},
    error::{AppError, Result},
};

#[derive(Debug, Serialize)]
pub struct ListResponse {
    payments: Vec<PaymentDto>,
    total: i64,
}

#[derive(Debug, Serialize)]
pub struct PaymentDto {
    id: Uuid,
    booking_id: Uuid,
    amount_cents: i64,
    payment_method: &'static str,
    payment_method_label: &'static str,
    payment_type: &'static str,
    payment_type_label: &'static str,
    status: Badge,
    transaction_id: Option<String>,
    paid_at: Option<String>,
    notes: Option<String>,
    created_at: String,
}

impl From<Payment> for PaymentDto {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            booking_id: payment.booking_id,
            amount_cents: payment.amount_cents,
            payment_method: payment.payment_method.as_str(),
            payment_method_label: payment.payment_method.label(),
            payment_type: payment.payment_type.as_str(),
            payment_type_label: payment.payment_type.label(),
            status: payment.status.badge(),
            transaction_id: payment.transaction_id,
            paid_at: payment.paid_at.map(|dt| dt.to_rfc3339()),
            notes: payment.notes,
            created_at: payment.created_at.to_rfc3339(),
        }
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>> {
    let payments = state.service_context.payment_repo
        .list(params.limit, params.offset)
        .await?;

    let total = state.service_context.payment_repo.count().await?;
    let payments: Vec<PaymentDto> = payments.into_iter().map(Into::into).collect();

    Ok(Json(ListResponse { payments, total }))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PaymentDto>> {
    let payment = state.service_context.payment_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Payment not found".to_string()))?;

    Ok(Json(payment.into()))
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreatePaymentRequest>,
) -> Result<(StatusCode, Json<PaymentDto>)> {
    if request.amount_cents <= 0 {
        return Err(AppError::BadRequest("Payment amount must be positive".to_string()));
    }

    let booking = state.service_context.booking_repo
        .find_by_id(request.booking_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    let payment = state.service_context.payment_repo
        .create(request)
        .await?;

    tracing::info!(
        reference = %booking.reference,
        amount_cents = payment.amount_cents,
        status = %payment.status,
        "Payment recorded"
    );

    Ok((StatusCode::CREATED, Json(payment.into())))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    status: String,
}

pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<StatusUpdate>,
) -> Result<Json<PaymentDto>> {
    let status: PaymentStatus = body.status.parse()?;

    let payment = state.service_context.payment_repo
        .update_status(id, status)
        .await?;

    Ok(Json(payment.into()))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state.service_context.payment_repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
