use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    api::{handlers::ListParams, state::AppState},
    domain::{CreateCustomerRequest, Customer, UpdateCustomerRequest},
    error::{AppError, Result},
};

#[derive(Debug, Serialize)]
pub struct ListResponse {
    customers: Vec<CustomerDto>,
    total: i64,
}

#[derive(Debug, Serialize)]
pub struct CustomerDto {
    #[serde(flatten)]
    customer: Customer,
    full_name: String,
}

impl From<Customer> for CustomerDto {
    fn from(customer: Customer) -> Self {
        let full_name = customer.full_name();
        Self { customer, full_name }
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>> {
    let customers = state.service_context.customer_repo
        .list(params.limit, params.offset)
        .await?;

    let total = state.service_context.customer_repo.count().await?;
    let customers: Vec<CustomerDto> = customers.into_iter().map(Into::into).collect();

    Ok(Json(ListResponse { customers, total }))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CustomerDto>> {
    let customer = state.service_context.customer_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;

    Ok(Json(customer.into()))
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<CustomerDto>)> {
    request.validate()?;

    if state.service_context.customer_repo
        .find_by_email(&request.email)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("A customer with this email already exists".to_string()));
    }

    let customer = state.service_context.customer_repo
        .create(request)
        .await?;

    Ok((StatusCode::CREATED, Json(customer.into())))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCustomerRequest>,
) -> Result<Json<CustomerDto>> {
    let customer = state.service_context.customer_repo
        .update(id, request)
        .await?;

    Ok(Json(customer.into()))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state.service_context.customer_repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
