use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    api::state::AppState,
    domain::{
        colored_options, options, BookingStatus, CarStatus, FuelType, PaymentMethod,
        PaymentStatus, PaymentType, Transmission,
    },
    error::{AppError, Result},
    reporting::{format_cents, DashboardStats, MonthlyRevenue, RevenueChart},
    service::RecentBooking,
};

const MAX_REVENUE_MONTHS: u32 = 120;

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    stats: DashboardStats,
    total_revenue: String,
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let stats = state.service_context.dashboard_service.stats().await?;
    let total_revenue = format_cents(
        stats.total_revenue_cents,
        &state.settings.business.currency_symbol,
    );

    Ok(Json(StatsResponse { stats, total_revenue }))
}

#[derive(Debug, Deserialize)]
pub struct RevenueQuery {
    months: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct RevenueResponse {
    #[serde(flatten)]
    chart: RevenueChart,
    series: Vec<MonthlyRevenue>,
}

pub async fn revenue(
    State(state): State<AppState>,
    Query(query): Query<RevenueQuery>,
) -> Result<Json<RevenueResponse>> {
    let months = query.months.unwrap_or(state.settings.dashboard.revenue_months);
    if months == 0 || months > MAX_REVENUE_MONTHS {
        return Err(AppError::BadRequest(format!(
            "months must be between 1 and {}",
            MAX_REVENUE_MONTHS
        )));
    }

    let series = state.service_context.dashboard_service
        .revenue_series(months, Utc::now())
        .await?;

    Ok(Json(RevenueResponse {
        chart: RevenueChart::from(series.as_slice()),
        series,
    }))
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    limit: Option<i64>,
}

pub async fn recent_bookings(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<Vec<RecentBooking>>> {
    let limit = query
        .limit
        .unwrap_or(state.settings.dashboard.recent_bookings_limit)
        .clamp(1, 100);

    let rows = state.service_context.dashboard_service
        .recent_bookings(limit)
        .await?;

    Ok(Json(rows))
}

/// Every selectable value for admin forms and filters, with badge colors
/// where the UI shows one.
pub async fn enum_options() -> Json<Value> {
    Json(json!({
        "booking_status": colored_options::<BookingStatus>(),
        "car_status": colored_options::<CarStatus>(),
        "payment_status": colored_options::<PaymentStatus>(),
        "fuel_type": options::<FuelType>(),
        "transmission": options::<Transmission>(),
        "payment_method": options::<PaymentMethod>(),
        "payment_type": options::<PaymentType>(),
    }))
}
