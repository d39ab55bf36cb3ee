use std::sync::Arc;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    domain::{Badge, Colored},
    error::Result,
    reporting::{self, DashboardStats, MonthlyRevenue, Snapshot},
    repository::{BookingRepository, CarRepository, CustomerRepository},
};

/// One row of the "latest bookings" dashboard table.
#[derive(Debug, Clone, Serialize)]
pub struct RecentBooking {
    pub id: Uuid,
    pub reference: String,
    pub customer_name: String,
    pub car_name: String,
    pub pickup_date: DateTime<Utc>,
    pub dropoff_date: DateTime<Utc>,
    pub total_amount_cents: i64,
    pub status: Badge,
}

pub struct DashboardService {
    booking_repo: Arc<dyn BookingRepository>,
    car_repo: Arc<dyn CarRepository>,
    customer_repo: Arc<dyn CustomerRepository>,
}

impl DashboardService {
    pub fn new(
        booking_repo: Arc<dyn BookingRepository>,
        car_repo: Arc<dyn CarRepository>,
        customer_repo: Arc<dyn CustomerRepository>,
    ) -> Self {
        Self { booking_repo, car_repo, customer_repo }
    }

    pub async fn stats(&self) -> Result<DashboardStats> {
        let bookings = self.booking_repo.list_all().await?;
        let cars = self.car_repo.list_all().await?;
        let customers = self.customer_repo.list_all().await?;

        let stats = DashboardStats::compute(&Snapshot {
            bookings: &bookings,
            cars: &cars,
            customers: &customers,
        });
        tracing::debug!(?stats, "Computed dashboard stats");

        Ok(stats)
    }

    pub async fn revenue_series(
        &self,
        months: u32,
        reference: DateTime<Utc>,
    ) -> Result<Vec<MonthlyRevenue>> {
        let bookings = self.booking_repo.list_all().await?;
        Ok(reporting::revenue_by_month(&bookings, months, reference))
    }

    pub async fn recent_bookings(&self, limit: i64) -> Result<Vec<RecentBooking>> {
        let bookings = self.booking_repo.list_recent(limit).await?;
        let mut rows = Vec::with_capacity(bookings.len());

        for booking in bookings {
            let customer_name = self.customer_repo
                .find_by_id(booking.customer_id)
                .await?
                .map(|c| c.full_name())
                .unwrap_or_else(|| "Unknown customer".to_string());

            let car_name = self.car_repo
                .find_by_id(booking.car_id)
                .await?
                .map(|c| c.name)
                .unwrap_or_else(|| "Unknown car".to_string());

            rows.push(RecentBooking {
                id: booking.id,
                reference: booking.reference,
                customer_name,
                car_name,
                pickup_date: booking.pickup_date,
                dropoff_date: booking.dropoff_date,
                total_amount_cents: booking.total_amount_cents,
                status: booking.status.badge(),
            });
        }

        Ok(rows)
    }
}
