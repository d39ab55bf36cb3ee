use std::sync::Arc;
use uuid::Uuid;
use chrono::Utc;
use crate::{
    config::BusinessConfig,
    domain::*,
    error::{AppError, Result},
    notifications::{self, Mailer},
    repository::{BookingRepository, CarRepository, CustomerRepository, LocationRepository},
};

pub struct BookingService {
    booking_repo: Arc<dyn BookingRepository>,
    car_repo: Arc<dyn CarRepository>,
    customer_repo: Arc<dyn CustomerRepository>,
    location_repo: Arc<dyn LocationRepository>,
    mailer: Arc<dyn Mailer>,
    business: BusinessConfig,
}

impl BookingService {
    pub fn new(
        booking_repo: Arc<dyn BookingRepository>,
        car_repo: Arc<dyn CarRepository>,
        customer_repo: Arc<dyn CustomerRepository>,
        location_repo: Arc<dyn LocationRepository>,
        mailer: Arc<dyn Mailer>,
        business: BusinessConfig,
    ) -> Self {
        Self { booking_repo, car_repo, customer_repo, location_repo, mailer, business }
    }

    pub async fn create_booking(&self, request: CreateBookingRequest) -> Result<Booking> {
        if request.dropoff_date < request.pickup_date {
            return Err(AppError::BadRequest(
                "Dropoff date must not be before pickup date".to_string()
            ));
        }

        let customer = self.customer_repo.find_by_id(request.customer_id).await?
            .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;

        let car = self.car_repo.find_by_id(request.car_id).await?
            .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

        if !car.is_active {
            return Err(AppError::BadRequest(format!("{} is not in the active fleet", car.name)));
        }

        self.location_repo.find_by_id(request.pickup_location_id).await?
            .ok_or_else(|| AppError::NotFound("Pickup location not found".to_string()))?;

        if let Some(dropoff_location_id) = request.dropoff_location_id {
            self.location_repo.find_by_id(dropoff_location_id).await?
                .ok_or_else(|| AppError::NotFound("Dropoff location not found".to_string()))?;
        }

        let daily_rate_cents = request.daily_rate_cents.unwrap_or(car.daily_rate_cents);
        let days = rental_days(request.pickup_date, request.dropoff_date);
        let total_amount_cents = match request.total_amount_cents {
            Some(total) => total,
            None => daily_rate_cents.checked_mul(days)
                .ok_or_else(|| AppError::BadRequest("Booking total is too large".to_string()))?,
        };

        if daily_rate_cents < 0 || total_amount_cents < 0 {
            return Err(AppError::BadRequest("Amounts cannot be negative".to_string()));
        }

        let now = Utc::now();
        let booking = Booking {
            id: Uuid::new_v4(),
            reference: generate_reference(),
            customer_id: customer.id,
            car_id: car.id,
            pickup_location_id: request.pickup_location_id,
            dropoff_location_id: request.dropoff_location_id,
            pickup_date: request.pickup_date,
            dropoff_date: request.dropoff_date,
            actual_dropoff_date: None,
            daily_rate_cents,
            total_amount_cents,
            status: request.status.unwrap_or(BookingStatus::Pending),
            balance_due_cents: None,
            balance_payment_url: None,
            notes: request.notes,
            created_at: now,
            updated_at: now,
        };

        let booking = self.booking_repo.create(booking).await?;
        tracing::info!(reference = %booking.reference, "Booking created");

        // A failed confirmation must not undo the booking
        let mail = notifications::booking_confirmation(&booking, &customer, &car, &self.business);
        if let Err(e) = self.mailer.send(mail).await {
            tracing::warn!(
                reference = %booking.reference,
                "Failed to send booking confirmation via {}: {}",
                self.mailer.name(),
                e
            );
        }

        Ok(booking)
    }

    /// Applies a partial update after checking the merged booking still has
    /// a dropoff on or after pickup and no negative amounts.
    pub async fn update_booking(&self, id: Uuid, request: UpdateBookingRequest) -> Result<Booking> {
        let mut merged = self.booking_repo.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        if let Some(location_id) = request.pickup_location_id {
            self.location_repo.find_by_id(location_id).await?
                .ok_or_else(|| AppError::NotFound("Pickup location not found".to_string()))?;
        }

        if let Some(Some(location_id)) = request.dropoff_location_id {
            self.location_repo.find_by_id(location_id).await?
                .ok_or_else(|| AppError::NotFound("Dropoff location not found".to_string()))?;
        }

        request.clone().apply_to(&mut merged);
        merged.check_consistency().map_err(AppError::BadRequest)?;

        let booking = self.booking_repo.update(id, request).await?;
        tracing::info!(reference = %booking.reference, status = %booking.status, "Booking updated");

        Ok(booking)
    }

    pub async fn send_payment_reminder(&self, id: Uuid) -> Result<Booking> {
        let booking = self.booking_repo.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        let customer = self.customer_repo.find_by_id(booking.customer_id).await?
            .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;

        let mail = notifications::payment_reminder(&booking, &customer, &self.business)?;
        self.mailer.send(mail).await?;

        tracing::info!(reference = %booking.reference, "Payment reminder sent");
        Ok(booking)
    }
}
