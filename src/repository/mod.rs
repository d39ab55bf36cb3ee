use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use uuid::Uuid;
use crate::domain::*;
use crate::error::{AppError, Result};

pub mod booking_repository;
pub mod car_repository;
pub mod category_repository;
pub mod customer_repository;
pub mod location_repository;
pub mod payment_repository;

pub use booking_repository::SqliteBookingRepository;
pub use car_repository::SqliteCarRepository;
pub use category_repository::SqliteCategoryRepository;
pub use customer_repository::SqliteCustomerRepository;
pub use location_repository::SqliteLocationRepository;
pub use payment_repository::SqlitePaymentRepository;

#[async_trait]
pub trait CarRepository: Send + Sync {
    async fn create(&self, request: CreateCarRequest) -> Result<Car>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Car>>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Car>>;
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Car>>;
    async fn count(&self) -> Result<i64>;
    async fn list_all(&self) -> Result<Vec<Car>>;
    /// Active cars with status `Available`, optionally within one category.
    async fn list_bookable(&self, category_id: Option<Uuid>) -> Result<Vec<Car>>;
    async fn update(&self, id: Uuid, update: UpdateCarRequest) -> Result<Car>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, request: CreateCategoryRequest) -> Result<Category>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>>;
    async fn list(&self, include_inactive: bool) -> Result<Vec<Category>>;
    async fn update(&self, id: Uuid, update: UpdateCategoryRequest) -> Result<Category>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn create(&self, request: CreateLocationRequest) -> Result<Location>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Location>>;
    async fn list(&self, include_inactive: bool) -> Result<Vec<Location>>;
    async fn update(&self, id: Uuid, update: UpdateLocationRequest) -> Result<Location>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn create(&self, request: CreateCustomerRequest) -> Result<Customer>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>>;
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Customer>>;
    async fn count(&self) -> Result<i64>;
    async fn list_all(&self) -> Result<Vec<Customer>>;
    async fn update(&self, id: Uuid, update: UpdateCustomerRequest) -> Result<Customer>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: Booking) -> Result<Booking>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>>;
    async fn find_by_reference(&self, reference: &str) -> Result<Option<Booking>>;
    async fn list(&self, filter: &BookingFilter, limit: i64, offset: i64) -> Result<Vec<Booking>>;
    /// Number of bookings matching `filter`, ignoring paging.
    async fn count(&self, filter: &BookingFilter) -> Result<i64>;
    async fn list_all(&self) -> Result<Vec<Booking>>;
    async fn list_recent(&self, limit: i64) -> Result<Vec<Booking>>;
    async fn update(&self, id: Uuid, update: UpdateBookingRequest) -> Result<Booking>;
    async fn update_status(&self, id: Uuid, status: BookingStatus) -> Result<Booking>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn create(&self, request: CreatePaymentRequest) -> Result<Payment>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>>;
    async fn find_by_booking(&self, booking_id: Uuid) -> Result<Vec<Payment>>;
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Payment>>;
    async fn count(&self) -> Result<i64>;
    async fn update_status(&self, id: Uuid, status: PaymentStatus) -> Result<Payment>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

pub(crate) fn parse_uuid(s: &str) -> Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| AppError::Database(e.to_string()))
}

pub(crate) fn parse_optional_uuid(s: Option<String>) -> Result<Option<Uuid>> {
    s.as_deref().map(parse_uuid).transpose()
}

pub(crate) fn to_utc(dt: NaiveDateTime) -> DateTime<Utc> {
    DateTime::from_naive_utc_and_offset(dt, Utc)
}

/// Turns constraint violations on insert/update/delete into client errors.
pub(crate) fn map_write_error(err: sqlx::Error, entity: &str) -> AppError {
    if let sqlx::Error::Database(ref db) = err {
        if db.is_unique_violation() {
            return AppError::Conflict(format!("{} already exists", entity));
        }
        if db.is_foreign_key_violation() {
            return AppError::Conflict(format!("{} conflicts with related records", entity));
        }
    }
    AppError::Database(err.to_string())
}

pub(crate) fn ensure_deleted(rows_affected: u64, entity: &str) -> Result<()> {
    if rows_affected == 0 {
        return Err(AppError::NotFound(format!("{} not found", entity)));
    }
    Ok(())
}
