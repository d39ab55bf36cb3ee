use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{Booking, BookingFilter, BookingStatus, UpdateBookingRequest},
    error::{AppError, Result},
    repository::{
        ensure_deleted, map_write_error, parse_optional_uuid, parse_uuid, to_utc,
        BookingRepository,
    },
};

const BOOKING_COLUMNS: &str = r#"
    id, reference, customer_id, car_id, pickup_location_id, dropoff_location_id,
    pickup_date, dropoff_date, actual_dropoff_date, daily_rate_cents,
    total_amount_cents, status, balance_due_cents, balance_payment_url, notes,
    created_at, updated_at
"#;

#[derive(FromRow)]
struct BookingRow {
    id: String,
    reference: String,
    customer_id: String,
    car_id: String,
    pickup_location_id: String,
    dropoff_location_id: Option<String>,
    pickup_date: NaiveDateTime,
    dropoff_date: NaiveDateTime,
    actual_dropoff_date: Option<NaiveDateTime>,
    daily_rate_cents: i64,
    total_amount_cents: i64,
    status: String,
    balance_due_cents: Option<i64>,
    balance_payment_url: Option<String>,
    notes: Option<String>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqliteBookingRepository {
    pool: SqlitePool,
}

impl SqliteBookingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_booking(row: BookingRow) -> Result<Booking> {
        Ok(Booking {
            id: parse_uuid(&row.id)?,
            reference: row.reference,
            customer_id: parse_uuid(&row.customer_id)?,
            car_id: parse_uuid(&row.car_id)?,
            pickup_location_id: parse_uuid(&row.pickup_location_id)?,
            dropoff_location_id: parse_optional_uuid(row.dropoff_location_id)?,
            pickup_date: to_utc(row.pickup_date),
            dropoff_date: to_utc(row.dropoff_date),
            actual_dropoff_date: row.actual_dropoff_date.map(to_utc),
            daily_rate_cents: row.daily_rate_cents,
            total_amount_cents: row.total_amount_cents,
            status: row.status.parse()?,
            balance_due_cents: row.balance_due_cents,
            balance_payment_url: row.balance_payment_url,
            notes: row.notes,
            created_at: to_utc(row.created_at),
            updated_at: to_utc(row.updated_at),
        })
    }

    async fn fetch_where(&self, column: &str, value: String) -> Result<Option<Booking>> {
        let sql = format!("SELECT {} FROM bookings WHERE {} = ?", BOOKING_COLUMNS, column);
        let row = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        row.map(Self::row_to_booking).transpose()
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepository {
    async fn create(&self, booking: Booking) -> Result<Booking> {
        sqlx::query(
            r#"
            INSERT INTO bookings (
                id, reference, customer_id, car_id, pickup_location_id,
                dropoff_location_id, pickup_date, dropoff_date, actual_dropoff_date,
                daily_rate_cents, total_amount_cents, status, balance_due_cents,
                balance_payment_url, notes, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(booking.id.to_string())
        .bind(&booking.reference)
        .bind(booking.customer_id.to_string())
        .bind(booking.car_id.to_string())
        .bind(booking.pickup_location_id.to_string())
        .bind(booking.dropoff_location_id.map(|id| id.to_string()))
        .bind(booking.pickup_date.naive_utc())
        .bind(booking.dropoff_date.naive_utc())
        .bind(booking.actual_dropoff_date.map(|dt| dt.naive_utc()))
        .bind(booking.daily_rate_cents)
        .bind(booking.total_amount_cents)
        .bind(booking.status.as_str())
        .bind(booking.balance_due_cents)
        .bind(&booking.balance_payment_url)
        .bind(&booking.notes)
        .bind(booking.created_at.naive_utc())
        .bind(booking.updated_at.naive_utc())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Booking"))?;

        self.find_by_id(booking.id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created booking".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>> {
        self.fetch_where("id", id.to_string()).await
    }

    async fn find_by_reference(&self, reference: &str) -> Result<Option<Booking>> {
        self.fetch_where("reference", reference.to_string()).await
    }

    async fn list(&self, filter: &BookingFilter, limit: i64, offset: i64) -> Result<Vec<Booking>> {
        let sql = format!(
            r#"
            SELECT {} FROM bookings
            WHERE (? IS NULL OR status = ?)
              AND (? IS NULL OR customer_id = ?)
              AND (? IS NULL OR car_id = ?)
            ORDER BY pickup_date DESC
            LIMIT ? OFFSET ?
            "#,
            BOOKING_COLUMNS
        );
        let status = filter.status.map(|s| s.as_str());
        let customer_id = filter.customer_id.map(|id| id.to_string());
        let car_id = filter.car_id.map(|id| id.to_string());

        let rows = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(status)
            .bind(status)
            .bind(&customer_id)
            .bind(&customer_id)
            .bind(&car_id)
            .bind(&car_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter()
            .map(Self::row_to_booking)
            .collect()
    }

    async fn count(&self, filter: &BookingFilter) -> Result<i64> {
        let status = filter.status.map(|s| s.as_str());
        let customer_id = filter.customer_id.map(|id| id.to_string());
        let car_id = filter.car_id.map(|id| id.to_string());

        sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM bookings
            WHERE (? IS NULL OR status = ?)
              AND (? IS NULL OR customer_id = ?)
              AND (? IS NULL OR car_id = ?)
            "#
        )
        .bind(status)
        .bind(status)
        .bind(&customer_id)
        .bind(&customer_id)
        .bind(&car_id)
        .bind(&car_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn list_all(&self) -> Result<Vec<Booking>> {
        let sql = format!("SELECT {} FROM bookings", BOOKING_COLUMNS);
        let rows = sqlx::query_as::<_, BookingRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter()
            .map(Self::row_to_booking)
            .collect()
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<Booking>> {
        let sql = format!(
            "SELECT {} FROM bookings ORDER BY created_at DESC LIMIT ?",
            BOOKING_COLUMNS
        );
        let rows = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter()
            .map(Self::row_to_booking)
            .collect()
    }

    async fn update(&self, id: Uuid, update: UpdateBookingRequest) -> Result<Booking> {
        let result = sqlx::query(
            r#"
            UPDATE bookings
            SET pickup_location_id = COALESCE(?, pickup_location_id),
                dropoff_location_id = CASE WHEN ? THEN ? ELSE dropoff_location_id END,
                pickup_date = COALESCE(?, pickup_date),
                dropoff_date = COALESCE(?, dropoff_date),
                actual_dropoff_date = CASE WHEN ? THEN ? ELSE actual_dropoff_date END,
                daily_rate_cents = COALESCE(?, daily_rate_cents),
                total_amount_cents = COALESCE(?, total_amount_cents),
                status = COALESCE(?, status),
                balance_due_cents = CASE WHEN ? THEN ? ELSE balance_due_cents END,
                balance_payment_url = CASE WHEN ? THEN ? ELSE balance_payment_url END,
                notes = CASE WHEN ? THEN ? ELSE notes END,
                updated_at = ?
            WHERE id = ?
            "#
        )
        .bind(update.pickup_location_id.map(|id| id.to_string()))
        .bind(update.dropoff_location_id.is_some())
        .bind(update.dropoff_location_id.flatten().map(|id| id.to_string()))
        .bind(update.pickup_date.map(|dt| dt.naive_utc()))
        .bind(update.dropoff_date.map(|dt| dt.naive_utc()))
        .bind(update.actual_dropoff_date.is_some())
        .bind(update.actual_dropoff_date.flatten().map(|dt| dt.naive_utc()))
        .bind(update.daily_rate_cents)
        .bind(update.total_amount_cents)
        .bind(update.status.map(|s| s.as_str()))
        .bind(update.balance_due_cents.is_some())
        .bind(update.balance_due_cents.flatten())
        .bind(update.balance_payment_url.is_some())
        .bind(update.balance_payment_url.flatten())
        .bind(update.notes.is_some())
        .bind(update.notes.flatten())
        .bind(Utc::now().naive_utc())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Booking"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Booking not found".to_string()));
        }

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve updated booking".to_string())
        })
    }

    async fn update_status(&self, id: Uuid, status: BookingStatus) -> Result<Booking> {
        self.update(id, UpdateBookingRequest {
            status: Some(status),
            ..Default::default()
        }).await
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "Booking"))?;

        ensure_deleted(result.rows_affected(), "Booking")
    }
}
