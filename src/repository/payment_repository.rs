use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use sqlx::{SqlitePool, FromRow};
use uuid::Uuid;

use crate::{
    domain::{CreatePaymentRequest, Payment, PaymentStatus},
    error::{AppError, Result},
    repository::{ensure_deleted, map_write_error, parse_uuid, to_utc, PaymentRepository},
};

#[derive(FromRow)]
struct PaymentRow {
    id: String,
    booking_id: String,
    amount_cents: i64,
    payment_method: String,
    payment_type: String,
    status: String,
    transaction_id: Option<String>,
    paid_at: Option<NaiveDateTime>,
    notes: Option<String>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqlitePaymentRepository {
    pool: SqlitePool,
}

impl SqlitePaymentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_payment(row: PaymentRow) -> Result<Payment> {
        Ok(Payment {
            id: parse_uuid(&row.id)?,
            booking_id: parse_uuid(&row.booking_id)?,
            amount_cents: row.amount_cents,
            payment_method: row.payment_method.parse()?,
            payment_type: row.payment_type.parse()?,
            status: row.status.parse()?,
            transaction_id: row.transaction_id,
            paid_at: row.paid_at.map(to_utc),
            notes: row.notes,
            created_at: to_utc(row.created_at),
            updated_at: to_utc(row.updated_at),
        })
    }
}

#[async_trait]
impl PaymentRepository for SqlitePaymentRepository {
    async fn create(&self, request: CreatePaymentRequest) -> Result<Payment> {
        let id = Uuid::new_v4();
        let now = Utc::now().naive_utc();
        let status = request.status.unwrap_or(PaymentStatus::Pending);

        // Completed payments without an explicit timestamp are treated as paid now
        let paid_at = match (request.paid_at, status) {
            (Some(dt), _) => Some(dt.naive_utc()),
            (None, PaymentStatus::Completed) => Some(now),
            (None, _) => None,
        };

        sqlx::query(
            r#"
            INSERT INTO payments (
                id, booking_id, amount_cents, payment_method, payment_type,
                status, transaction_id, paid_at, notes, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(id.to_string())
        .bind(request.booking_id.to_string())
        .bind(request.amount_cents)
        .bind(request.payment_method.as_str())
        .bind(request.payment_type.as_str())
        .bind(status.as_str())
        .bind(&request.transaction_id)
        .bind(paid_at)
        .bind(&request.notes)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Payment"))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created payment".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>> {
        let row = sqlx::query_as::<_, PaymentRow>(
            r#"
            SELECT id, booking_id, amount_cents, payment_method, payment_type,
                   status, transaction_id, paid_at, notes, created_at, updated_at
            FROM payments
            WHERE id = ?
            "#
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_payment(r)?)),
            None => Ok(None)
        }
    }

    async fn find_by_booking(&self, booking_id: Uuid) -> Result<Vec<Payment>> {
        let rows = sqlx::query_as::<_, PaymentRow>(
            r#"
            SELECT id, booking_id, amount_cents, payment_method, payment_type,
                   status, transaction_id, paid_at, notes, created_at, updated_at
            FROM payments
            WHERE booking_id = ?
            ORDER BY created_at DESC
            "#
        )
        .bind(booking_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter()
            .map(Self::row_to_payment)
            .collect()
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Payment>> {
        let rows = sqlx::query_as::<_, PaymentRow>(
            r#"
            SELECT id, booking_id, amount_cents, payment_method, payment_type,
                   status, transaction_id, paid_at, notes, created_at, updated_at
            FROM payments
            ORDER BY created_at DESC
            LIMIT ? OFFSET ?
            "#
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter()
            .map(Self::row_to_payment)
            .collect()
    }

    async fn count(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM payments")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn update_status(&self, id: Uuid, status: PaymentStatus) -> Result<Payment> {
        let now = Utc::now().naive_utc();

        // If status is completed, also update paid_at
        let paid_at_naive = if status == PaymentStatus::Completed {
            Some(now)
        } else {
            None
        };

        let result = sqlx::query(
            r#"
            UPDATE payments
            SET status = ?,
                paid_at = COALESCE(paid_at, ?),
                updated_at = ?
            WHERE id = ?
            "#
        )
        .bind(status.as_str())
        .bind(paid_at_naive)
        .bind(now)
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Payment not found".to_string()));
        }

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve updated payment".to_string())
        })
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM payments WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "Payment"))?;

        ensure_deleted(result.rows_affected(), "Payment")
    }
}
