use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{CreateCustomerRequest, Customer, UpdateCustomerRequest},
    error::{AppError, Result},
    repository::{ensure_deleted, map_write_error, parse_uuid, to_utc, CustomerRepository},
};

#[derive(FromRow)]
struct CustomerRow {
    id: String,
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
    driving_license_number: Option<String>,
    date_of_birth: Option<NaiveDate>,
    address: Option<String>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqliteCustomerRepository {
    pool: SqlitePool,
}

impl SqliteCustomerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_customer(row: CustomerRow) -> Result<Customer> {
        Ok(Customer {
            id: parse_uuid(&row.id)?,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            driving_license_number: row.driving_license_number,
            date_of_birth: row.date_of_birth,
            address: row.address,
            created_at: to_utc(row.created_at),
            updated_at: to_utc(row.updated_at),
        })
    }
}

#[async_trait]
impl CustomerRepository for SqliteCustomerRepository {
    async fn create(&self, request: CreateCustomerRequest) -> Result<Customer> {
        let id = Uuid::new_v4();
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO customers (
                id, first_name, last_name, email, phone, driving_license_number,
                date_of_birth, address, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(id.to_string())
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.driving_license_number)
        .bind(request.date_of_birth)
        .bind(&request.address)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Customer"))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created customer".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT id, first_name, last_name, email, phone, driving_license_number,
                   date_of_birth, address, created_at, updated_at
            FROM customers
            WHERE id = ?
            "#
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_customer(r)?)),
            None => Ok(None)
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT id, first_name, last_name, email, phone, driving_license_number,
                   date_of_birth, address, created_at, updated_at
            FROM customers
            WHERE email = ?
            "#
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_customer(r)?)),
            None => Ok(None)
        }
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Customer>> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT id, first_name, last_name, email, phone, driving_license_number,
                   date_of_birth, address, created_at, updated_at
            FROM customers
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
            .map(Self::row_to_customer)
            .collect()
    }

    async fn count(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn list_all(&self) -> Result<Vec<Customer>> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT id, first_name, last_name, email, phone, driving_license_number,
                   date_of_birth, address, created_at, updated_at
            FROM customers
            ORDER BY last_name, first_name
            "#
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter()
            .map(Self::row_to_customer)
            .collect()
    }

    async fn update(&self, id: Uuid, update: UpdateCustomerRequest) -> Result<Customer> {
        let result = sqlx::query(
            r#"
            UPDATE customers
            SET first_name = COALESCE(?, first_name),
                last_name = COALESCE(?, last_name),
                email = COALESCE(?, email),
                phone = CASE WHEN ? THEN ? ELSE phone END,
                driving_license_number = CASE WHEN ? THEN ? ELSE driving_license_number END,
                date_of_birth = CASE WHEN ? THEN ? ELSE date_of_birth END,
                address = CASE WHEN ? THEN ? ELSE address END,
                updated_at = ?
            WHERE id = ?
            "#
        )
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.email)
        .bind(update.phone.is_some())
        .bind(update.phone.flatten())
        .bind(update.driving_license_number.is_some())
        .bind(update.driving_license_number.flatten())
        .bind(update.date_of_birth.is_some())
        .bind(update.date_of_birth.flatten())
        .bind(update.address.is_some())
        .bind(update.address.flatten())
        .bind(Utc::now().naive_utc())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Customer"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Customer not found".to_string()));
        }

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve updated customer".to_string())
        })
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "Customer"))?;

        ensure_deleted(result.rows_affected(), "Customer")
    }
}
