use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{CreateLocationRequest, Location, UpdateLocationRequest},
    error::{AppError, Result},
    repository::{ensure_deleted, map_write_error, parse_uuid, to_utc, LocationRepository},
};

#[derive(FromRow)]
struct LocationRow {
    id: String,
    name: String,
    address: String,
    city: String,
    phone: Option<String>,
    is_active: bool,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl LocationRow {
    fn into_location(self) -> Result<Location> {
        Ok(Location {
            id: parse_uuid(&self.id)?,
            name: self.name,
            address: self.address,
            city: self.city,
            phone: self.phone,
            is_active: self.is_active,
            created_at: to_utc(self.created_at),
            updated_at: to_utc(self.updated_at),
        })
    }
}

pub struct SqliteLocationRepository {
    pool: SqlitePool,
}

impl SqliteLocationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationRepository for SqliteLocationRepository {
    async fn create(&self, request: CreateLocationRequest) -> Result<Location> {
        let id = Uuid::new_v4();
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO locations (id, name, address, city, phone, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, 1, ?, ?)
            "#
        )
        .bind(id.to_string())
        .bind(&request.name)
        .bind(&request.address)
        .bind(&request.city)
        .bind(&request.phone)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Location"))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created location".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Location>> {
        let row = sqlx::query_as::<_, LocationRow>(
            r#"
            SELECT id, name, address, city, phone, is_active, created_at, updated_at
            FROM locations
            WHERE id = ?
            "#
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        row.map(LocationRow::into_location).transpose()
    }

    async fn list(&self, include_inactive: bool) -> Result<Vec<Location>> {
        let rows = sqlx::query_as::<_, LocationRow>(
            r#"
            SELECT id, name, address, city, phone, is_active, created_at, updated_at
            FROM locations
            WHERE is_active = 1 OR ?
            ORDER BY city ASC, name ASC
            "#
        )
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter()
            .map(LocationRow::into_location)
            .collect()
    }

    async fn update(&self, id: Uuid, update: UpdateLocationRequest) -> Result<Location> {
        let result = sqlx::query(
            r#"
            UPDATE locations
            SET name = COALESCE(?, name),
                address = COALESCE(?, address),
                city = COALESCE(?, city),
                phone = CASE WHEN ? THEN ? ELSE phone END,
                is_active = COALESCE(?, is_active),
                updated_at = ?
            WHERE id = ?
            "#
        )
        .bind(&update.name)
        .bind(&update.address)
        .bind(&update.city)
        .bind(update.phone.is_some())
        .bind(update.phone.flatten())
        .bind(update.is_active)
        .bind(Utc::now().naive_utc())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Location"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Location not found".to_string()));
        }

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve updated location".to_string())
        })
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM locations WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "Location"))?;

        ensure_deleted(result.rows_affected(), "Location")
    }
}
