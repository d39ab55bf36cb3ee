use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{slugify, Car, CarStatus, CreateCarRequest, UpdateCarRequest},
    error::{AppError, Result},
    repository::{ensure_deleted, map_write_error, parse_optional_uuid, parse_uuid, to_utc, CarRepository},
};

const CAR_COLUMNS: &str = r#"
    id, category_id, name, slug, make, model, year, license_plate, seats,
    fuel_type, transmission, daily_rate_cents, status, is_active, is_featured,
    description, image_url, created_at, updated_at
"#;

#[derive(FromRow)]
struct CarRow {
    id: String,
    category_id: Option<String>,
    name: String,
    slug: String,
    make: String,
    model: String,
    year: i32,
    license_plate: String,
    seats: i32,
    fuel_type: String,
    transmission: String,
    daily_rate_cents: i64,
    status: String,
    is_active: bool,
    is_featured: bool,
    description: Option<String>,
    image_url: Option<String>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqliteCarRepository {
    pool: SqlitePool,
}

impl SqliteCarRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_car(row: CarRow) -> Result<Car> {
        Ok(Car {
            id: parse_uuid(&row.id)?,
            category_id: parse_optional_uuid(row.category_id)?,
            name: row.name,
            slug: row.slug,
            make: row.make,
            model: row.model,
            year: row.year,
            license_plate: row.license_plate,
            seats: row.seats,
            fuel_type: row.fuel_type.parse()?,
            transmission: row.transmission.parse()?,
            daily_rate_cents: row.daily_rate_cents,
            status: row.status.parse()?,
            is_active: row.is_active,
            is_featured: row.is_featured,
            description: row.description,
            image_url: row.image_url,
            created_at: to_utc(row.created_at),
            updated_at: to_utc(row.updated_at),
        })
    }

    async fn fetch_where(&self, clause: &str, bind: String) -> Result<Option<Car>> {
        let sql = format!("SELECT {} FROM cars WHERE {} = ?", CAR_COLUMNS, clause);
        let row = sqlx::query_as::<_, CarRow>(&sql)
            .bind(bind)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        row.map(Self::row_to_car).transpose()
    }

    async fn write(&self, car: &Car) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE cars
            SET category_id = ?, name = ?, make = ?, model = ?, year = ?,
                license_plate = ?, seats = ?, fuel_type = ?, transmission = ?,
                daily_rate_cents = ?, status = ?, is_active = ?, is_featured = ?,
                description = ?, image_url = ?, updated_at = ?
            WHERE id = ?
            "#
        )
        .bind(car.category_id.map(|id| id.to_string()))
        .bind(&car.name)
        .bind(&car.make)
        .bind(&car.model)
        .bind(car.year)
        .bind(&car.license_plate)
        .bind(car.seats)
        .bind(car.fuel_type.as_str())
        .bind(car.transmission.as_str())
        .bind(car.daily_rate_cents)
        .bind(car.status.as_str())
        .bind(car.is_active)
        .bind(car.is_featured)
        .bind(&car.description)
        .bind(&car.image_url)
        .bind(car.updated_at.naive_utc())
        .bind(car.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Car"))?;

        Ok(())
    }
}

#[async_trait]
impl CarRepository for SqliteCarRepository {
    async fn create(&self, request: CreateCarRequest) -> Result<Car> {
        let id = Uuid::new_v4();
        let now = Utc::now().naive_utc();
        let slug = request.slug.unwrap_or_else(|| slugify(&request.name));
        let status = request.status.unwrap_or(CarStatus::Available);

        sqlx::query(
            r#"
            INSERT INTO cars (
                id, category_id, name, slug, make, model, year, license_plate,
                seats, fuel_type, transmission, daily_rate_cents, status,
                is_active, is_featured, description, image_url, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(id.to_string())
        .bind(request.category_id.map(|id| id.to_string()))
        .bind(&request.name)
        .bind(&slug)
        .bind(&request.make)
        .bind(&request.model)
        .bind(request.year)
        .bind(&request.license_plate)
        .bind(request.seats)
        .bind(request.fuel_type.as_str())
        .bind(request.transmission.as_str())
        .bind(request.daily_rate_cents)
        .bind(status.as_str())
        .bind(request.is_active.unwrap_or(true))
        .bind(request.is_featured.unwrap_or(false))
        .bind(&request.description)
        .bind(&request.image_url)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Car"))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created car".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Car>> {
        self.fetch_where("id", id.to_string()).await
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Car>> {
        self.fetch_where("slug", slug.to_string()).await
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Car>> {
        let sql = format!(
            "SELECT {} FROM cars ORDER BY created_at DESC LIMIT ? OFFSET ?",
            CAR_COLUMNS
        );
        let rows = sqlx::query_as::<_, CarRow>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter()
            .map(Self::row_to_car)
            .collect()
    }

    async fn count(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM cars")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn list_all(&self) -> Result<Vec<Car>> {
        let sql = format!("SELECT {} FROM cars ORDER BY name", CAR_COLUMNS);
        let rows = sqlx::query_as::<_, CarRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter()
            .map(Self::row_to_car)
            .collect()
    }

    async fn list_bookable(&self, category_id: Option<Uuid>) -> Result<Vec<Car>> {
        let sql = format!(
            r#"
            SELECT {} FROM cars
            WHERE is_active = 1 AND status = ?
              AND (? IS NULL OR category_id = ?)
            ORDER BY is_featured DESC, daily_rate_cents ASC
            "#,
            CAR_COLUMNS
        );
        let category = category_id.map(|id| id.to_string());
        let rows = sqlx::query_as::<_, CarRow>(&sql)
            .bind(CarStatus::Available.as_str())
            .bind(&category)
            .bind(&category)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter()
            .map(Self::row_to_car)
            .collect()
    }

    async fn update(&self, id: Uuid, update: UpdateCarRequest) -> Result<Car> {
        let mut car = self.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

        if let Some(category_id) = update.category_id {
            car.category_id = category_id;
        }
        if let Some(name) = update.name {
            car.name = name;
        }
        if let Some(make) = update.make {
            car.make = make;
        }
        if let Some(model) = update.model {
            car.model = model;
        }
        if let Some(year) = update.year {
            car.year = year;
        }
        if let Some(plate) = update.license_plate {
            car.license_plate = plate;
        }
        if let Some(seats) = update.seats {
            car.seats = seats;
        }
        if let Some(fuel_type) = update.fuel_type {
            car.fuel_type = fuel_type;
        }
        if let Some(transmission) = update.transmission {
            car.transmission = transmission;
        }
        if let Some(rate) = update.daily_rate_cents {
            car.daily_rate_cents = rate;
        }
        if let Some(status) = update.status {
            car.status = status;
        }
        if let Some(is_active) = update.is_active {
            car.is_active = is_active;
        }
        if let Some(is_featured) = update.is_featured {
            car.is_featured = is_featured;
        }
        if let Some(description) = update.description {
            car.description = description;
        }
        if let Some(image_url) = update.image_url {
            car.image_url = image_url;
        }
        car.updated_at = Utc::now();

        self.write(&car).await?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve updated car".to_string())
        })
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM cars WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "Car"))?;

        ensure_deleted(result.rows_affected(), "Car")
    }
}
