use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{slugify, Category, CreateCategoryRequest, UpdateCategoryRequest},
    error::{AppError, Result},
    repository::{ensure_deleted, map_write_error, parse_uuid, to_utc, CategoryRepository},
};

#[derive(FromRow)]
struct CategoryRow {
    id: String,
    name: String,
    slug: String,
    description: Option<String>,
    sort_order: i32,
    is_active: bool,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl CategoryRow {
    fn into_category(self) -> Result<Category> {
        Ok(Category {
            id: parse_uuid(&self.id)?,
            name: self.name,
            slug: self.slug,
            description: self.description,
            sort_order: self.sort_order,
            is_active: self.is_active,
            created_at: to_utc(self.created_at),
            updated_at: to_utc(self.updated_at),
        })
    }
}

pub struct SqliteCategoryRepository {
    pool: SqlitePool,
}

impl SqliteCategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for SqliteCategoryRepository {
    async fn create(&self, request: CreateCategoryRequest) -> Result<Category> {
        let id = Uuid::new_v4();
        let now = Utc::now().naive_utc();
        let slug = request.slug.unwrap_or_else(|| slugify(&request.name));

        // New categories go to the end unless a position is given
        let sort_order = match request.sort_order {
            Some(order) => order,
            None => {
                let max: Option<i32> = sqlx::query_scalar("SELECT MAX(sort_order) FROM categories")
                    .fetch_one(&self.pool)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                max.map(|m| m + 1).unwrap_or(0)
            }
        };

        sqlx::query(
            r#"
            INSERT INTO categories (id, name, slug, description, sort_order, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, 1, ?, ?)
            "#
        )
        .bind(id.to_string())
        .bind(&request.name)
        .bind(&slug)
        .bind(&request.description)
        .bind(sort_order)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Category"))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created category".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, slug, description, sort_order, is_active, created_at, updated_at
            FROM categories
            WHERE id = ?
            "#
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        row.map(CategoryRow::into_category).transpose()
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, slug, description, sort_order, is_active, created_at, updated_at
            FROM categories
            WHERE slug = ?
            "#
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        row.map(CategoryRow::into_category).transpose()
    }

    async fn list(&self, include_inactive: bool) -> Result<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, slug, description, sort_order, is_active, created_at, updated_at
            FROM categories
            WHERE is_active = 1 OR ?
            ORDER BY sort_order ASC, name ASC
            "#
        )
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter()
            .map(CategoryRow::into_category)
            .collect()
    }

    async fn update(&self, id: Uuid, update: UpdateCategoryRequest) -> Result<Category> {
        let result = sqlx::query(
            r#"
            UPDATE categories
            SET name = COALESCE(?, name),
                description = CASE WHEN ? THEN ? ELSE description END,
                sort_order = COALESCE(?, sort_order),
                is_active = COALESCE(?, is_active),
                updated_at = ?
            WHERE id = ?
            "#
        )
        .bind(&update.name)
        .bind(update.description.is_some())
        .bind(update.description.flatten())
        .bind(update.sort_order)
        .bind(update.is_active)
        .bind(Utc::now().naive_utc())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Category"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Category not found".to_string()));
        }

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve updated category".to_string())
        })
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "Category"))?;

        ensure_deleted(result.rows_affected(), "Category")
    }
}
