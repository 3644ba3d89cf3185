//! Repository for the `subcategories` table.

use sqlx::PgPool;
use wom_core::types::DbId;

use crate::models::subcategory::{CreateSubcategory, Subcategory, UpdateSubcategory};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, category_id, name, color, pos_x, pos_y, created_at, updated_at";

/// Provides CRUD operations for subcategories.
pub struct SubcategoryRepo;

impl SubcategoryRepo {
    /// Insert a new subcategory, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSubcategory,
        color: &str,
    ) -> Result<Subcategory, sqlx::Error> {
        let query = format!(
            "INSERT INTO subcategories (category_id, name, color, pos_x, pos_y)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subcategory>(&query)
            .bind(input.category_id)
            .bind(&input.name)
            .bind(color)
            .bind(input.pos_x)
            .bind(input.pos_y)
            .fetch_one(pool)
            .await
    }

    /// Find a subcategory by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Subcategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subcategories WHERE id = $1");
        sqlx::query_as::<_, Subcategory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all subcategories ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Subcategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subcategories ORDER BY name");
        sqlx::query_as::<_, Subcategory>(&query)
            .fetch_all(pool)
            .await
    }

    /// List the subcategories of one category.
    pub async fn list_by_category(
        pool: &PgPool,
        category_id: DbId,
    ) -> Result<Vec<Subcategory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM subcategories WHERE category_id = $1 ORDER BY name"
        );
        sqlx::query_as::<_, Subcategory>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// Full-record update. Returns `None` if no row with the given `id`
    /// exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSubcategory,
    ) -> Result<Option<Subcategory>, sqlx::Error> {
        let query = format!(
            "UPDATE subcategories SET
                category_id = $2,
                name = $3,
                color = $4,
                pos_x = $5,
                pos_y = $6,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subcategory>(&query)
            .bind(id)
            .bind(input.category_id)
            .bind(&input.name)
            .bind(&input.color)
            .bind(input.pos_x)
            .bind(input.pos_y)
            .fetch_optional(pool)
            .await
    }

    /// Delete a subcategory. Skills pointing at it have their link cleared
    /// by the schema (`ON DELETE SET NULL`).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM subcategories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
