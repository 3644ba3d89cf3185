//! Repository for the `categories` table.

use std::collections::HashMap;

use sqlx::PgPool;
use wom_core::types::DbId;

use crate::models::category::{Category, CategoryTree, CreateCategory, UpdateCategory};
use crate::models::subcategory::Subcategory;
use crate::repositories::SubcategoryRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, color, description, pos_x, pos_y, created_at, updated_at";

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCategory,
        color: &str,
    ) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (name, color, description, pos_x, pos_y)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(color)
            .bind(&input.description)
            .bind(input.pos_x)
            .bind(input.pos_y)
            .fetch_one(pool)
            .await
    }

    /// Find a category by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all categories ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY name");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// List all categories with their subcategories nested.
    pub async fn list_with_subcategories(pool: &PgPool) -> Result<Vec<CategoryTree>, sqlx::Error> {
        let categories = Self::list(pool).await?;
        let subcategories = SubcategoryRepo::list(pool).await?;

        let mut grouped: HashMap<DbId, Vec<Subcategory>> = HashMap::new();
        for sub in subcategories {
            grouped.entry(sub.category_id).or_default().push(sub);
        }

        Ok(categories
            .into_iter()
            .map(|category| {
                let subcategories = grouped.remove(&category.id).unwrap_or_default();
                CategoryTree {
                    category,
                    subcategories,
                }
            })
            .collect())
    }

    /// Full-record update. Returns `None` if no row with the given `id`
    /// exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET
                name = $2,
                color = $3,
                description = $4,
                pos_x = $5,
                pos_y = $6,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.color)
            .bind(&input.description)
            .bind(input.pos_x)
            .bind(input.pos_y)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category. Skills pointing at it have their link cleared by
    /// the schema (`ON DELETE SET NULL`); subcategories cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
