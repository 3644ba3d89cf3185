//! Repository for the `skills` table (both the skill and neuron surfaces).

use sqlx::PgPool;
use wom_core::search::escape_like;
use wom_core::types::DbId;

use crate::models::skill::{CreateSkill, Skill, UpdateSkill};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, category, category_id, subcategory_id, description, \
                        content, color, level, image_url, pos_x, pos_y, created_at, updated_at";

/// Provides CRUD operations for skills.
pub struct SkillRepo;

impl SkillRepo {
    /// Insert a new skill owned by `user_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateSkill,
        color: &str,
        level: &str,
    ) -> Result<Skill, sqlx::Error> {
        let query = format!(
            "INSERT INTO skills (user_id, name, category, category_id, subcategory_id,
                                 description, content, color, level, image_url, pos_x, pos_y)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Skill>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.category)
            .bind(input.category_id)
            .bind(input.subcategory_id)
            .bind(&input.description)
            .bind(&input.content)
            .bind(color)
            .bind(level)
            .bind(&input.image_url)
            .bind(input.pos_x)
            .bind(input.pos_y)
            .fetch_one(pool)
            .await
    }

    /// Find a skill by internal ID (any owner).
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Skill>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM skills WHERE id = $1");
        sqlx::query_as::<_, Skill>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a skill by ID scoped to its owner. Other users' skills come back
    /// as `None`, which the handler maps to 404.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Skill>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM skills WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Skill>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List one user's skills, most recently created first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Skill>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM skills WHERE user_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Skill>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List every user's skills (the public endpoint).
    pub async fn list_public(pool: &PgPool) -> Result<Vec<Skill>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM skills ORDER BY created_at DESC");
        sqlx::query_as::<_, Skill>(&query).fetch_all(pool).await
    }

    /// Case-insensitive substring search over name, category label,
    /// description, and content, scoped to the owner.
    ///
    /// The caller is responsible for the empty-query contract; this method
    /// expects a non-blank query.
    pub async fn search(
        pool: &PgPool,
        user_id: DbId,
        query: &str,
    ) -> Result<Vec<Skill>, sqlx::Error> {
        let pattern = format!("%{}%", escape_like(query));
        let sql = format!(
            "SELECT {COLUMNS} FROM skills
             WHERE user_id = $1
               AND (name ILIKE $2 OR category ILIKE $2
                    OR description ILIKE $2 OR content ILIKE $2)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Skill>(&sql)
            .bind(user_id)
            .bind(&pattern)
            .fetch_all(pool)
            .await
    }

    /// Full-record update scoped to the owner.
    ///
    /// Returns `None` if no row with the given `id` belongs to `user_id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateSkill,
        color: &str,
        level: &str,
    ) -> Result<Option<Skill>, sqlx::Error> {
        let query = format!(
            "UPDATE skills SET
                name = $3,
                category = $4,
                category_id = $5,
                subcategory_id = $6,
                description = $7,
                content = $8,
                color = $9,
                level = $10,
                image_url = $11,
                pos_x = $12,
                pos_y = $13,
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Skill>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.category)
            .bind(input.category_id)
            .bind(input.subcategory_id)
            .bind(&input.description)
            .bind(&input.content)
            .bind(color)
            .bind(level)
            .bind(&input.image_url)
            .bind(input.pos_x)
            .bind(input.pos_y)
            .fetch_optional(pool)
            .await
    }

    /// Persist a node's pinned canvas position.
    pub async fn update_position(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        pos_x: f64,
        pos_y: f64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE skills SET pos_x = $3, pos_y = $4, updated_at = NOW()
             WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .bind(pos_x)
        .bind(pos_y)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a skill scoped to the owner. Returns `true` if a row was
    /// removed.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM skills WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
