//! Repository for the `user_settings` key/value bag.

use sqlx::PgPool;
use wom_core::types::DbId;

use crate::models::setting::{SaveSetting, UserSetting};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "user_id, name, value, updated_at";

/// Provides access to per-user settings.
pub struct SettingRepo;

impl SettingRepo {
    /// Fetch one setting by name.
    pub async fn get(
        pool: &PgPool,
        user_id: DbId,
        name: &str,
    ) -> Result<Option<UserSetting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_settings WHERE user_id = $1 AND name = $2");
        sqlx::query_as::<_, UserSetting>(&query)
            .bind(user_id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all settings for a user ordered by name.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<UserSetting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_settings WHERE user_id = $1 ORDER BY name");
        sqlx::query_as::<_, UserSetting>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Insert or overwrite a single setting.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        entry: &SaveSetting,
    ) -> Result<UserSetting, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_settings (user_id, name, value)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id, name)
             DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSetting>(&query)
            .bind(user_id)
            .bind(&entry.name)
            .bind(&entry.value)
            .fetch_one(pool)
            .await
    }

    /// Save a batch of settings in a single transaction.
    ///
    /// The whole batch commits or none of it does: any failing upsert drops
    /// the transaction, rolling back the earlier writes.
    pub async fn save_many(
        pool: &PgPool,
        user_id: DbId,
        entries: &[SaveSetting],
    ) -> Result<Vec<UserSetting>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut saved = Vec::with_capacity(entries.len());

        let query = format!(
            "INSERT INTO user_settings (user_id, name, value)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id, name)
             DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        for entry in entries {
            let row = sqlx::query_as::<_, UserSetting>(&query)
                .bind(user_id)
                .bind(&entry.name)
                .bind(&entry.value)
                .fetch_one(&mut *tx)
                .await?;
            saved.push(row);
        }

        tx.commit().await?;

        tracing::debug!(user_id, count = saved.len(), "Bulk settings saved");
        Ok(saved)
    }

    /// Delete one setting. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, user_id: DbId, name: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_settings WHERE user_id = $1 AND name = $2")
            .bind(user_id)
            .bind(name)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
