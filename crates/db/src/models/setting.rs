//! Per-user key/value settings.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use wom_core::types::{DbId, Timestamp};

/// One row of the `user_settings` bag. The value is opaque JSON; the UI
/// decides its shape per setting name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserSetting {
    pub user_id: DbId,
    pub name: String,
    pub value: serde_json::Value,
    pub updated_at: Timestamp,
}

/// DTO for saving one setting (single or bulk endpoint).
#[derive(Debug, Clone, Deserialize)]
pub struct SaveSetting {
    pub name: String,
    pub value: serde_json::Value,
}
