//! Skill/neuron entity model and DTOs.
//!
//! One table serves both the `/skills` and `/neurons` API surfaces; the two
//! names are two UI eras over the same records.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use wom_core::types::{DbId, Timestamp};

/// Full skill row from the `skills` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Skill {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    /// Legacy free-text category label.
    pub category: String,
    pub category_id: Option<DbId>,
    pub subcategory_id: Option<DbId>,
    pub description: String,
    /// Rich-text HTML body (see `wom_core::content`).
    pub content: String,
    pub color: String,
    pub level: String,
    pub image_url: Option<String>,
    /// Persisted canvas position, when the user has pinned the node.
    pub pos_x: Option<f64>,
    pub pos_y: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a skill.
#[derive(Debug, Deserialize)]
pub struct CreateSkill {
    pub name: String,
    pub category: String,
    pub category_id: Option<DbId>,
    pub subcategory_id: Option<DbId>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    pub color: Option<String>,
    pub level: Option<String>,
    pub image_url: Option<String>,
    pub pos_x: Option<f64>,
    pub pos_y: Option<f64>,
}

/// DTO for the full-record update endpoint. There are no partial-patch
/// semantics: every field is written as provided.
#[derive(Debug, Deserialize)]
pub struct UpdateSkill {
    pub name: String,
    pub category: String,
    pub category_id: Option<DbId>,
    pub subcategory_id: Option<DbId>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    pub color: Option<String>,
    pub level: Option<String>,
    pub image_url: Option<String>,
    pub pos_x: Option<f64>,
    pub pos_y: Option<f64>,
}
