//! Subcategory entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use wom_core::types::{DbId, Timestamp};

/// Full subcategory row from the `subcategories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subcategory {
    pub id: DbId,
    pub category_id: DbId,
    pub name: String,
    pub color: String,
    pub pos_x: Option<f64>,
    pub pos_y: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a subcategory.
#[derive(Debug, Deserialize)]
pub struct CreateSubcategory {
    pub category_id: DbId,
    pub name: String,
    pub color: Option<String>,
    pub pos_x: Option<f64>,
    pub pos_y: Option<f64>,
}

/// DTO for the full-record update endpoint.
#[derive(Debug, Deserialize)]
pub struct UpdateSubcategory {
    pub category_id: DbId,
    pub name: String,
    pub color: String,
    pub pos_x: Option<f64>,
    pub pos_y: Option<f64>,
}
