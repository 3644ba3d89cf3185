//! Category entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use wom_core::types::{DbId, Timestamp};

use crate::models::subcategory::Subcategory;

/// Full category row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub color: String,
    pub description: Option<String>,
    pub pos_x: Option<f64>,
    pub pos_y: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Category plus its nested subcategories, as returned by the list endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryTree {
    #[serde(flatten)]
    pub category: Category,
    pub subcategories: Vec<Subcategory>,
}

/// DTO for creating a category.
#[derive(Debug, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub color: Option<String>,
    pub description: Option<String>,
    pub pos_x: Option<f64>,
    pub pos_y: Option<f64>,
}

/// DTO for the full-record update endpoint.
#[derive(Debug, Deserialize)]
pub struct UpdateCategory {
    pub name: String,
    pub color: String,
    pub description: Option<String>,
    pub pos_x: Option<f64>,
    pub pos_y: Option<f64>,
}
