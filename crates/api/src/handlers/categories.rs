//! Handlers for the `/categories` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use wom_core::error::CoreError;
use wom_core::types::DbId;
use wom_db::models::category::{CreateCategory, UpdateCategory};
use wom_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Fallback color for categories created without one.
const DEFAULT_CATEGORY_COLOR: &str = "#aa00aa";

/// GET /api/categories
///
/// List all categories with their subcategories nested.
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list_with_subcategories(&state.pool).await?;

    Ok(Json(DataResponse { data: categories }))
}

/// POST /api/categories
///
/// Create a category.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    validate_name(&input.name)?;
    let color = input
        .color
        .clone()
        .unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_string());

    let category = CategoryRepo::create(&state.pool, &input, &color).await?;

    tracing::info!(
        category_id = category.id,
        user_id = auth.user_id,
        name = %category.name,
        "Category created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// GET /api/categories/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;

    Ok(Json(DataResponse { data: category }))
}

/// PUT /api/categories/{id}
///
/// Full-record update.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<impl IntoResponse> {
    validate_name(&input.name)?;

    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;

    tracing::info!(category_id = id, user_id = auth.user_id, "Category updated");

    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/categories/{id}
///
/// Delete a category. Its subcategories cascade; skills keep their rows and
/// lose the link (schema rule).
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = CategoryRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }));
    }

    tracing::info!(category_id = id, user_id = auth.user_id, "Category deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Category name must not be blank".into(),
        )));
    }
    Ok(())
}
