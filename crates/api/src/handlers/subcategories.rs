//! Handlers for the `/subcategories` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use wom_core::error::CoreError;
use wom_core::types::DbId;
use wom_db::models::subcategory::{CreateSubcategory, UpdateSubcategory};
use wom_db::repositories::{CategoryRepo, SubcategoryRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Fallback color for subcategories created without one.
const DEFAULT_SUBCATEGORY_COLOR: &str = "#00aaaa";

/// GET /api/subcategories
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let subcategories = SubcategoryRepo::list(&state.pool).await?;

    Ok(Json(DataResponse { data: subcategories }))
}

/// POST /api/subcategories
///
/// Create a subcategory under an existing category.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateSubcategory>,
) -> AppResult<impl IntoResponse> {
    validate_name(&input.name)?;
    ensure_category_exists(&state, input.category_id).await?;

    let color = input
        .color
        .clone()
        .unwrap_or_else(|| DEFAULT_SUBCATEGORY_COLOR.to_string());

    let subcategory = SubcategoryRepo::create(&state.pool, &input, &color).await?;

    tracing::info!(
        subcategory_id = subcategory.id,
        category_id = subcategory.category_id,
        user_id = auth.user_id,
        name = %subcategory.name,
        "Subcategory created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: subcategory })))
}

/// GET /api/subcategories/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let subcategory = SubcategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subcategory",
            id,
        }))?;

    Ok(Json(DataResponse { data: subcategory }))
}

/// PUT /api/subcategories/{id}
///
/// Full-record update, including re-parenting to another category.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSubcategory>,
) -> AppResult<impl IntoResponse> {
    validate_name(&input.name)?;
    ensure_category_exists(&state, input.category_id).await?;

    let subcategory = SubcategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subcategory",
            id,
        }))?;

    tracing::info!(subcategory_id = id, user_id = auth.user_id, "Subcategory updated");

    Ok(Json(DataResponse { data: subcategory }))
}

/// DELETE /api/subcategories/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = SubcategoryRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Subcategory",
            id,
        }));
    }

    tracing::info!(subcategory_id = id, user_id = auth.user_id, "Subcategory deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Subcategory name must not be blank".into(),
        )));
    }
    Ok(())
}

async fn ensure_category_exists(state: &AppState, category_id: DbId) -> AppResult<()> {
    if CategoryRepo::find_by_id(&state.pool, category_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id: category_id,
        }));
    }
    Ok(())
}
