//! Handlers for the `/settings` key/value bag.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use wom_core::error::CoreError;
use wom_db::models::setting::SaveSetting;
use wom_db::repositories::SettingRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/settings
///
/// List all settings for the authenticated user.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let settings = SettingRepo::list_for_user(&state.pool, auth.user_id).await?;

    Ok(Json(DataResponse { data: settings }))
}

/// GET /api/settings/{name}
pub async fn get_by_name(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<impl IntoResponse> {
    // A missing name classifies as 404 via the RowNotFound mapping.
    let setting = SettingRepo::get(&state.pool, auth.user_id, &name)
        .await?
        .ok_or(AppError::Database(sqlx::Error::RowNotFound))?;

    Ok(Json(DataResponse { data: setting }))
}

/// POST /api/settings
///
/// Insert or overwrite a single setting.
pub async fn save(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SaveSetting>,
) -> AppResult<impl IntoResponse> {
    validate_name(&input.name)?;

    let setting = SettingRepo::upsert(&state.pool, auth.user_id, &input).await?;

    tracing::info!(user_id = auth.user_id, name = %setting.name, "Setting saved");

    Ok(Json(DataResponse { data: setting }))
}

/// POST /api/settings/bulk
///
/// Save a batch of settings atomically: the whole batch commits or none of
/// it does.
pub async fn save_bulk(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<Vec<SaveSetting>>,
) -> AppResult<impl IntoResponse> {
    for entry in &input {
        validate_name(&entry.name)?;
    }

    let saved = SettingRepo::save_many(&state.pool, auth.user_id, &input).await?;

    tracing::info!(user_id = auth.user_id, count = saved.len(), "Settings bulk-saved");

    Ok(Json(DataResponse { data: saved }))
}

/// DELETE /api/settings/{name}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let deleted = SettingRepo::delete(&state.pool, auth.user_id, &name).await?;

    if !deleted {
        return Err(AppError::Database(sqlx::Error::RowNotFound));
    }

    tracing::info!(user_id = auth.user_id, name = %name, "Setting deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Setting name must not be blank".into(),
        )));
    }
    Ok(())
}
