//! Handlers for the `/skills` resource.
//!
//! The same handlers also back the `/neurons` routes; the two names are two
//! UI eras over the same records.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use wom_core::content;
use wom_core::error::CoreError;
use wom_core::level;
use wom_core::search::normalize_query;
use wom_core::types::DbId;
use wom_db::models::skill::{CreateSkill, Skill, UpdateSkill};
use wom_db::repositories::SkillRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::uploads::remove_uploaded_file;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum length of the short description field.
const MAX_DESCRIPTION_LEN: usize = 200;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /skills/search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

/// Request body for `PUT /skills/{id}/position`.
#[derive(Debug, Deserialize)]
pub struct PositionUpdate {
    pub x: f64,
    pub y: f64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/skills
///
/// List the authenticated user's skills.
pub async fn list_mine(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let skills = SkillRepo::list_by_user(&state.pool, auth.user_id).await?;

    Ok(Json(DataResponse { data: skills }))
}

/// GET /api/skills/public
///
/// List every user's skills. No authentication required.
pub async fn list_public(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let skills = SkillRepo::list_public(&state.pool).await?;

    Ok(Json(DataResponse { data: skills }))
}

/// GET /api/skills/search?query=
///
/// Case-insensitive substring search over name, category label, description,
/// and content, scoped to the caller. An empty or whitespace-only query
/// returns an empty list.
pub async fn search(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let skills = match params.query.as_deref().and_then(normalize_query) {
        Some(query) => SkillRepo::search(&state.pool, auth.user_id, &query).await?,
        None => Vec::new(),
    };

    Ok(Json(DataResponse { data: skills }))
}

/// POST /api/skills
///
/// Create a skill owned by the authenticated user.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateSkill>,
) -> AppResult<impl IntoResponse> {
    validate_fields(&input.name, &input.category, &input.description, input.level.as_deref())?;
    let (color, level) = resolve_color_and_level(input.color.as_deref(), input.level.as_deref());

    let skill = SkillRepo::create(&state.pool, auth.user_id, &input, &color, level).await?;

    tracing::info!(
        skill_id = skill.id,
        user_id = auth.user_id,
        name = %skill.name,
        "Skill created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: skill })))
}

/// GET /api/skills/{id}
///
/// Fetch one of the authenticated user's skills. Other users' skills come
/// back as 404.
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let skill = find_owned(&state, id, auth.user_id).await?;

    Ok(Json(DataResponse { data: skill }))
}

/// PUT /api/skills/{id}
///
/// Full-record update of one of the authenticated user's skills. There are
/// no partial-patch semantics; a missing required field rejects with 400 and
/// the stored record is unchanged.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSkill>,
) -> AppResult<impl IntoResponse> {
    validate_fields(&input.name, &input.category, &input.description, input.level.as_deref())?;
    let (color, level) = resolve_color_and_level(input.color.as_deref(), input.level.as_deref());

    let skill = SkillRepo::update(&state.pool, id, auth.user_id, &input, &color, level)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Skill",
            id,
        }))?;

    tracing::info!(skill_id = id, user_id = auth.user_id, "Skill updated");

    Ok(Json(DataResponse { data: skill }))
}

/// DELETE /api/skills/{id}
///
/// Delete one of the authenticated user's skills, removing its uploaded
/// image from disk when it has one.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let skill = find_owned(&state, id, auth.user_id).await?;

    let deleted = SkillRepo::delete(&state.pool, id, auth.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Skill",
            id,
        }));
    }

    if let Some(image_url) = &skill.image_url {
        remove_uploaded_file(&state.config, image_url).await;
    }

    tracing::info!(skill_id = id, user_id = auth.user_id, "Skill deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/skills/{id}/position
///
/// Persist a node's pinned canvas position after a drag. The stored
/// coordinates override the random scatter on the next graph build.
pub async fn update_position(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<PositionUpdate>,
) -> AppResult<impl IntoResponse> {
    let updated =
        SkillRepo::update_position(&state.pool, id, auth.user_id, input.x, input.y).await?;

    if !updated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Skill",
            id,
        }));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/skills/{id}/blocks
///
/// Return the skill's rich-text body parsed into content blocks instead of
/// the raw stored HTML.
pub async fn get_blocks(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let skill = find_owned(&state, id, auth.user_id).await?;
    let blocks = content::from_html(&skill.content);

    Ok(Json(DataResponse { data: blocks }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a skill scoped to its owner, mapping a miss to 404.
async fn find_owned(state: &AppState, id: DbId, user_id: DbId) -> AppResult<Skill> {
    SkillRepo::find_owned(&state.pool, id, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Skill",
            id,
        }))
}

/// Shared create/update validation: required fields, description length,
/// and the level enum.
fn validate_fields(
    name: &str,
    category: &str,
    description: &str,
    level: Option<&str>,
) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Skill name must not be blank".into(),
        )));
    }
    if category.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Category must not be blank".into(),
        )));
    }
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Description must be at most {MAX_DESCRIPTION_LEN} characters"
        ))));
    }
    if let Some(level) = level {
        if !level::is_valid_level(level) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown level '{level}'"
            ))));
        }
    }
    Ok(())
}

/// The effective level defaults to in-progress; the effective color defaults
/// to the level's color when the user has not picked one.
fn resolve_color_and_level<'a>(
    color: Option<&'a str>,
    level: Option<&'a str>,
) -> (String, &'a str) {
    let level = level.unwrap_or(level::LEVEL_IN_PROGRESS);
    let color = color
        .map(str::to_string)
        .unwrap_or_else(|| level::default_color(level).to_string());
    (color, level)
}
