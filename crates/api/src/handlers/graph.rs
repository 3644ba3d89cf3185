//! Handler for the `/graph` scene endpoint.
//!
//! Runs the node-graph builder over the caller's skills and the category
//! tree and returns the flat node list (view-models) the canvas renders.
//! Layout randomness uses the thread RNG; persisted positions override it.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use wom_core::graph::{build_graph, CanvasBounds, GraphCategory, GraphFilter, GraphItem, GraphSubcategory, Vec2};
use wom_core::types::DbId;
use wom_db::models::skill::Skill;
use wom_db::repositories::{CategoryRepo, SkillRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Default canvas size when the client does not report one.
const DEFAULT_CANVAS_WIDTH: f64 = 1280.0;
const DEFAULT_CANVAS_HEIGHT: f64 = 720.0;

/// Query parameters for `GET /graph`.
#[derive(Debug, Deserialize)]
pub struct GraphParams {
    /// Selected category filter; absent means "show all".
    pub category: Option<DbId>,
    /// Active search query.
    pub query: Option<String>,
    /// Canvas size in pixels.
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// GET /api/graph?category=&query=&width=&height=
pub async fn scene(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<GraphParams>,
) -> AppResult<impl IntoResponse> {
    let skills = SkillRepo::list_by_user(&state.pool, auth.user_id).await?;
    let tree = CategoryRepo::list_with_subcategories(&state.pool).await?;

    let items: Vec<GraphItem> = skills.iter().map(graph_item).collect();
    let categories: Vec<GraphCategory> = tree
        .into_iter()
        .map(|entry| GraphCategory {
            id: entry.category.id,
            name: entry.category.name,
            color: entry.category.color,
            position: position(entry.category.pos_x, entry.category.pos_y),
            subcategories: entry
                .subcategories
                .into_iter()
                .map(|sub| GraphSubcategory {
                    id: sub.id,
                    name: sub.name,
                    color: sub.color,
                    position: position(sub.pos_x, sub.pos_y),
                })
                .collect(),
        })
        .collect();

    let filter = match params.category {
        Some(id) => GraphFilter::Category(id),
        None => GraphFilter::All,
    };
    let bounds = CanvasBounds::new(
        params.width.unwrap_or(DEFAULT_CANVAS_WIDTH),
        params.height.unwrap_or(DEFAULT_CANVAS_HEIGHT),
    );

    let nodes = build_graph(
        &items,
        &categories,
        filter,
        params.query.as_deref(),
        &bounds,
        &mut rand::rng(),
    );

    tracing::debug!(
        user_id = auth.user_id,
        nodes = nodes.len(),
        query = ?params.query,
        "Graph scene built",
    );

    Ok(Json(DataResponse { data: nodes }))
}

fn graph_item(skill: &Skill) -> GraphItem {
    GraphItem {
        id: skill.id,
        title: skill.name.clone(),
        description: (!skill.description.is_empty()).then(|| skill.description.clone()),
        body: (!skill.content.is_empty()).then(|| skill.content.clone()),
        color: skill.color.clone(),
        category_label: (!skill.category.is_empty()).then(|| skill.category.clone()),
        category_id: skill.category_id,
        subcategory_id: skill.subcategory_id,
        position: position(skill.pos_x, skill.pos_y),
    }
}

fn position(x: Option<f64>, y: Option<f64>) -> Option<Vec2> {
    Some(Vec2::new(x?, y?))
}
