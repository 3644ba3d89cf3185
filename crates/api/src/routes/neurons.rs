//! Route definitions for the `/neurons` resource.
//!
//! The neuron map UI era renamed skills to neurons; both names operate on
//! the same underlying records, so these routes reuse the skill handlers.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::skills;
use crate::state::AppState;

/// Routes mounted at `/neurons`, mirroring `/skills`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(skills::list_mine).post(skills::create))
        .route("/public", get(skills::list_public))
        .route("/search", get(skills::search))
        .route(
            "/{id}",
            get(skills::get_by_id)
                .put(skills::update)
                .delete(skills::delete),
        )
        .route("/{id}/position", put(skills::update_position))
        .route("/{id}/blocks", get(skills::get_blocks))
}
