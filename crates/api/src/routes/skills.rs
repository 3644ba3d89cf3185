//! Route definitions for the `/skills` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::skills;
use crate::state::AppState;

/// Routes mounted at `/skills`.
///
/// ```text
/// GET    /               -> list_mine
/// POST   /               -> create
/// GET    /public         -> list_public (no auth)
/// GET    /search?query=  -> search
/// GET    /{id}           -> get_by_id
/// PUT    /{id}           -> update
/// DELETE /{id}           -> delete
/// PUT    /{id}/position  -> update_position
/// GET    /{id}/blocks    -> get_blocks (parsed content blocks)
/// ```
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
