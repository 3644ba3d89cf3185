//! Route definitions for the `/settings` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// Routes mounted at `/settings`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> save (single upsert)
/// POST   /bulk    -> save_bulk (transactional)
/// GET    /{name}  -> get_by_name
/// DELETE /{name}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(settings::list).post(settings::save))
        .route("/bulk", post(settings::save_bulk))
        .route(
            "/{name}",
            get(settings::get_by_name).delete(settings::delete),
        )
}
