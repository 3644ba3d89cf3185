//! Route definitions for the `/subcategories` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::subcategories;
use crate::state::AppState;

/// Routes mounted at `/subcategories`.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create
/// GET    /{id}  -> get_by_id
/// PUT    /{id}  -> update
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(subcategories::list).post(subcategories::create))
        .route(
            "/{id}",
            get(subcategories::get_by_id)
                .put(subcategories::update)
                .delete(subcategories::delete),
        )
}
