//! Route definitions for the `/graph` scene endpoint.

use axum::routing::get;
use axum::Router;

use crate::handlers::graph;
use crate::state::AppState;

/// Routes mounted at `/graph`.
///
/// ```text
/// GET /?category=&query=&width=&height=  -> scene
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(graph::scene))
}
