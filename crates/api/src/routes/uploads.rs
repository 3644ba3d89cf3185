//! Route definitions for the `/uploads` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::uploads;
use crate::state::AppState;

/// Routes mounted at `/uploads`.
///
/// ```text
/// POST /upload  -> upload (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/upload", post(uploads::upload))
}
