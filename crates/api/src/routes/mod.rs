pub mod auth;
pub mod categories;
pub mod graph;
pub mod health;
pub mod neurons;
pub mod settings;
pub mod skills;
pub mod subcategories;
pub mod uploads;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                   register (public)
/// /auth/login                      login (public)
/// /auth/me                         current user
/// /auth/change-password            change password
///
/// /skills                          list mine, create
/// /skills/public                   everyone's skills (public)
/// /skills/search?query=            substring search over mine
/// /skills/{id}                     get, update, delete
///
/// /neurons/*                       the same handlers on the newer name
///
/// /categories                      list (nested subcategories), create
/// /categories/{id}                 get, update, delete
/// /subcategories                   list, create
/// /subcategories/{id}              get, update, delete
///
/// /settings                        list, save one
/// /settings/bulk                   transactional bulk save
/// /settings/{name}                 get, delete
///
/// /uploads/upload                  multipart image upload
///
/// /graph?category=&query=          canvas scene (node view-models)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/skills", skills::router())
        .nest("/neurons", neurons::router())
        .nest("/categories", categories::router())
        .nest("/subcategories", subcategories::router())
        .nest("/settings", settings::router())
        .nest("/uploads", uploads::router())
        .nest("/graph", graph::router())
}
