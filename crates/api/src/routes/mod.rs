pub mod health;
pub mod presentation;
pub mod slide;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /presentations                                  list, create (generated)
/// /presentations/{id}                             get (with slides), update, delete
/// /presentations/{id}/slides                      list, create at explicit order
/// /presentations/{id}/slides/insert               insert after a position (POST)
/// /presentations/{id}/slides/reorder              shift a tail of orders (POST)
///
/// /slides/{id}                                    get, update, delete (compacts)
/// /slides/{id}/regenerate                         preview a rewrite (POST)
/// /slides/{id}/regenerate/accept                  replace or keep both (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/presentations", presentation::router())
        .nest("/slides", slide::router())
}
