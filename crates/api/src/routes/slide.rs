//! Route definitions for the `/slides` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::slide;
use crate::state::AppState;

/// Routes mounted at `/slides`.
///
/// ```text
/// GET    /{id}                       -> get_by_id
/// PUT    /{id}                       -> update
/// DELETE /{id}                       -> delete
/// POST   /{id}/regenerate            -> regenerate
/// POST   /{id}/regenerate/accept     -> accept_regenerated
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(slide::get_by_id)
                .put(slide::update)
                .delete(slide::delete),
        )
        .route("/{id}/regenerate", post(slide::regenerate))
        .route("/{id}/regenerate/accept", post(slide::accept_regenerated))
}
