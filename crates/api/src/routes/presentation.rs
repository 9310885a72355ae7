//! Route definitions for the `/presentations` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{presentation, slide};
use crate::state::AppState;

/// Routes mounted at `/presentations`.
///
/// ```text
/// GET    /                        -> list
/// POST   /                        -> create
/// GET    /{id}                    -> get_by_id
/// PUT    /{id}                    -> update
/// DELETE /{id}                    -> delete
///
/// GET    /{id}/slides             -> slide::list_by_presentation
/// POST   /{id}/slides             -> slide::create
/// POST   /{id}/slides/insert      -> slide::insert
/// POST   /{id}/slides/reorder     -> slide::reorder
/// ```
pub fn router() -> Router<AppState> {
    let slide_routes = Router::new()
        .route("/", get(slide::list_by_presentation).post(slide::create))
        .route("/insert", post(slide::insert))
        .route("/reorder", post(slide::reorder));

    Router::new()
        .route("/", get(presentation::list).post(presentation::create))
        .route(
            "/{id}",
            get(presentation::get_by_id)
                .put(presentation::update)
                .delete(presentation::delete),
        )
        .nest("/{id}/slides", slide_routes)
}
