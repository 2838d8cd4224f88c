//! Route definitions for the `/showtimes` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::showtime;
use crate::state::AppState;

/// Routes mounted at `/showtimes`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(showtime::list).post(showtime::create))
        .route(
            "/{id}",
            get(showtime::get_by_id).put(showtime::update).delete(showtime::delete),
        )
}
