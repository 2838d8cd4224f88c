pub mod auth;
pub mod booking;
pub mod health;
pub mod movie;
pub mod showtime;
pub mod user;

use axum::middleware::from_fn_with_state;
use axum::Router;

use crate::middleware::auth::require_auth;
use crate::state::AppState;

/// Build the application route tree.
///
/// Route hierarchy:
///
/// ```text
/// /login                                 login (public, form-encoded)
///
/// /users                                 list, create      (requires auth)
/// /users/{id}                            get, update, delete
/// /movies                                list, create      (requires auth)
/// /movies/{id}                           get, update, delete
/// /showtimes                             list, create      (requires auth)
/// /showtimes/{id}                        get, update, delete
/// /bookings                              list, create      (requires auth)
/// /bookings/{id}                         get, update, delete
/// ```
///
/// `/health` is mounted separately by the router builder.
pub fn app_routes(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .nest("/users", user::router())
        .nest("/movies", movie::router())
        .nest("/showtimes", showtime::router())
        .nest("/bookings", booking::router())
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    Router::new().merge(auth::router()).merge(protected)
}
