//! Handlers for the `/movies` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use oneway_core::error::CoreError;
use oneway_core::types::DbId;
use oneway_core::validation::{require_non_empty, require_positive};
use oneway_db::models::movie::{Movie, MovieInput};
use oneway_db::repositories::MovieRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

fn validate(input: &MovieInput) -> AppResult<()> {
    require_non_empty("title", &input.title)?;
    require_non_empty("genre", &input.genre)?;
    require_positive("duration", input.duration)?;
    Ok(())
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Movie", id })
}

/// POST /movies
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<MovieInput>,
) -> AppResult<(StatusCode, Json<Movie>)> {
    validate(&input)?;
    let movie = MovieRepo::create(&state.pool, &input).await?;
    tracing::info!(movie_id = movie.id, title = %movie.title, "Movie created");
    Ok((StatusCode::CREATED, Json(movie)))
}

/// GET /movies
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Movie>>> {
    let movies = MovieRepo::list(&state.pool).await?;
    Ok(Json(movies))
}

/// GET /movies/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Movie>> {
    let movie = MovieRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(movie))
}

/// PUT /movies/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<MovieInput>,
) -> AppResult<Json<Movie>> {
    validate(&input)?;
    let movie = MovieRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(movie_id = id, "Movie updated");
    Ok(Json(movie))
}

/// DELETE /movies/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if MovieRepo::delete(&state.pool, id).await? {
        tracing::info!(movie_id = id, "Movie deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
