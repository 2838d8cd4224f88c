//! Handlers for the `/showtimes` resource.
//!
//! Writes go through the hall scheduling check first: no two showtimes in
//! the same hall may start within three hours of each other.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use oneway_core::conflict::{check_showtime_overlap, overlap_window, ShowtimeCandidate, ShowtimeSlot};
use oneway_core::error::CoreError;
use oneway_core::showtime::parse_showtime;
use oneway_core::types::DbId;
use oneway_core::validation::require_non_empty;
use oneway_db::models::showtime::{Showtime, ShowtimeInput, ShowtimeRecord};
use oneway_db::repositories::ShowtimeRepo;
use oneway_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Showtime",
        id,
    })
}

fn to_record(input: ShowtimeInput) -> AppResult<ShowtimeRecord> {
    let showtime = parse_showtime(&input.showtime)?;
    require_non_empty("hall", &input.hall)?;
    Ok(ShowtimeRecord {
        movie_id: input.movie_id,
        showtime,
        hall: input.hall.trim().to_string(),
    })
}

/// Load the hall's showtimes around `record` and reject it if any collide.
async fn ensure_hall_free(
    pool: &DbPool,
    record: &ShowtimeRecord,
    exclude_id: Option<DbId>,
) -> AppResult<()> {
    let (from, to) = overlap_window(record.showtime);
    let nearby = ShowtimeRepo::find_in_window(pool, &record.hall, from, to, exclude_id).await?;
    let slots: Vec<ShowtimeSlot> = nearby.iter().map(ShowtimeSlot::from).collect();

    let candidate = ShowtimeCandidate {
        movie_id: record.movie_id,
        hall: &record.hall,
        start: record.showtime,
        exclude_id,
    };
    check_showtime_overlap(&candidate, &slots).inspect_err(|_| {
        tracing::info!(
            hall = %record.hall,
            showtime = %record.showtime,
            ?exclude_id,
            "Showtime rejected: hall window taken"
        );
    })?;
    Ok(())
}

/// POST /showtimes
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<ShowtimeInput>,
) -> AppResult<(StatusCode, Json<Showtime>)> {
    let record = to_record(input)?;
    ensure_hall_free(&state.pool, &record, None).await?;

    let showtime = ShowtimeRepo::create(&state.pool, &record).await?;
    tracing::info!(
        showtime_id = showtime.id,
        movie_id = showtime.movie_id,
        hall = %showtime.hall,
        "Showtime created"
    );
    Ok((StatusCode::CREATED, Json(showtime)))
}

/// GET /showtimes
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Showtime>>> {
    let showtimes = ShowtimeRepo::list(&state.pool).await?;
    Ok(Json(showtimes))
}

/// GET /showtimes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Showtime>> {
    let showtime = ShowtimeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(showtime))
}

/// PUT /showtimes/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ShowtimeInput>,
) -> AppResult<Json<Showtime>> {
    let record = to_record(input)?;
    ShowtimeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    ensure_hall_free(&state.pool, &record, Some(id)).await?;

    let showtime = ShowtimeRepo::update(&state.pool, id, &record)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(showtime_id = id, hall = %showtime.hall, "Showtime updated");
    Ok(Json(showtime))
}

/// DELETE /showtimes/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if ShowtimeRepo::delete(&state.pool, id).await? {
        tracing::info!(showtime_id = id, "Showtime deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
