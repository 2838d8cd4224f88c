//! Handlers for the `/bookings` resource.
//!
//! Every write checks the seat range first and only then counts bookings
//! already holding the seat for the same showtime.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use oneway_core::conflict::{check_seat_conflict, validate_seat_number};
use oneway_core::error::CoreError;
use oneway_core::types::DbId;
use oneway_db::models::booking::{Booking, BookingInput};
use oneway_db::repositories::BookingRepo;
use oneway_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Booking",
        id,
    })
}

async fn ensure_seat_free(
    pool: &DbPool,
    input: &BookingInput,
    exclude_id: Option<DbId>,
) -> AppResult<()> {
    validate_seat_number(input.seat_number)?;

    let taken =
        BookingRepo::count_seat_conflicts(pool, input.showtime_id, input.seat_number, exclude_id)
            .await?;
    check_seat_conflict(taken).inspect_err(|_| {
        tracing::info!(
            showtime_id = input.showtime_id,
            seat_number = input.seat_number,
            ?exclude_id,
            "Booking rejected: seat taken"
        );
    })?;
    Ok(())
}

/// POST /bookings
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<BookingInput>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    ensure_seat_free(&state.pool, &input, None).await?;

    let booking = BookingRepo::create(&state.pool, &input).await?;
    tracing::info!(
        booking_id = booking.id,
        showtime_id = booking.showtime_id,
        seat_number = booking.seat_number,
        "Booking created"
    );
    Ok((StatusCode::CREATED, Json(booking)))
}

/// GET /bookings
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Booking>>> {
    let bookings = BookingRepo::list(&state.pool).await?;
    Ok(Json(bookings))
}

/// GET /bookings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Booking>> {
    let booking = BookingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(booking))
}

/// PUT /bookings/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<BookingInput>,
) -> AppResult<Json<Booking>> {
    BookingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    ensure_seat_free(&state.pool, &input, Some(id)).await?;

    let booking = BookingRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(
        booking_id = id,
        seat_number = booking.seat_number,
        "Booking updated"
    );
    Ok(Json(booking))
}

/// DELETE /bookings/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if BookingRepo::delete(&state.pool, id).await? {
        tracing::info!(booking_id = id, "Booking deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use oneway_core::error::ConflictKind;
    use sqlx::postgres::PgPoolOptions;
    use std::time::Duration;

    /// Nothing listens on port 1, so any query fails fast.
    fn unreachable_pool() -> DbPool {
        PgPoolOptions::new()
            .acquire_timeout(Duration::from_secs(1))
            .connect_lazy("postgres://oneway@127.0.0.1:1/oneway")
            .unwrap()
    }

    fn input(seat_number: i32) -> BookingInput {
        BookingInput {
            user_id: 1,
            showtime_id: 1,
            seat_number,
        }
    }

    #[tokio::test]
    async fn out_of_range_seat_is_rejected_before_any_query() {
        let pool = unreachable_pool();
        for seat in [0, 101] {
            assert_matches!(
                ensure_seat_free(&pool, &input(seat), None).await,
                Err(AppError::Core(CoreError::Conflict(ConflictKind::SeatNumberOutOfRange)))
            );
            assert_matches!(
                ensure_seat_free(&pool, &input(seat), Some(7)).await,
                Err(AppError::Core(CoreError::Conflict(ConflictKind::SeatNumberOutOfRange)))
            );
        }
    }

    #[tokio::test]
    async fn in_range_seat_goes_on_to_the_conflict_count() {
        let pool = unreachable_pool();
        assert_matches!(
            ensure_seat_free(&pool, &input(1), None).await,
            Err(AppError::Database(_))
        );
    }
}
