//! Repository for the `bookings` table.

use oneway_core::types::DbId;
use sqlx::PgPool;

use crate::models::booking::{Booking, BookingInput};

const COLUMNS: &str = "id, user_id, showtime_id, seat_number, created_at, updated_at";

/// Provides CRUD operations and the seat conflict count for bookings.
pub struct BookingRepo;

impl BookingRepo {
    pub async fn create(pool: &PgPool, input: &BookingInput) -> Result<Booking, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookings (user_id, showtime_id, seat_number)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(input.user_id)
            .bind(input.showtime_id)
            .bind(input.seat_number)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings ORDER BY id");
        sqlx::query_as::<_, Booking>(&query).fetch_all(pool).await
    }

    /// Number of bookings holding `seat_number` for `showtime_id`, ignoring
    /// `exclude_id` when given (the booking being updated).
    pub async fn count_seat_conflicts(
        pool: &PgPool,
        showtime_id: DbId,
        seat_number: i32,
        exclude_id: Option<DbId>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM bookings
             WHERE showtime_id = $1
               AND seat_number = $2
               AND ($3::BIGINT IS NULL OR id <> $3)",
        )
        .bind(showtime_id)
        .bind(seat_number)
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }

    /// Replace user, showtime and seat. Returns `None` if the booking does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &BookingInput,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings SET user_id = $2, showtime_id = $3, seat_number = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(input.user_id)
            .bind(input.showtime_id)
            .bind(input.seat_number)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
