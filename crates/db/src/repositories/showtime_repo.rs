//! Repository for the `showtimes` table.

use oneway_core::types::{DbId, ShowTime};
use sqlx::PgPool;

use crate::models::showtime::{Showtime, ShowtimeRecord};

const COLUMNS: &str = "id, movie_id, showtime, hall, created_at, updated_at";

/// Provides CRUD operations and the hall window scan for showtimes.
pub struct ShowtimeRepo;

impl ShowtimeRepo {
    pub async fn create(pool: &PgPool, input: &ShowtimeRecord) -> Result<Showtime, sqlx::Error> {
        let query = format!(
            "INSERT INTO showtimes (movie_id, showtime, hall)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Showtime>(&query)
            .bind(input.movie_id)
            .bind(input.showtime)
            .bind(&input.hall)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Showtime>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM showtimes WHERE id = $1");
        sqlx::query_as::<_, Showtime>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Showtime>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM showtimes ORDER BY showtime, id");
        sqlx::query_as::<_, Showtime>(&query).fetch_all(pool).await
    }

    /// All showtimes in `hall` starting within `[from, to]` (both inclusive),
    /// optionally skipping one id (the row being updated).
    pub async fn find_in_window(
        pool: &PgPool,
        hall: &str,
        from: ShowTime,
        to: ShowTime,
        exclude_id: Option<DbId>,
    ) -> Result<Vec<Showtime>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM showtimes
             WHERE hall = $1
               AND showtime BETWEEN $2 AND $3
               AND ($4::BIGINT IS NULL OR id <> $4)
             ORDER BY showtime"
        );
        sqlx::query_as::<_, Showtime>(&query)
            .bind(hall)
            .bind(from)
            .bind(to)
            .bind(exclude_id)
            .fetch_all(pool)
            .await
    }

    /// Replace movie, start time and hall. Returns `None` if the showtime does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ShowtimeRecord,
    ) -> Result<Option<Showtime>, sqlx::Error> {
        let query = format!(
            "UPDATE showtimes SET movie_id = $2, showtime = $3, hall = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Showtime>(&query)
            .bind(id)
            .bind(input.movie_id)
            .bind(input.showtime)
            .bind(&input.hall)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM showtimes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
