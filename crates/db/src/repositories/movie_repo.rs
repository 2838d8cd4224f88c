//! Repository for the `movies` table.

use oneway_core::types::DbId;
use sqlx::PgPool;

use crate::models::movie::{Movie, MovieInput};

const COLUMNS: &str = "id, title, duration, genre, created_at, updated_at";

/// Provides CRUD operations for movies.
pub struct MovieRepo;

impl MovieRepo {
    pub async fn create(pool: &PgPool, input: &MovieInput) -> Result<Movie, sqlx::Error> {
        let query = format!(
            "INSERT INTO movies (title, duration, genre)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(&input.title)
            .bind(input.duration)
            .bind(&input.genre)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies ORDER BY id");
        sqlx::query_as::<_, Movie>(&query).fetch_all(pool).await
    }

    /// Replace title, duration and genre. Returns `None` if the movie does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &MovieInput,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!(
            "UPDATE movies SET title = $2, duration = $3, genre = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.duration)
            .bind(&input.genre)
            .fetch_optional(pool)
            .await
    }

    /// Delete a movie and, by cascade, its showtimes and their bookings.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
