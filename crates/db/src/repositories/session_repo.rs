//! Repository for the `sessions` table.

use oneway_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::session::SessionRow;

const COLUMNS: &str = "token, expires_at, created_at";

/// Token-keyed session records.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a session, overwriting any row with the same token.
    pub async fn upsert(
        pool: &PgPool,
        token: &str,
        expires_at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO sessions (token, expires_at)
             VALUES ($1, $2)
             ON CONFLICT (token) DO UPDATE SET expires_at = EXCLUDED.expires_at",
        )
        .bind(token)
        .bind(expires_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Find a session that has not yet expired.
    ///
    /// Expired rows are reported as `None`, the same as a missing token.
    pub async fn find_active(pool: &PgPool, token: &str) -> Result<Option<SessionRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sessions
             WHERE token = $1
               AND expires_at > NOW()"
        );
        sqlx::query_as::<_, SessionRow>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }
}
