//! Session row model.

use oneway_core::types::Timestamp;
use sqlx::FromRow;

/// A row from the `sessions` table: one per issued token.
#[derive(Debug, Clone, FromRow)]
pub struct SessionRow {
    pub token: String,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}
