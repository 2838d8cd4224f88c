//! Movie entity model and DTO.

use oneway_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `movies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Movie {
    pub id: DbId,
    pub title: String,
    /// Running time in minutes.
    pub duration: i32,
    pub genre: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body of `POST /movies` and `PUT /movies/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieInput {
    pub title: String,
    pub duration: i32,
    pub genre: String,
}
