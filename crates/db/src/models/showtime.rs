//! Showtime entity model and DTOs.

use oneway_core::conflict::ShowtimeSlot;
use oneway_core::types::{DbId, ShowTime, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `showtimes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Showtime {
    pub id: DbId,
    pub movie_id: DbId,
    /// Start time, serialized as `"YYYY-MM-DD HH:MM"`.
    #[serde(with = "oneway_core::showtime::wire")]
    pub showtime: ShowTime,
    pub hall: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Showtime> for ShowtimeSlot {
    fn from(row: &Showtime) -> Self {
        ShowtimeSlot {
            id: row.id,
            movie_id: row.movie_id,
            hall: row.hall.clone(),
            start: row.showtime,
        }
    }
}

/// Body of `POST /showtimes` and `PUT /showtimes/{id}`.
///
/// `showtime` stays a string here so a malformed value can be reported with
/// the dedicated "Invalid showtime format" message.
#[derive(Debug, Clone, Deserialize)]
pub struct ShowtimeInput {
    pub movie_id: DbId,
    pub showtime: String,
    pub hall: String,
}

/// Validated showtime ready to be written.
#[derive(Debug, Clone)]
pub struct ShowtimeRecord {
    pub movie_id: DbId,
    pub showtime: ShowTime,
    pub hall: String,
}
