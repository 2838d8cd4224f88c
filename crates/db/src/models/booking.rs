//! Booking entity model and DTO.

use oneway_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `bookings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: DbId,
    pub user_id: DbId,
    pub showtime_id: DbId,
    pub seat_number: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body of `POST /bookings` and `PUT /bookings/{id}`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BookingInput {
    pub user_id: DbId,
    pub showtime_id: DbId,
    pub seat_number: i32,
}
