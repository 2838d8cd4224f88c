//! Hall scheduling and seat conflict rules.
//!
//! Both checks are advisory read-then-write predicates: the caller loads the
//! rows that could collide, asks this module whether the candidate fits, and
//! only then writes. The storage layer carries matching constraints as a
//! backstop for concurrent writers that both pass the pre-check.

use chrono::Duration;

use crate::error::{ConflictKind, CoreError};
use crate::types::{DbId, ShowTime};

/// Half-width of the window around a start time in which no other showtime
/// may be scheduled in the same hall.
pub const OVERLAP_WINDOW_HOURS: i64 = 3;

/// Lowest bookable seat number.
pub const SEAT_MIN: i32 = 1;

/// Highest bookable seat number.
pub const SEAT_MAX: i32 = 100;

// ---------------------------------------------------------------------------
// Showtimes
// ---------------------------------------------------------------------------

/// Inclusive `[start - 3h, start + 3h]` window around a start time.
pub fn overlap_window(start: ShowTime) -> (ShowTime, ShowTime) {
    let half = Duration::hours(OVERLAP_WINDOW_HOURS);
    (start - half, start + half)
}

/// An already scheduled showtime, as loaded from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowtimeSlot {
    pub id: DbId,
    pub movie_id: DbId,
    pub hall: String,
    pub start: ShowTime,
}

/// A showtime about to be created or updated.
///
/// `exclude_id` is set on the update path so a showtime never collides with
/// its own current row.
#[derive(Debug, Clone)]
pub struct ShowtimeCandidate<'a> {
    /// Accepted for symmetry with the stored row; it never affects the decision.
    pub movie_id: DbId,
    pub hall: &'a str,
    pub start: ShowTime,
    pub exclude_id: Option<DbId>,
}

impl ShowtimeCandidate<'_> {
    fn collides_with(&self, slot: &ShowtimeSlot) -> bool {
        if Some(slot.id) == self.exclude_id || slot.hall != self.hall {
            return false;
        }
        let (lo, hi) = overlap_window(self.start);
        slot.start >= lo && slot.start <= hi
    }
}

/// Whether any existing slot blocks the candidate.
pub fn showtime_overlaps(candidate: &ShowtimeCandidate<'_>, existing: &[ShowtimeSlot]) -> bool {
    existing.iter().any(|slot| candidate.collides_with(slot))
}

/// Reject the candidate with [`ConflictKind::OverlappingShowtime`] if it
/// falls inside the window of another showtime in the same hall.
pub fn check_showtime_overlap(
    candidate: &ShowtimeCandidate<'_>,
    existing: &[ShowtimeSlot],
) -> Result<(), CoreError> {
    if showtime_overlaps(candidate, existing) {
        return Err(ConflictKind::OverlappingShowtime.into());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Seats
// ---------------------------------------------------------------------------

/// Range check that must run before any conflict query.
pub fn validate_seat_number(seat_number: i32) -> Result<(), CoreError> {
    if !(SEAT_MIN..=SEAT_MAX).contains(&seat_number) {
        return Err(ConflictKind::SeatNumberOutOfRange.into());
    }
    Ok(())
}

/// Turn a count of colliding bookings into a decision.
pub fn check_seat_conflict(conflicting: i64) -> Result<(), CoreError> {
    if conflicting > 0 {
        return Err(ConflictKind::OverlappingSeat.into());
    }
    Ok(())
}
