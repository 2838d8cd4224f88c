use crate::types::DbId;

/// Scheduling and seating conflicts detected before a write.
///
/// The display strings are part of the public API: clients match on the
/// message text, so they must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConflictKind {
    #[error("Seat number must be between 1 and 100")]
    SeatNumberOutOfRange,

    #[error("Seat number is already booked for this showtime")]
    OverlappingSeat,

    #[error("Showtime overlaps with an existing showtime in the same hall")]
    OverlappingShowtime,
}

impl ConflictKind {
    /// Machine-readable code used in JSON error bodies.
    pub fn code(self) -> &'static str {
        match self {
            ConflictKind::SeatNumberOutOfRange => "SEAT_NUMBER_OUT_OF_RANGE",
            ConflictKind::OverlappingSeat => "OVERLAPPING_SEAT",
            ConflictKind::OverlappingShowtime => "OVERLAPPING_SHOWTIME",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Conflict(#[from] ConflictKind),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_messages_are_stable() {
        assert_eq!(
            ConflictKind::SeatNumberOutOfRange.to_string(),
            "Seat number must be between 1 and 100"
        );
        assert_eq!(
            ConflictKind::OverlappingSeat.to_string(),
            "Seat number is already booked for this showtime"
        );
        assert_eq!(
            ConflictKind::OverlappingShowtime.to_string(),
            "Showtime overlaps with an existing showtime in the same hall"
        );
    }

    #[test]
    fn conflict_converts_into_core_error_transparently() {
        let err: CoreError = ConflictKind::OverlappingSeat.into();
        assert_eq!(
            err.to_string(),
            "Seat number is already booked for this showtime"
        );
    }
}
