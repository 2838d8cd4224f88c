//! Showtime wire format (`"YYYY-MM-DD HH:MM"`).

use chrono::NaiveDateTime;

use crate::error::CoreError;
use crate::types::ShowTime;

/// chrono pattern for the showtime wire format.
pub const SHOWTIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Message returned when a showtime string cannot be parsed.
pub const INVALID_SHOWTIME_FORMAT: &str = "Invalid showtime format";

/// Parse a `"YYYY-MM-DD HH:MM"` string into a wall-clock start time.
pub fn parse_showtime(input: &str) -> Result<ShowTime, CoreError> {
    NaiveDateTime::parse_from_str(input.trim(), SHOWTIME_FORMAT)
        .map_err(|_| CoreError::Validation(INVALID_SHOWTIME_FORMAT.into()))
}

/// Render a start time in the wire format.
pub fn format_showtime(value: ShowTime) -> String {
    value.format(SHOWTIME_FORMAT).to_string()
}

/// Serde adapter for `#[serde(with = "oneway_core::showtime::wire")]` fields.
pub mod wire {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{format_showtime, parse_showtime};
    use crate::types::ShowTime;

    pub fn serialize<S: Serializer>(value: &ShowTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_showtime(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ShowTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_showtime(&raw).map_err(serde::de::Error::custom)
    }
}
