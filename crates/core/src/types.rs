/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Wall-clock start time of a showtime (stored as `TIMESTAMP` without zone).
pub type ShowTime = chrono::NaiveDateTime;
