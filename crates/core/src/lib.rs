//! Domain logic shared by the persistence and HTTP layers.
//!
//! Nothing in this crate performs I/O. The conflict checker works on rows the
//! caller has already loaded, so the same rules apply whether they come from
//! PostgreSQL or from a test fixture.

pub mod conflict;
pub mod error;
pub mod showtime;
pub mod types;
pub mod validation;
