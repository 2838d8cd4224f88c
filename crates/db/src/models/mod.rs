//! Row structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity matching the table and the
//! DTOs the repositories accept for inserts and updates.

pub mod booking;
pub mod movie;
pub mod session;
pub mod showtime;
pub mod user;
