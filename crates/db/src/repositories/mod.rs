//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod booking_repo;
pub mod movie_repo;
pub mod session_repo;
pub mod showtime_repo;
pub mod user_repo;

pub use booking_repo::BookingRepo;
pub use movie_repo::MovieRepo;
pub use session_repo::SessionRepo;
pub use showtime_repo::ShowtimeRepo;
pub use user_repo::UserRepo;
