//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`session`] -- the token-keyed session store trait and its backends.
//! - [`token`] -- the token service: signed, time-limited tokens backed by a session record.
//! - [`bootstrap`] -- creates the initial administrator account.

pub mod bootstrap;
pub mod dynamo;
pub mod password;
pub mod session;
pub mod token;
