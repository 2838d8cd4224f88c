//! Request middleware.
//!
//! - [`auth::require_auth`] -- the auth gate applied to every protected router.
//! - [`auth::AuthSession`] -- the authenticated session, available to handlers.

pub mod auth;
