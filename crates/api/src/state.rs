use std::sync::Arc;

use crate::auth::session::SessionStore;
use crate::auth::token::TokenService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: oneway_db::DbPool,
    /// Issues and verifies tokens; writes a session for every issued token.
    pub tokens: Arc<TokenService>,
    /// The same store the token service writes to, read by the auth gate.
    pub sessions: Arc<dyn SessionStore>,
}
