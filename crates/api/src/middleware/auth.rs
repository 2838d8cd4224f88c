//! Auth gate for protected routes.
//!
//! A request passes when its `Authorization` header carries a token that
//! verifies and still has a live session record. The header holds the raw
//! token; a `Bearer ` prefix is accepted as well.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use oneway_core::error::CoreError;

use crate::auth::session::SessionStoreError;
use crate::auth::token::{Claims, TokenError};
use crate::error::AppError;
use crate::state::AppState;

/// A caller that got through the gate.
///
/// ```ignore
/// async fn whoami(session: AuthSession) -> String {
///     session.claims.username
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub claims: Claims,
}

/// Why the gate turned a request away.
#[derive(Debug, thiserror::Error)]
pub enum GateRejection {
    #[error("missing Authorization header")]
    MissingToken,

    #[error("token rejected: {0}")]
    InvalidToken(TokenError),

    #[error("no live session for token")]
    SessionNotFound,

    #[error("session lookup failed: {0}")]
    SessionLookup(SessionStoreError),
}

impl From<GateRejection> for AppError {
    fn from(rejection: GateRejection) -> Self {
        match rejection {
            GateRejection::SessionLookup(err) => err.into(),
            other => AppError::Core(CoreError::Unauthorized(other.to_string())),
        }
    }
}

impl IntoResponse for GateRejection {
    fn into_response(self) -> Response {
        tracing::debug!(reason = %self, "Request rejected by auth gate");
        AppError::from(self).into_response()
    }
}

impl AuthSession {
    /// Run the gate's checks against request headers.
    pub async fn authenticate(headers: &HeaderMap, state: &AppState) -> Result<Self, GateRejection> {
        let token = bearer_token(headers).ok_or(GateRejection::MissingToken)?;

        let claims = state
            .tokens
            .verify(token)
            .map_err(GateRejection::InvalidToken)?;

        state
            .sessions
            .get(token)
            .await
            .map_err(GateRejection::SessionLookup)?
            .ok_or(GateRejection::SessionNotFound)?;

        Ok(AuthSession {
            token: token.to_string(),
            claims,
        })
    }
}

/// Raw token from the `Authorization` header. Empty values count as missing.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    (!token.is_empty()).then_some(token)
}

/// Route layer guarding every protected router.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, GateRejection> {
    let session = AuthSession::authenticate(request.headers(), &state).await?;
    tracing::debug!(username = %session.claims.username, "Request admitted");
    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = GateRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(session) = parts.extensions.get::<AuthSession>() {
            return Ok(session.clone());
        }
        AuthSession::authenticate(&parts.headers, state).await
    }
}
