//! Handler for `POST /login`.

use axum::extract::State;
use axum::{Form, Json};
use oneway_core::error::CoreError;
use oneway_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Form body of `POST /login`. Absent fields are treated as empty strings
/// and fail the credential check like any other wrong value.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// POST /login
///
/// Check the credentials and hand out a token with a live session.
pub async fn login(
    State(state): State<AppState>,
    Form(input): Form<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = UserRepo::find_by_username(&state.pool, &input.username).await?;

    let authenticated = match &user {
        Some(user) => verify_password(&input.password, &user.password_hash)
            .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?,
        None => false,
    };

    if !authenticated {
        tracing::info!(username = %input.username, "Login failed");
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        )));
    }

    let issued = state.tokens.issue(&input.username).await.map_err(|e| {
        tracing::error!(username = %input.username, error = %e, "Failed to issue token");
        AppError::from(e)
    })?;

    tracing::info!(
        username = %issued.claims.username,
        expires_at = issued.claims.exp,
        "Login succeeded"
    );
    Ok(Json(LoginResponse {
        token: issued.token,
    }))
}
