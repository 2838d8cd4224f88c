//! Handlers for the `/users` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use oneway_core::error::CoreError;
use oneway_core::types::DbId;
use oneway_core::validation::{require_non_empty, validate_email, validate_password};
use oneway_db::models::user::{UserRecord, UserResponse};
use oneway_db::repositories::UserRepo;
use serde::Deserialize;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Body of `POST /users` and `PUT /users/{id}`. The password is plaintext
/// here and hashed before it reaches the database.
#[derive(Debug, Deserialize)]
pub struct UserInput {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl UserInput {
    fn into_record(self) -> AppResult<UserRecord> {
        require_non_empty("username", &self.username)?;
        validate_email(&self.email)?;
        validate_password(&self.password)?;

        let password_hash = hash_password(&self.password)
            .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

        Ok(UserRecord {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password_hash,
        })
    }
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "User", id })
}

/// POST /users
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<UserInput>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let record = input.into_record()?;
    let user = UserRepo::create(&state.pool, &record).await?;
    tracing::info!(user_id = user.id, username = %user.username, "User created");
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /users
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(user.into()))
}

/// PUT /users/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UserInput>,
) -> AppResult<Json<UserResponse>> {
    let record = input.into_record()?;
    let user = UserRepo::update(&state.pool, id, &record)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(user_id = id, "User updated");
    Ok(Json(user.into()))
}

/// DELETE /users/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if UserRepo::delete(&state.pool, id).await? {
        tracing::info!(user_id = id, "User deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
