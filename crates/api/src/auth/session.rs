//! Token-keyed session store.
//!
//! Every issued token gets a session record so a token can be checked for
//! server-side existence independently of its signature. A missing or
//! expired record is a valid "no session" answer (`Ok(None)`); only backend
//! failures are errors. The auth gate relies on that split: `None` becomes a
//! 401, an error becomes a 500.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use oneway_core::types::Timestamp;
use oneway_db::repositories::SessionRepo;
use oneway_db::DbPool;
use tokio::sync::RwLock;

use crate::auth::dynamo::DynamoSessionStore;
use crate::config::SessionBackend;

/// Server-side record of an issued token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub expires_at: Timestamp,
}

/// Failure to talk to the session backend. Never used for "not found".
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("session database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("session backend unavailable: {0}")]
    Unavailable(String),

    #[error("malformed session record: {0}")]
    Malformed(String),
}

/// Key-value persistence for sessions, keyed by the token string.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Unconditional upsert: an existing record for `token` is overwritten.
    async fn put(&self, token: &str, expires_at: Timestamp) -> Result<(), SessionStoreError>;

    /// Point lookup. Expired records are reported as `None`.
    async fn get(&self, token: &str) -> Result<Option<Session>, SessionStoreError>;
}

/// Build the configured backend.
pub async fn build_session_store(backend: &SessionBackend, pool: &DbPool) -> Arc<dyn SessionStore> {
    match backend {
        SessionBackend::Postgres => Arc::new(PgSessionStore::new(pool.clone())),
        SessionBackend::DynamoDb { table, region } => {
            Arc::new(DynamoSessionStore::connect(table.clone(), region.clone()).await)
        }
        SessionBackend::Memory => {
            tracing::warn!("Using in-memory session store; sessions are lost on restart");
            Arc::new(InMemorySessionStore::default())
        }
    }
}

// ---------------------------------------------------------------------------
// PostgreSQL
// ---------------------------------------------------------------------------

/// Sessions in the `sessions` table of the main database.
pub struct PgSessionStore {
    pool: DbPool,
}

impl PgSessionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn put(&self, token: &str, expires_at: Timestamp) -> Result<(), SessionStoreError> {
        SessionRepo::upsert(&self.pool, token, expires_at).await?;
        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<Session>, SessionStoreError> {
        let row = SessionRepo::find_active(&self.pool, token).await?;
        Ok(row.map(|row| Session {
            token: row.token,
            expires_at: row.expires_at,
        }))
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// Process-local store for development and tests.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Timestamp>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held, expired ones included.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn put(&self, token: &str, expires_at: Timestamp) -> Result<(), SessionStoreError> {
        self.sessions
            .write()
            .await
            .insert(token.to_string(), expires_at);
        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<Session>, SessionStoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(token)
            .filter(|expires_at| **expires_at > Utc::now())
            .map(|expires_at| Session {
                token: token.to_string(),
                expires_at: *expires_at,
            }))
    }
}
