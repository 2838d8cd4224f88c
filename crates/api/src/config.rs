use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgSslMode};

use crate::auth::token::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development except
/// `JWT_SECRET`, which must always be provided.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Token signing configuration.
    pub jwt: JwtConfig,
    /// Where session records live.
    pub sessions: SessionBackend,
    /// Account created at startup if no user with its username exists.
    pub admin: AdminAccount,
}

/// Session store backend selected by `SESSION_BACKEND`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionBackend {
    /// `sessions` table in the main database.
    Postgres,
    /// A DynamoDB table keyed by `token` with a numeric `ttl` attribute.
    DynamoDb { table: String, region: String },
    /// Process memory. Lost on restart.
    Memory,
}

/// Credentials of the bootstrap administrator.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `8080`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SESSION_BACKEND`      | `postgres`                 |
    /// | `SESSION_TABLE`        | `sessions`                 |
    /// | `AWS_REGION`           | `us-east-1`                |
    /// | `ADMIN_USERNAME`       | `admin`                    |
    /// | `ADMIN_PASSWORD`       | `password`                 |
    /// | `ADMIN_EMAIL`          | `admin@example.com`        |
    ///
    /// See [`JwtConfig::from_env`] for the token settings.
    pub fn from_env() -> Self {
        let host = env_or("HOST", "0.0.0.0");

        let port: u16 = env_or("PORT", "8080")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = env_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let sessions = env_or("SESSION_BACKEND", "postgres")
            .parse()
            .unwrap_or_else(|e| panic!("{e}"));

        let admin = AdminAccount {
            username: env_or("ADMIN_USERNAME", "admin"),
            password: env_or("ADMIN_PASSWORD", "password"),
            email: env_or("ADMIN_EMAIL", "admin@example.com"),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            sessions,
            admin,
        }
    }
}

impl FromStr for SessionBackend {
    type Err = String;

    /// Parse a backend name. The DynamoDB variant reads its table and region
    /// from `SESSION_TABLE` and `AWS_REGION`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "dynamodb" | "dynamo" => Ok(Self::DynamoDb {
                table: env_or("SESSION_TABLE", "sessions"),
                region: env_or("AWS_REGION", "us-east-1"),
            }),
            "memory" => Ok(Self::Memory),
            other => Err(format!(
                "SESSION_BACKEND must be one of postgres, dynamodb, memory (got '{other}')"
            )),
        }
    }
}

/// Database connection options.
///
/// `DATABASE_URL` wins when set. Otherwise the options are assembled from
/// `DB_HOST` (`localhost`), `DB_PORT` (`5432`), `DB_USER`, `DB_PASSWORD`,
/// `DB_NAME` and `DB_SSLMODE` (`disable`).
///
/// # Panics
///
/// Panics on an unparsable URL, port or SSL mode.
pub fn database_options_from_env() -> PgConnectOptions {
    if let Ok(url) = std::env::var("DATABASE_URL") {
        return PgConnectOptions::from_str(&url).expect("DATABASE_URL must be a valid URL");
    }

    let port: u16 = env_or("DB_PORT", "5432")
        .parse()
        .expect("DB_PORT must be a valid u16");
    let ssl_mode = PgSslMode::from_str(&env_or("DB_SSLMODE", "disable"))
        .expect("DB_SSLMODE must be a valid PostgreSQL sslmode");

    let mut options = PgConnectOptions::new()
        .host(&env_or("DB_HOST", "localhost"))
        .port(port)
        .ssl_mode(ssl_mode);

    if let Ok(user) = std::env::var("DB_USER") {
        options = options.username(&user);
    }
    if let Ok(password) = std::env::var("DB_PASSWORD") {
        options = options.password(&password);
    }
    if let Ok(name) = std::env::var("DB_NAME") {
        options = options.database(&name);
    }
    options
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_names() {
        assert_eq!("postgres".parse::<SessionBackend>(), Ok(SessionBackend::Postgres));
        assert_eq!("MEMORY".parse::<SessionBackend>(), Ok(SessionBackend::Memory));
        assert!(matches!(
            "dynamodb".parse::<SessionBackend>(),
            Ok(SessionBackend::DynamoDb { .. })
        ));
        assert!("redis".parse::<SessionBackend>().is_err());
    }
}
