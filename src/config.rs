//! Environment-driven configuration, loaded once at startup.

use std::env;
use std::sync::OnceLock;

use tracing::warn;

use crate::errors::{NewswatchError, Result};
use crate::utils::password::{hash_password, is_argon2_hash};

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Matching strategy of the province resolver. `Containment` is the
/// historical heuristic and the default; `Exact` trades recall for fewer
/// false positives on short province names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ResolverMode {
    #[default]
    Containment,
    Exact,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub database_url: String,
    pub max_connections: u32,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub username: String,
    /// Argon2 hash of the operator password. A plaintext value in the
    /// environment is hashed during `Config::from_env`.
    pub password_hash: String,
    pub jwt_secret: String,
    pub session_minutes: u64,
    pub cookie_secure: bool,
}

#[derive(Clone, Debug)]
pub struct RoutesConfig {
    pub api_prefix: String,
    pub dashboard_prefix: String,
    pub login_path: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub routes: RoutesConfig,
    pub resolver_mode: ResolverMode,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL").map_err(|_| {
            NewswatchError::database_config(
                "DATABASE_URL is not set. Point it at the news-monitoring database.",
            )
        })?;

        let username =
            env::var("NEWSWATCH_USERNAME").unwrap_or_else(|_| "ibusiness".to_string());
        let raw_password = env::var("NEWSWATCH_PASSWORD").map_err(|_| {
            NewswatchError::validation("NEWSWATCH_PASSWORD is not set; login would be impossible")
        })?;

        // Accept either a pre-hashed value or plaintext; plaintext is hashed
        // here so it never sticks around in config state.
        let password_hash = if is_argon2_hash(&raw_password) {
            raw_password
        } else {
            hash_password(&raw_password)
                .map_err(|e| NewswatchError::validation(e.to_string()))?
        };

        let jwt_secret = env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| {
                warn!("JWT_SECRET not configured or empty, generating a random per-process secret");
                format!(
                    "{}{}",
                    uuid::Uuid::new_v4().simple(),
                    uuid::Uuid::new_v4().simple()
                )
            });

        let resolver_mode = match env::var("NEWSWATCH_RESOLVER_MODE").as_deref() {
            Ok("exact") => ResolverMode::Exact,
            _ => ResolverMode::Containment,
        };

        Ok(Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: env::var("SERVER_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
            },
            database: DatabaseConfig {
                database_url,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10),
            },
            auth: AuthConfig {
                username,
                password_hash,
                jwt_secret,
                session_minutes: env::var("SESSION_MINUTES")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60),
                cookie_secure: env::var("COOKIE_SECURE")
                    .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                    .unwrap_or(false),
            },
            routes: RoutesConfig {
                api_prefix: env::var("API_ROUTE_PREFIX").unwrap_or_else(|_| "/api".to_string()),
                dashboard_prefix: env::var("DASHBOARD_ROUTE_PREFIX")
                    .unwrap_or_else(|_| "/dashboard".to_string()),
                login_path: env::var("LOGIN_PATH").unwrap_or_else(|_| "/login".to_string()),
            },
            resolver_mode,
        })
    }
}

/// Install the process-wide config. Later calls are ignored, which keeps
/// tests that install their own config from fighting each other.
pub fn init_config(config: Config) -> &'static Config {
    CONFIG.get_or_init(|| config)
}

/// Process-wide config. Panics if `init_config` was never called; `main`
/// installs it before the server starts.
pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("config not initialized; call init_config first")
}
