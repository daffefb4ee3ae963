//! Application Configuration
//!
//! Configuration for the auth application layer and the user store,
//! read from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use chrono::TimeDelta;
use platform::token::{SecretError, SigningAlgorithm, SigningSecret};
use thiserror::Error;

/// Configuration errors. All of them abort startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("SECRET_KEY: {0}")]
    Secret(#[source] SecretError),

    #[error("ALGORITHM: {0}")]
    Algorithm(#[source] SecretError),

    #[error("{key} must be a positive integer (got {value:?})")]
    NotPositiveInteger { key: &'static str, value: String },

    #[error("{key} must be true or false (got {value:?})")]
    NotBoolean { key: &'static str, value: String },
}

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret for bearer tokens
    pub token_secret: SigningSecret,
    pub token_algorithm: SigningAlgorithm,
    /// Access token lifetime
    pub token_ttl: TimeDelta,
    /// Insert the demo account at startup
    pub seed_demo_user: bool,
}

impl AuthConfig {
    pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;

    /// Config with the default algorithm and TTL
    pub fn new(token_secret: SigningSecret) -> Self {
        Self {
            token_secret,
            token_algorithm: SigningAlgorithm::default(),
            token_ttl: TimeDelta::minutes(Self::DEFAULT_TOKEN_TTL_MINUTES),
            seed_demo_user: false,
        }
    }

    /// Read `SECRET_KEY`, `ALGORITHM`, `ACCESS_TOKEN_EXPIRE_MINUTES` and
    /// `SEED_DEMO_USER` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token_secret = SigningSecret::new(lookup("SECRET_KEY").unwrap_or_default())
            .map_err(ConfigError::Secret)?;

        let token_algorithm = match lookup("ALGORITHM") {
            Some(value) => SigningAlgorithm::from_str(&value).map_err(ConfigError::Algorithm)?,
            None => SigningAlgorithm::default(),
        };

        let ttl_minutes = positive_integer(
            &lookup,
            "ACCESS_TOKEN_EXPIRE_MINUTES",
            Self::DEFAULT_TOKEN_TTL_MINUTES as u64,
        )?;

        Ok(Self {
            token_secret,
            token_algorithm,
            token_ttl: TimeDelta::minutes(ttl_minutes as i64),
            seed_demo_user: boolean(&lookup, "SEED_DEMO_USER", false)?,
        })
    }
}

/// User store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Durable store connection string; `None` selects the volatile store
    pub database_url: Option<String>,
    pub connect_timeout: Duration,
    pub query_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            connect_timeout: Duration::from_secs(5),
            query_timeout: Duration::from_secs(10),
        }
    }
}

impl StoreConfig {
    /// Read `DATABASE_URL`, `STORE_CONNECT_TIMEOUT_SECS` and
    /// `STORE_QUERY_TIMEOUT_SECS` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let database_url = lookup("DATABASE_URL")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        Ok(Self {
            database_url,
            connect_timeout: Duration::from_secs(positive_integer(
                &lookup,
                "STORE_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout.as_secs(),
            )?),
            query_timeout: Duration::from_secs(positive_integer(
                &lookup,
                "STORE_QUERY_TIMEOUT_SECS",
                defaults.query_timeout.as_secs(),
            )?),
        })
    }
}

fn positive_integer(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: u64,
) -> Result<u64, ConfigError> {
    let Some(value) = lookup(key) else {
        return Ok(default);
    };

    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 && n <= i32::MAX as u64 => Ok(n),
        _ => Err(ConfigError::NotPositiveInteger { key, value }),
    }
}

fn boolean(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: bool,
) -> Result<bool, ConfigError> {
    let Some(value) = lookup(key) else {
        return Ok(default);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        _ => Err(ConfigError::NotBoolean { key, value }),
    }
}
