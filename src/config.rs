// src/config.rs
use regex::Regex;
use std::{env, sync::OnceLock, time::Duration};
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    domain: String,
    listen_addr: String,
    database_url: String,
    jwt_secret: String,
    jwt_cookie_name: String,
    session_ttl: Duration,
    cache_sweep_interval: Duration,
    discovery_timeout: Duration,
    graceful_shutdown_timeout: Duration,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".into()
}

fn default_database_url() -> String {
    "sqlite://indieauth.db?mode=rwc".into()
}

fn default_cookie_name() -> String {
    "indieauth_session".into()
}

fn cookie_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9+\-._]+$").expect("valid cookie name pattern"))
}

fn seconds(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: u64,
) -> Result<Duration, ConfigError> {
    let secs = match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::Invalid(format!("{key} must be a whole number of seconds")))?,
        None => default,
    };

    if secs == 0 {
        return Err(ConfigError::Invalid(format!("{key} must be greater than zero")));
    }
    Ok(Duration::from_secs(secs))
}

impl AppConfig {
    /// Build configuration from environment variables, after loading a `.env`
    /// file when one is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let domain = lookup("DOMAIN")
            .map(|d| d.trim().to_owned())
            .filter(|d| !d.is_empty())
            .ok_or(ConfigError::Missing("DOMAIN"))?;

        if domain.contains("://") || domain.contains('/') {
            return Err(ConfigError::Invalid(
                "DOMAIN must be a bare domain name such as auth.example.net".into(),
            ));
        }

        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let jwt_cookie_name = lookup("JWT_COOKIE_NAME").unwrap_or_else(default_cookie_name);
        if !cookie_name_pattern().is_match(&jwt_cookie_name) {
            return Err(ConfigError::Invalid(format!(
                "unsupported cookie name: {jwt_cookie_name}"
            )));
        }

        Ok(Self {
            domain,
            listen_addr: lookup("LISTEN_ADDR").unwrap_or_else(default_listen_addr),
            database_url: lookup("DATABASE_URL").unwrap_or_else(default_database_url),
            jwt_secret,
            jwt_cookie_name,
            session_ttl: seconds(&lookup, "SESSION_TTL_SECONDS", 3600)?,
            cache_sweep_interval: seconds(&lookup, "CACHE_SWEEP_INTERVAL_SECONDS", 60)?,
            discovery_timeout: seconds(&lookup, "DISCOVERY_TIMEOUT_SECONDS", 10)?,
            graceful_shutdown_timeout: seconds(&lookup, "GRACEFUL_SHUTDOWN_TIMEOUT_SECONDS", 30)?,
        })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The issuer identifier, `https://<domain>/`.
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.domain)
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    pub fn jwt_cookie_name(&self) -> &str {
        &self.jwt_cookie_name
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    pub fn cache_sweep_interval(&self) -> Duration {
        self.cache_sweep_interval
    }

    pub fn discovery_timeout(&self) -> Duration {
        self.discovery_timeout
    }

    pub fn graceful_shutdown_timeout(&self) -> Duration {
        self.graceful_shutdown_timeout
    }
}
