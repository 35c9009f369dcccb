use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenvy::dotenv;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    pub remote_api_url: String,
    pub api_prefix: String,

    // Sessions
    pub session_ttl: Duration,
    pub session_capacity: u64,

    // Rate limiting
    pub rate_screen_per_min: u32,
    pub rate_catalog_per_min: u32,

    // Logging
    pub log_dir: String,
    pub log_level: tracing::Level,

    /// Settings that failed to parse and fell back to their default. Logged
    /// once the subscriber is up.
    pub warnings: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let mut warnings = Vec::new();
        let server_addr = env::var("SERVER_ADDR").context("SERVER_ADDR must be set")?;
        let remote_api_url = setting(
            "REMOTE_API_URL",
            "https://localhost:44353/api/CrudApplication",
        );
        let api_prefix = setting("API_PREFIX", "/api");
        let log_dir = setting("LOG_DIR", "logs");

        Ok(Self {
            server_addr,
            remote_api_url,
            api_prefix,
            session_ttl: Duration::from_secs(parsed("SESSION_TTL_SECS", 28_800, &mut warnings)),
            session_capacity: parsed("SESSION_CAPACITY", 10_000, &mut warnings),
            rate_screen_per_min: parsed("RATE_SCREEN_PER_MIN", 600, &mut warnings),
            rate_catalog_per_min: parsed("RATE_CATALOG_PER_MIN", 300, &mut warnings),
            log_dir,
            log_level: parsed("LOG_LEVEL", tracing::Level::DEBUG, &mut warnings),
            warnings,
        })
    }
}

fn setting(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// `key` parsed as `T`, or `default` when unset. A value that does not
/// parse also yields `default` and leaves a warning.
fn parsed<T: FromStr>(key: &str, default: T, warnings: &mut Vec<String>) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warnings.push(format!("{key}={raw} is not valid, using the default"));
            default
        }),
        Err(_) => default,
    }
}
