use std::net::Ipv4Addr;
use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use crate::provider::DEFAULT_BASE_URL;

pub const DEFAULT_HOST: Ipv4Addr = Ipv4Addr::LOCALHOST;
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("HOST is not in the correct format: {0}")]
    Host(String),
    #[error("PORT is not the correct format: {0}")]
    Port(String),
    #[error("STATS_TIMEOUT_SECS must be a positive number of seconds: {0}")]
    Timeout(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: Ipv4Addr,
    pub port: u16,
    pub stats_base_url: String,
    pub stats_timeout: Duration,
    pub season: String,
}

impl Config {
    /// Load configuration from the process environment (after `.env`, if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = match var("HOST") {
            Some(h) => h.trim().parse().map_err(|_| ConfigError::Host(h))?,
            None => DEFAULT_HOST,
        };

        let port = match var("PORT") {
            Some(p) => p.trim().parse().map_err(|_| ConfigError::Port(p))?,
            None => DEFAULT_PORT,
        };

        let stats_timeout = match var("STATS_TIMEOUT_SECS") {
            Some(t) => match t.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::Timeout(t)),
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            host,
            port,
            stats_base_url: var("STATS_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            stats_timeout,
            season: var("STATS_SEASON")
                .unwrap_or_else(|| season_for(chrono::Local::now().date_naive())),
        })
    }
}

/// NBA season label for a date, e.g. "2024-25". Seasons roll over in October.
pub fn season_for(date: NaiveDate) -> String {
    let start = if date.month() >= 10 {
        date.year()
    } else {
        date.year() - 1
    };
    format!("{}-{:02}", start, (start + 1) % 100)
}
