//! Configuration loaded from the environment (and `.env`, when present).

use std::env;
use std::time::Duration;

use crate::chesscom::client::{
    ChessComConfig, ARCHIVE_TIMEOUT, CHESSCOM_BASE_URL, DEFAULT_USER_AGENT, INDEX_TIMEOUT,
};
use crate::sync::DEFAULT_SYNC_MONTHS;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// PostgreSQL connection URL; the in-memory store is used without one
    pub database_url: Option<String>,
    pub chesscom: ChessComConfig,
    pub sync_months: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup, so tests need not touch the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or("PORT", &lookup, 3000u16)?;

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let sync_months = parse_or("SYNC_MONTHS", &lookup, DEFAULT_SYNC_MONTHS)?;
        if sync_months == 0 {
            return Err(ConfigError::Invalid("SYNC_MONTHS"));
        }

        let chesscom = ChessComConfig {
            base_url: lookup("CHESSCOM_BASE_URL").unwrap_or_else(|| CHESSCOM_BASE_URL.to_string()),
            user_agent: lookup("CHESSCOM_USER_AGENT")
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            index_timeout: timeout_or("INDEX_TIMEOUT_SECS", &lookup, INDEX_TIMEOUT)?,
            archive_timeout: timeout_or("ARCHIVE_TIMEOUT_SECS", &lookup, ARCHIVE_TIMEOUT)?,
        };

        Ok(Self {
            host,
            port,
            database_url,
            chesscom,
            sync_months,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

/// Whole seconds; zero would time out every request
fn timeout_or(
    key: &'static str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: Duration,
) -> Result<Duration, ConfigError> {
    match parse_or(key, lookup, default.as_secs())? {
        0 => Err(ConfigError::Invalid(key)),
        secs => Ok(Duration::from_secs(secs)),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid {0} value")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.database_url, None);
        assert_eq!(config.sync_months, 6);
        assert_eq!(config.chesscom.base_url, "https://api.chess.com/pub");
        assert_eq!(config.chesscom.index_timeout, Duration::from_secs(20));
        assert_eq!(config.chesscom.archive_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("DATABASE_URL", "postgres://localhost/chess"),
            ("SYNC_MONTHS", "12"),
            ("CHESSCOM_USER_AGENT", "tally-test (me@example.com)"),
            ("INDEX_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/chess")
        );
        assert_eq!(config.sync_months, 12);
        assert_eq!(config.chesscom.user_agent, "tally-test (me@example.com)");
        assert_eq!(config.chesscom.index_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            Config::from_lookup(lookup_from(&[("PORT", "http")])).unwrap_err(),
            ConfigError::Invalid("PORT")
        );
        assert_eq!(
            Config::from_lookup(lookup_from(&[("SYNC_MONTHS", "0")])).unwrap_err(),
            ConfigError::Invalid("SYNC_MONTHS")
        );
    }

    #[test]
    fn test_zero_timeouts_are_rejected() {
        assert_eq!(
            Config::from_lookup(lookup_from(&[("INDEX_TIMEOUT_SECS", "0")])).unwrap_err(),
            ConfigError::Invalid("INDEX_TIMEOUT_SECS")
        );
        assert_eq!(
            Config::from_lookup(lookup_from(&[("ARCHIVE_TIMEOUT_SECS", " 0 ")])).unwrap_err(),
            ConfigError::Invalid("ARCHIVE_TIMEOUT_SECS")
        );
    }
}
