//! Bot configuration loaded from environment variables.
//!
//! Only `BOT_TOKEN` is required; everything else has a default suitable for a
//! single-host deployment. The struct is built once in `main` and passed down
//! by reference.

use std::net::SocketAddr;
use std::path::PathBuf;

use donorbook_shared::constants::{DEFAULT_POLL_TIMEOUT_SECS, DEFAULT_POOL_SIZE};
use donorbook_shared::ActorId;

use crate::error::ConfigError;

/// Bot configuration.
#[derive(Clone)]
pub struct BotConfig {
    /// Telegram bot credential.
    /// Env: `BOT_TOKEN` (required)
    pub bot_token: String,

    /// Static admin allowlist, merged with the `admins` table at check time.
    /// Env: `ADMIN_IDS` (comma-separated, e.g. `12345,67890`)
    /// Default: empty
    pub admin_ids: Vec<ActorId>,

    /// SQLite database file.
    /// Env: `DB_PATH`
    /// Default: `./donorbook.db`
    pub db_path: PathBuf,

    /// Number of pooled database connections.
    /// Env: `DB_POOL_SIZE`
    /// Default: `4`
    pub db_pool_size: usize,

    /// Bot API base URL.
    /// Env: `TELEGRAM_API_URL`
    /// Default: `https://api.telegram.org`
    pub api_url: String,

    /// Long-poll timeout for `getUpdates`.
    /// Env: `POLL_TIMEOUT_SECS`
    /// Default: `30`
    pub poll_timeout_secs: u64,

    /// Socket address for the health endpoint.
    /// Env: `HTTP_ADDR`
    /// Default: unset (endpoint disabled)
    pub http_addr: Option<SocketAddr>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            admin_ids: Vec::new(),
            db_path: PathBuf::from("./donorbook.db"),
            db_pool_size: DEFAULT_POOL_SIZE,
            api_url: "https://api.telegram.org".to_string(),
            poll_timeout_secs: DEFAULT_POLL_TIMEOUT_SECS,
            http_addr: None,
        }
    }
}

impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("bot_token", &"<redacted>")
            .field("admin_ids", &self.admin_ids)
            .field("db_path", &self.db_path)
            .field("db_pool_size", &self.db_pool_size)
            .field("api_url", &self.api_url)
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .field("http_addr", &self.http_addr)
            .finish()
    }
}

impl BotConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        config.bot_token = get("BOT_TOKEN")
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .ok_or(ConfigError::MissingVar("BOT_TOKEN"))?;

        if let Some(raw) = get("ADMIN_IDS") {
            config.admin_ids = parse_admin_ids(&raw)?;
        }

        if let Some(path) = get("DB_PATH") {
            config.db_path = PathBuf::from(path);
        }

        if let Some(val) = get("DB_POOL_SIZE") {
            match val.parse::<usize>() {
                Ok(n) if n > 0 => config.db_pool_size = n,
                _ => tracing::warn!(value = %val, "Invalid DB_POOL_SIZE, using default"),
            }
        }

        if let Some(url) = get("TELEGRAM_API_URL") {
            config.api_url = url.trim_end_matches('/').to_string();
        }

        if let Some(val) = get("POLL_TIMEOUT_SECS") {
            if let Ok(n) = val.parse::<u64>() {
                config.poll_timeout_secs = n;
            } else {
                tracing::warn!(value = %val, "Invalid POLL_TIMEOUT_SECS, using default");
            }
        }

        if let Some(addr) = get("HTTP_ADDR") {
            if let Ok(parsed) = addr.parse::<SocketAddr>() {
                config.http_addr = Some(parsed);
            } else {
                tracing::warn!(value = %addr, "Invalid HTTP_ADDR, health endpoint disabled");
            }
        }

        Ok(config)
    }
}

/// Parse a comma-separated list of Telegram user ids.  A blank string is an
/// empty list; any malformed entry is an error.
pub fn parse_admin_ids(raw: &str) -> Result<Vec<ActorId>, ConfigError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    raw.split(',')
        .map(|part| {
            part.parse::<ActorId>()
                .map_err(|_| ConfigError::InvalidAdminId(part.trim().to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = BotConfig::from_lookup(lookup(&[("BOT_TOKEN", "123:abc")])).unwrap();
        assert_eq!(config.bot_token, "123:abc");
        assert!(config.admin_ids.is_empty());
        assert_eq!(config.db_path, PathBuf::from("./donorbook.db"));
        assert_eq!(config.db_pool_size, DEFAULT_POOL_SIZE);
        assert!(config.http_addr.is_none());
    }

    #[test]
    fn test_missing_token() {
        assert!(matches!(
            BotConfig::from_lookup(lookup(&[])),
            Err(ConfigError::MissingVar("BOT_TOKEN"))
        ));
        assert!(BotConfig::from_lookup(lookup(&[("BOT_TOKEN", "  ")])).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = BotConfig::from_lookup(lookup(&[
            ("BOT_TOKEN", "t"),
            ("ADMIN_IDS", "1, 2,3"),
            ("DB_PATH", "/var/lib/donorbook/db.sqlite"),
            ("DB_POOL_SIZE", "8"),
            ("TELEGRAM_API_URL", "http://localhost:8081/"),
            ("HTTP_ADDR", "127.0.0.1:9000"),
        ]))
        .unwrap();

        assert_eq!(config.admin_ids, [ActorId(1), ActorId(2), ActorId(3)]);
        assert_eq!(config.db_path, PathBuf::from("/var/lib/donorbook/db.sqlite"));
        assert_eq!(config.db_pool_size, 8);
        assert_eq!(config.api_url, "http://localhost:8081");
        assert_eq!(config.http_addr, Some(([127, 0, 0, 1], 9000).into()));
    }

    #[test]
    fn test_invalid_optional_values_keep_defaults() {
        let config = BotConfig::from_lookup(lookup(&[
            ("BOT_TOKEN", "t"),
            ("DB_POOL_SIZE", "0"),
            ("POLL_TIMEOUT_SECS", "soon"),
            ("HTTP_ADDR", "nowhere"),
        ]))
        .unwrap();

        assert_eq!(config.db_pool_size, DEFAULT_POOL_SIZE);
        assert_eq!(config.poll_timeout_secs, DEFAULT_POLL_TIMEOUT_SECS);
        assert!(config.http_addr.is_none());
    }

    #[test]
    fn test_parse_admin_ids() {
        assert!(parse_admin_ids("").unwrap().is_empty());
        assert!(parse_admin_ids("   ").unwrap().is_empty());
        assert_eq!(parse_admin_ids("42").unwrap(), [ActorId(42)]);
        assert!(matches!(
            parse_admin_ids("1,abc"),
            Err(ConfigError::InvalidAdminId(id)) if id == "abc"
        ));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = BotConfig {
            bot_token: "secret-token".into(),
            ..BotConfig::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret-token"));
    }
}
