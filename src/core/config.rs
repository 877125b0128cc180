use once_cell::sync::Lazy;
use secrecy::{ExposeSecret, SecretString};
use std::env;
use std::fmt;
use std::time::Duration;

use crate::core::error::ConfigError;

/// Path to the profile catalog (read-only JSON array)
/// Read from PROFILES_PATH environment variable
/// Default: profiles.json
pub static PROFILES_PATH: Lazy<String> =
    Lazy::new(|| env::var("PROFILES_PATH").unwrap_or_else(|_| "profiles.json".to_string()));

/// Path to the subscriber list (JSON array of chat ids, rewritten on every change)
/// Read from SUBSCRIBERS_PATH environment variable
/// Default: subscribers.json
pub static SUBSCRIBERS_PATH: Lazy<String> =
    Lazy::new(|| env::var("SUBSCRIBERS_PATH").unwrap_or_else(|_| "subscribers.json".to_string()));

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: app.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "app.log".to_string()));

/// Custom Bot API server URL (local telegram-bot-api instance)
pub static BOT_API_URL: Lazy<Option<String>> = Lazy::new(|| {
    env::var("BOT_API_URL").ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
});

/// Default HTTP port for the health endpoint
pub const DEFAULT_PORT: u16 = 3000;

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for Bot API and self-ping HTTP requests (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 60;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Self-ping configuration (keeps free hosting tiers from idling the process)
pub mod keep_alive {
    use super::Duration;
    use once_cell::sync::Lazy;
    use std::env;

    /// Default interval between self-pings (in seconds)
    pub const DEFAULT_INTERVAL_SECS: u64 = 5 * 60;

    /// Interval override from KEEP_ALIVE_INTERVAL_SECS; 0 disables the timer
    pub static INTERVAL_SECS: Lazy<u64> = Lazy::new(|| {
        env::var("KEEP_ALIVE_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_INTERVAL_SECS)
    });

    /// Self-ping interval, `None` when disabled
    pub fn interval() -> Option<Duration> {
        match *INTERVAL_SECS {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

/// Dispatcher restart configuration
pub mod retry {
    use super::Duration;

    /// Maximum number of restarts after the dispatcher task panics
    pub const MAX_DISPATCHER_RETRIES: u32 = 5;

    /// Delay between dispatcher retry attempts (in seconds)
    pub const DISPATCHER_RETRY_DELAY_SECS: u64 = 5;

    /// Dispatcher retry delay duration
    pub fn dispatcher_delay() -> Duration {
        Duration::from_secs(DISPATCHER_RETRY_DELAY_SECS)
    }

    /// Base for exponential backoff calculation
    pub const EXPONENTIAL_BACKOFF_BASE: u64 = 2;
}

/// Validated runtime configuration.
///
/// Required values are checked once at startup; a missing bot token or
/// administrator id aborts the process before any update is processed.
pub struct BotConfig {
    bot_token: SecretString,
    /// Numeric Telegram id allowed to run admin commands and receiving notifications
    pub admin_id: i64,
    /// Port for the health endpoint
    pub port: u16,
    /// Externally reachable base URL used for self-ping
    pub self_url: String,
    /// Whether `/start` also registers the sender as a subscriber
    pub subscribe_on_start: bool,
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("bot_token", &"<redacted>")
            .field("admin_id", &self.admin_id)
            .field("port", &self.port)
            .field("self_url", &self.self_url)
            .field("subscribe_on_start", &self.subscribe_on_start)
            .finish()
    }
}

impl BotConfig {
    /// Reads the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bot_token = get("BOT_TOKEN")
            .or_else(|| get("TELOXIDE_TOKEN"))
            .ok_or(ConfigError::Missing("BOT_TOKEN"))?;

        let (admin_var, admin_raw) = get("ADMIN_ID")
            .map(|v| ("ADMIN_ID", v))
            .or_else(|| get("ADMIN_USER_ID").map(|v| ("ADMIN_USER_ID", v)))
            .ok_or(ConfigError::Missing("ADMIN_ID"))?;
        let admin_id = match admin_raw.parse::<i64>() {
            Ok(id) if id != 0 => id,
            _ => {
                return Err(ConfigError::Invalid {
                    var: admin_var,
                    value: admin_raw,
                })
            }
        };

        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                value: raw.clone(),
            })?,
            None => DEFAULT_PORT,
        };

        let self_url = get("RENDER_EXTERNAL_URL")
            .or_else(|| get("SELF_URL"))
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("http://localhost:{}", port));

        let subscribe_on_start = match get("SUBSCRIBE_ON_START") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid {
                var: "SUBSCRIBE_ON_START",
                value: raw,
            })?,
            None => true,
        };

        Ok(Self {
            bot_token: SecretString::from(bot_token),
            admin_id,
            port,
            self_url,
            subscribe_on_start,
        })
    }

    /// Bot API token
    pub fn bot_token(&self) -> &str {
        self.bot_token.expose_secret()
    }

    /// Checks whether the given user id is the configured administrator
    pub fn is_admin(&self, user_id: i64) -> bool {
        self.admin_id == user_id
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = BotConfig::from_lookup(lookup(&[("BOT_TOKEN", "123:abc"), ("ADMIN_ID", "42")])).unwrap();
        assert_eq!(config.bot_token(), "123:abc");
        assert_eq!(config.admin_id, 42);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.self_url, "http://localhost:3000");
        assert!(config.subscribe_on_start);
        assert!(config.is_admin(42));
        assert!(!config.is_admin(43));
    }

    #[test]
    fn test_missing_token_is_fatal() {
        let err = BotConfig::from_lookup(lookup(&[("ADMIN_ID", "42")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("BOT_TOKEN")));
    }

    #[test]
    fn test_missing_or_invalid_admin_is_fatal() {
        let err = BotConfig::from_lookup(lookup(&[("BOT_TOKEN", "t")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("ADMIN_ID")));

        let err = BotConfig::from_lookup(lookup(&[("BOT_TOKEN", "t"), ("ADMIN_ID", "abc")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "ADMIN_ID", .. }));

        let err = BotConfig::from_lookup(lookup(&[("BOT_TOKEN", "t"), ("ADMIN_ID", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "ADMIN_ID", .. }));
    }

    #[test]
    fn test_fallback_variables() {
        let config = BotConfig::from_lookup(lookup(&[
            ("TELOXIDE_TOKEN", "fallback"),
            ("ADMIN_USER_ID", "-100"),
            ("PORT", "8080"),
            ("SELF_URL", "https://bot.example.com/"),
            ("SUBSCRIBE_ON_START", "no"),
        ]))
        .unwrap();
        assert_eq!(config.bot_token(), "fallback");
        assert_eq!(config.admin_id, -100);
        assert_eq!(config.port, 8080);
        assert_eq!(config.self_url, "https://bot.example.com");
        assert!(!config.subscribe_on_start);
    }

    #[test]
    fn test_render_url_wins_over_self_url() {
        let config = BotConfig::from_lookup(lookup(&[
            ("BOT_TOKEN", "t"),
            ("ADMIN_ID", "1"),
            ("RENDER_EXTERNAL_URL", "https://render.example.com"),
            ("SELF_URL", "https://other.example.com"),
        ]))
        .unwrap();
        assert_eq!(config.self_url, "https://render.example.com");
    }

    #[test]
    fn test_invalid_port() {
        let err = BotConfig::from_lookup(lookup(&[("BOT_TOKEN", "t"), ("ADMIN_ID", "1"), ("PORT", "99999")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "PORT", .. }));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = BotConfig::from_lookup(lookup(&[("BOT_TOKEN", "secret-token"), ("ADMIN_ID", "1")])).unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("secret-token"));
        assert!(printed.contains("<redacted>"));
    }
}
