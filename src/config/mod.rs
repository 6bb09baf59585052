//! Configuration module for handling environment variables and .env files

use crate::client::{
    RedditClient, RedditClientError, Result, DEFAULT_USER_AGENT, OAUTH_API_BASE, PUBLIC_API_BASE,
};
use dotenv::dotenv;
use log::info;
use std::env;
use std::time::Duration;

pub const DEFAULT_PAGE_LIMIT: u32 = 25;
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Application configuration derived from environment variables and .env file
#[derive(Debug, Clone)]
pub struct AppConfig {
    // Reddit API settings
    pub user_agent: String,
    pub api_base: Option<String>,
    pub page_limit: u32,
    pub timeout: Duration,

    // Bearer token issued elsewhere (if provided directly)
    pub access_token: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            api_base: None,
            page_limit: DEFAULT_PAGE_LIMIT,
            timeout: Duration::from_secs(30),
            access_token: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn load() -> Result<Self> {
        // Try to load .env file, but continue even if it doesn't exist
        match dotenv() {
            Ok(_) => info!("Loaded environment from .env file"),
            Err(_) => info!("No .env file found, using system environment variables only"),
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(user_agent) = lookup("REDDIT_USER_AGENT").filter(|v| !v.trim().is_empty()) {
            config.user_agent = user_agent;
        }

        config.api_base = lookup("REDDIT_API_BASE").filter(|v| !v.trim().is_empty());
        config.access_token = lookup("REDDIT_ACCESS_TOKEN").filter(|v| !v.trim().is_empty());

        if let Some(limit_str) = lookup("REDDIT_PAGE_LIMIT") {
            let limit = limit_str.trim().parse::<u32>().map_err(|_| {
                RedditClientError::Config(format!("REDDIT_PAGE_LIMIT is not a number: {}", limit_str))
            })?;
            if limit == 0 || limit > MAX_PAGE_LIMIT {
                return Err(RedditClientError::Config(format!(
                    "REDDIT_PAGE_LIMIT must be between 1 and {}, got {}",
                    MAX_PAGE_LIMIT, limit
                )));
            }
            config.page_limit = limit;
        }

        if let Some(timeout_str) = lookup("REDDIT_TIMEOUT_SECS") {
            let secs = timeout_str.trim().parse::<u64>().map_err(|_| {
                RedditClientError::Config(format!(
                    "REDDIT_TIMEOUT_SECS is not a number: {}",
                    timeout_str
                ))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// The API root requests go to: the override, else the OAuth host when a
    /// token is configured, else the public host.
    pub fn api_base(&self) -> String {
        match (&self.api_base, &self.access_token) {
            (Some(base), _) => base.clone(),
            (None, Some(_)) => OAUTH_API_BASE.to_string(),
            (None, None) => PUBLIC_API_BASE.to_string(),
        }
    }

    /// Create a RedditClient from this configuration
    pub fn create_client(&self) -> Result<RedditClient> {
        RedditClient::from_config(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_variables() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.page_limit, DEFAULT_PAGE_LIMIT);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.api_base(), PUBLIC_API_BASE);
    }

    #[test]
    fn token_selects_oauth_host_unless_overridden() {
        let config = config_from(&[("REDDIT_ACCESS_TOKEN", "abc")]).unwrap();
        assert_eq!(config.api_base(), OAUTH_API_BASE);

        let config = config_from(&[
            ("REDDIT_ACCESS_TOKEN", "abc"),
            ("REDDIT_API_BASE", "http://localhost:9999"),
        ])
        .unwrap();
        assert_eq!(config.api_base(), "http://localhost:9999");
    }

    #[test]
    fn parses_numbers() {
        let config = config_from(&[
            ("REDDIT_PAGE_LIMIT", "100"),
            ("REDDIT_TIMEOUT_SECS", "5"),
            ("REDDIT_USER_AGENT", "test-agent/0.1"),
        ])
        .unwrap();
        assert_eq!(config.page_limit, 100);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "test-agent/0.1");
    }

    #[test]
    fn rejects_bad_numbers() {
        for pairs in [
            [("REDDIT_PAGE_LIMIT", "lots")],
            [("REDDIT_PAGE_LIMIT", "0")],
            [("REDDIT_PAGE_LIMIT", "101")],
            [("REDDIT_TIMEOUT_SECS", "-1")],
        ] {
            let err = config_from(&pairs).unwrap_err();
            assert!(matches!(err, RedditClientError::Config(_)), "{pairs:?}");
        }
    }
}
