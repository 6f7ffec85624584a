//! Configuration module for handling environment variables and .env files

use crate::client::{RedditClient, RedditClientError};
use dotenv::dotenv;
use log::{info, warn};
use std::env;

pub const DEFAULT_USER_AGENT: &str = "reddit-mcp/0.1 (MCP tool server for Reddit data)";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_CONNECTIONS_PER_HOST: usize = 5;

/// Application configuration derived from environment variables and .env file
#[derive(Debug, Clone)]
pub struct AppConfig {
    // Reddit API credentials
    pub client_id: Option<String>,
    pub client_secret: Option<String>,

    // HTTP client settings
    pub user_agent: String,
    pub timeout_secs: u64,
    pub max_connections_per_host: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_connections_per_host: DEFAULT_MAX_CONNECTIONS_PER_HOST,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn load() -> Self {
        // Try to load .env file, but continue even if it doesn't exist
        match dotenv() {
            Ok(_) => info!("Loaded environment from .env file"),
            Err(_) => info!("No .env file found, using system environment variables only"),
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from a variable lookup function
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        config.client_id = non_empty("REDDIT_CLIENT_ID");
        config.client_secret = non_empty("REDDIT_CLIENT_SECRET");

        // User agent - use environment variable if available, otherwise use default
        if let Some(user_agent) = non_empty("REDDIT_USER_AGENT") {
            config.user_agent = user_agent;
        }

        if let Some(value) = non_empty("REDDIT_TIMEOUT_SECS") {
            match value.parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout_secs = secs,
                _ => warn!("Ignoring invalid REDDIT_TIMEOUT_SECS value: {}", value),
            }
        }

        if let Some(value) = non_empty("REDDIT_MAX_CONNECTIONS_PER_HOST") {
            match value.parse::<usize>() {
                Ok(max) if max > 0 => config.max_connections_per_host = max,
                _ => warn!(
                    "Ignoring invalid REDDIT_MAX_CONNECTIONS_PER_HOST value: {}",
                    value
                ),
            }
        }

        if config.client_id.is_some() != config.client_secret.is_some() {
            warn!("REDDIT_CLIENT_ID and REDDIT_CLIENT_SECRET must both be set to use OAuth");
        }

        config
    }

    /// Client id and secret, when both are set
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.client_id, &self.client_secret) {
            (Some(id), Some(secret)) => Some((id.as_str(), secret.as_str())),
            _ => None,
        }
    }

    /// Create a RedditClient from this configuration
    pub fn create_client(&self) -> Result<RedditClient, RedditClientError> {
        RedditClient::from_config(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_without_variables() {
        let config = config_from(&[]);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.max_connections_per_host, DEFAULT_MAX_CONNECTIONS_PER_HOST);
        assert!(config.credentials().is_none());
    }

    #[test]
    fn credentials_require_both_id_and_secret() {
        let config = config_from(&[("REDDIT_CLIENT_ID", "id")]);
        assert!(config.credentials().is_none());

        let config = config_from(&[
            ("REDDIT_CLIENT_ID", "id"),
            ("REDDIT_CLIENT_SECRET", "secret"),
        ]);
        assert_eq!(config.credentials(), Some(("id", "secret")));
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = config_from(&[("REDDIT_CLIENT_ID", "  "), ("REDDIT_USER_AGENT", "")]);
        assert!(config.client_id.is_none());
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn numeric_settings_are_parsed_and_validated() {
        let config = config_from(&[
            ("REDDIT_TIMEOUT_SECS", "10"),
            ("REDDIT_MAX_CONNECTIONS_PER_HOST", "2"),
            ("REDDIT_USER_AGENT", "test-agent/1.0"),
        ]);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.max_connections_per_host, 2);
        assert_eq!(config.user_agent, "test-agent/1.0");

        let config = config_from(&[
            ("REDDIT_TIMEOUT_SECS", "0"),
            ("REDDIT_MAX_CONNECTIONS_PER_HOST", "many"),
        ]);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.max_connections_per_host, DEFAULT_MAX_CONNECTIONS_PER_HOST);
    }
}
