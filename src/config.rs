//! Runtime configuration read from the environment (and `.env`, if present)

use std::str::FromStr;
use thiserror::Error;

use crate::api::TransactionsClient;

pub const API_URL_VAR: &str = "DTMONEY_API_URL";
pub const PLACEMENT_VAR: &str = "DTMONEY_CREATE_PLACEMENT";

/// Invalid value in the environment
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("DTMONEY_API_URL must be an http(s) URL, got '{0}'")]
    InvalidBaseUrl(String),
    #[error("DTMONEY_CREATE_PLACEMENT must be 'append' or 'newest-first', got '{0}'")]
    InvalidPlacement(String),
}

/// Where a freshly created record goes in the local collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreatePlacement {
    /// At the end, whatever its timestamp (same as the web client)
    #[default]
    Append,
    /// At the position implied by `createdAt` descending
    NewestFirst,
}

impl FromStr for CreatePlacement {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "append" => Ok(CreatePlacement::Append),
            "newest-first" | "newest_first" => Ok(CreatePlacement::NewestFirst),
            other => Err(ConfigError::InvalidPlacement(other.to_string())),
        }
    }
}

/// Settings for building a client and store
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// Backend base URL, without a trailing `/` (`DTMONEY_API_URL`)
    pub base_url: String,
    /// Placement of created records (`DTMONEY_CREATE_PLACEMENT`)
    pub placement: CreatePlacement,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: TransactionsClient::DEFAULT_BASE_URL.to_string(),
            placement: CreatePlacement::default(),
        }
    }
}

impl StoreConfig {
    /// Read config from the process environment. Call `dotenv::dotenv()` first
    /// if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from any key lookup; unset keys fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = match lookup(API_URL_VAR) {
            Some(url) => {
                let url = url.trim().trim_end_matches('/').to_string();
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(ConfigError::InvalidBaseUrl(url));
                }
                url
            }
            None => TransactionsClient::DEFAULT_BASE_URL.to_string(),
        };

        let placement = match lookup(PLACEMENT_VAR) {
            Some(value) => value.parse()?,
            None => CreatePlacement::default(),
        };

        Ok(Self { base_url, placement })
    }
}
