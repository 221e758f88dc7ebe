use serde::{Deserialize, Serialize};

use crate::log;

pub const DEFAULT_API_URL: &str = "https://srijandubey.github.io/campus-api-mock/SRM-C1-25.json";
pub const DEFAULT_SUGGESTION_LIMIT: usize = 3;
pub const DEFAULT_PHOTO_PLACEHOLDER: &str = "https://via.placeholder.com/150";

/// Directory settings. Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub api_url: String,
    pub suggestion_limit: usize,
    pub photo_placeholder: String,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            photo_placeholder: DEFAULT_PHOTO_PLACEHOLDER.to_string(),
        }
    }
}

impl DirectoryConfig {
    /// Parse a JSON config; an empty string means all defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json)
    }

    /// Native builds read `DOCTORS_API_URL` and `SUGGESTION_LIMIT`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = lookup("DOCTORS_API_URL").unwrap_or_else(|| {
            log::warn("DOCTORS_API_URL not set, using default endpoint");
            defaults.api_url.clone()
        });

        let suggestion_limit = match lookup("SUGGESTION_LIMIT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn(&format!("SUGGESTION_LIMIT '{}' is not a number, using default", raw));
                defaults.suggestion_limit
            }),
            None => defaults.suggestion_limit,
        };

        Self {
            api_url,
            suggestion_limit,
            ..defaults
        }
    }
}
