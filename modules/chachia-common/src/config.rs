use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Chouchane travel-assistant API.
    pub api_base_url: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to the
    /// local development address.
    pub fn from_env() -> Self {
        Self {
            api_base_url: env::var("CHOUCHANE_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
        }
    }
}
