use anyhow::Result;
use dotenvy::dotenv;
use std::env;

/// Console configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            api_url: env::var("API_URL").unwrap_or_else(|_| "http://localhost:8000".to_string()),
        })
    }
}
