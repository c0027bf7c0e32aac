//! Configuration types for moneyhack

use serde::{Deserialize, Serialize};

/// Backend API connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Backend base URL (e.g., "https://moneyhack-api.kibalabs.com")
    pub url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "https://moneyhack-api.kibalabs.com".to_string(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend connection settings
    pub backend: BackendConfig,

    /// Local gateway port
    #[serde(default = "default_api_port")]
    pub api_port: u16,
}

fn default_api_port() -> u16 {
    18453
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            api_port: default_api_port(),
        }
    }
}

impl AppConfig {
    /// Build a config from the environment, falling back to defaults.
    ///
    /// Honors `MONEYHACK_BACKEND_URL` and `MONEYHACK_API_PORT`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("MONEYHACK_BACKEND_URL") {
            if !url.is_empty() {
                config.backend.url = url;
            }
        }
        if let Ok(port) = std::env::var("MONEYHACK_API_PORT") {
            if let Ok(port) = port.parse() {
                config.api_port = port;
            }
        }
        config
    }
}
