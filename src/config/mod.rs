//! Configuration system (layered: code > env).

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

/// Layered configuration for Courier.
///
/// Keys and base URLs are stored per service name (`"agent"` for the remote
/// agent endpoint, `"news"` for the lookup provider). Explicit setters win
/// over values loaded from the environment.
#[derive(Clone, Default)]
pub struct CourierConfig {
    api_keys: Arc<RwLock<HashMap<String, String>>>,
    base_urls: Arc<RwLock<HashMap<String, String>>>,
}

impl fmt::Debug for CourierConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CourierConfig")
            .field("api_keys", &"..")
            .field("base_urls", &self.base_urls)
            .finish()
    }
}

impl CourierConfig {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from environment variables (`OPENAI_API_KEY`, `NEWS_API_KEY`, …).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        let config = Self::new();

        let key_mappings = [
            ("OPENAI_API_KEY", "agent"),
            ("AGENT_API_KEY", "agent"),
            ("NEWS_API_KEY", "news"),
        ];
        for (env_var, service) in &key_mappings {
            if let Ok(key) = std::env::var(env_var) {
                config.set_api_key(service, key);
            }
        }

        let url_mappings = [
            ("AGENT_BASE_URL", "agent"),
            ("NEWS_BASE_URL", "news"),
        ];
        for (env_var, service) in &url_mappings {
            if let Ok(url) = std::env::var(env_var) {
                config.set_base_url(service, url);
            }
        }

        config
    }

    /// Set an API key for a service.
    pub fn set_api_key(&self, service: &str, key: String) {
        self.api_keys
            .write()
            .expect("config lock poisoned")
            .insert(service.to_string(), key);
    }

    /// Get the API key for a service.
    pub fn get_api_key(&self, service: &str) -> Option<String> {
        self.api_keys
            .read()
            .expect("config lock poisoned")
            .get(service)
            .cloned()
    }

    /// Set a base URL override for a service.
    pub fn set_base_url(&self, service: &str, url: String) {
        self.base_urls
            .write()
            .expect("config lock poisoned")
            .insert(service.to_string(), url);
    }

    /// Get the base URL override for a service.
    pub fn get_base_url(&self, service: &str) -> Option<String> {
        self.base_urls
            .read()
            .expect("config lock poisoned")
            .get(service)
            .cloned()
    }
}
