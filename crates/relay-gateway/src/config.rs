//! Gateway configuration types.
//!
//! Every field can be set from an environment variable; see
//! [`GatewayConfig::from_env`].

use std::time::Duration;

use serde::Deserialize;

/// Configuration for the gateway service.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Listen address (e.g., "0.0.0.0:8000").
    #[serde(default = "GatewayConfig::default_listen_addr")]
    pub listen_addr: String,

    /// Base URL of the task RPC service.
    #[serde(default = "GatewayConfig::default_task_service_url")]
    pub task_service_url: String,

    /// SOAP endpoint of the user service.
    #[serde(default = "GatewayConfig::default_user_service_url")]
    pub user_service_url: String,

    /// Base URL used in hypermedia links. Derived from the `Host` header
    /// when unset.
    #[serde(default)]
    pub public_base_url: Option<String>,

    /// Allowed CORS origins.
    #[serde(default = "GatewayConfig::default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Per-call bound on backend calls, in seconds.
    #[serde(default = "GatewayConfig::default_backend_timeout")]
    pub backend_timeout_seconds: u64,

    /// Maximum request body size in bytes.
    #[serde(default = "GatewayConfig::default_max_body")]
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    #[serde(default = "GatewayConfig::default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl GatewayConfig {
    fn default_listen_addr() -> String {
        "0.0.0.0:8000".to_string()
    }

    fn default_task_service_url() -> String {
        "http://localhost:50051".to_string()
    }

    fn default_user_service_url() -> String {
        "http://localhost:8001/".to_string()
    }

    fn default_cors_origins() -> Vec<String> {
        vec!["*".to_string()]
    }

    const fn default_backend_timeout() -> u64 {
        5
    }

    const fn default_max_body() -> usize {
        1024 * 1024 // 1 MB
    }

    const fn default_request_timeout() -> u64 {
        30
    }

    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable numeric variables fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("LISTEN_ADDR") {
            config.listen_addr = v;
        }
        if let Some(v) = lookup("TASK_SERVICE_URL") {
            config.task_service_url = v;
        }
        if let Some(v) = lookup("USER_SERVICE_URL") {
            config.user_service_url = v;
        }
        config.public_base_url = lookup("PUBLIC_BASE_URL").filter(|v| !v.trim().is_empty());
        if let Some(v) = lookup("CORS_ORIGINS") {
            config.cors_origins = v
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(v) = lookup("BACKEND_TIMEOUT_SECONDS").and_then(|v| v.parse().ok()) {
            config.backend_timeout_seconds = v;
        }
        if let Some(v) = lookup("MAX_BODY_BYTES").and_then(|v| v.parse().ok()) {
            config.max_body_bytes = v;
        }
        if let Some(v) = lookup("REQUEST_TIMEOUT_SECONDS").and_then(|v| v.parse().ok()) {
            config.request_timeout_seconds = v;
        }

        config
    }

    /// Get the backend call bound as a `Duration`.
    #[must_use]
    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend_timeout_seconds)
    }

    /// Get the request timeout as a `Duration`.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: Self::default_listen_addr(),
            task_service_url: Self::default_task_service_url(),
            user_service_url: Self::default_user_service_url(),
            public_base_url: None,
            cors_origins: Self::default_cors_origins(),
            backend_timeout_seconds: Self::default_backend_timeout(),
            max_body_bytes: Self::default_max_body(),
            request_timeout_seconds: Self::default_request_timeout(),
        }
    }
}
