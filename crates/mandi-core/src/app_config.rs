use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub catalog_path: PathBuf,
    pub recipe_base_url: Option<String>,
    pub recipe_api_key: Option<String>,
    pub recipe_request_timeout_secs: u64,
    pub recipe_max_retries: u32,
    pub recipe_retry_backoff_base_ms: u64,
    pub rate_limit_max_requests: usize,
    pub rate_limit_window_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("catalog_path", &self.catalog_path)
            .field("recipe_base_url", &self.recipe_base_url)
            .field(
                "recipe_api_key",
                &self.recipe_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "recipe_request_timeout_secs",
                &self.recipe_request_timeout_secs,
            )
            .field("recipe_max_retries", &self.recipe_max_retries)
            .field(
                "recipe_retry_backoff_base_ms",
                &self.recipe_retry_backoff_base_ms,
            )
            .field("rate_limit_max_requests", &self.rate_limit_max_requests)
            .field("rate_limit_window_secs", &self.rate_limit_window_secs)
            .finish()
    }
}
