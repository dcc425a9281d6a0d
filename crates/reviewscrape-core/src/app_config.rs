use std::path::PathBuf;

use crate::ConfigError;

#[derive(Clone)]
pub struct AppConfig {
    /// Only scraping commands need a browser; see [`AppConfig::require_browserless_url`].
    pub browserless_url: Option<String>,
    pub browserless_token: Option<String>,
    pub log_level: String,
    pub data_dir: PathBuf,
    pub output_path: PathBuf,
    pub entities_path: PathBuf,
    pub concurrency: usize,
    pub request_timeout_secs: u64,
    pub wait_timeout_ms: u64,
    pub user_agent: String,
}

impl AppConfig {
    /// Returns the Browserless base URL, or an error naming the variable to set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when no URL was configured.
    pub fn require_browserless_url(&self) -> Result<&str, ConfigError> {
        self.browserless_url
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("REVIEWSCRAPE_BROWSERLESS_URL".to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("browserless_url", &self.browserless_url)
            .field(
                "browserless_token",
                &self.browserless_token.as_ref().map(|_| "[redacted]"),
            )
            .field("log_level", &self.log_level)
            .field("data_dir", &self.data_dir)
            .field("output_path", &self.output_path)
            .field("entities_path", &self.entities_path)
            .field("concurrency", &self.concurrency)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("wait_timeout_ms", &self.wait_timeout_ms)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
