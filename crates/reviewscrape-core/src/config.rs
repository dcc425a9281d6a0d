use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Tests pass a `HashMap` lookup instead of the process environment.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_number = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let browserless_url = optional("REVIEWSCRAPE_BROWSERLESS_URL");
    let browserless_token = optional("REVIEWSCRAPE_BROWSERLESS_TOKEN");

    let log_level = or_default("REVIEWSCRAPE_LOG_LEVEL", "info");
    let data_dir = PathBuf::from(or_default("REVIEWSCRAPE_DATA_DIR", "./data"));
    let output_path = PathBuf::from(or_default("REVIEWSCRAPE_OUTPUT_PATH", "./reviews.csv"));
    let entities_path = PathBuf::from(or_default(
        "REVIEWSCRAPE_ENTITIES_PATH",
        "./config/entities.yaml",
    ));

    let concurrency = match parse_number("REVIEWSCRAPE_CONCURRENCY", "2")? {
        0 => {
            return Err(ConfigError::InvalidEnvVar {
                var: "REVIEWSCRAPE_CONCURRENCY".to_string(),
                reason: "must be at least 1".to_string(),
            })
        }
        n => usize::try_from(n).map_err(|e| ConfigError::InvalidEnvVar {
            var: "REVIEWSCRAPE_CONCURRENCY".to_string(),
            reason: e.to_string(),
        })?,
    };

    let request_timeout_secs = parse_number("REVIEWSCRAPE_REQUEST_TIMEOUT_SECS", "90")?;
    let wait_timeout_ms = parse_number("REVIEWSCRAPE_WAIT_TIMEOUT_MS", "30000")?;
    let user_agent = or_default("REVIEWSCRAPE_USER_AGENT", "reviewscrape/0.1");

    Ok(AppConfig {
        browserless_url,
        browserless_token,
        log_level,
        data_dir,
        output_path,
        entities_path,
        concurrency,
        request_timeout_secs,
        wait_timeout_ms,
        user_agent,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
