use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The page did not render, or a wait condition was never met.
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    /// The review count or the pagination template could not be read.
    #[error("could not read review metadata from {url}: {reason}")]
    MetadataParse { url: String, reason: String },

    /// An expected review element was absent from a rendered page.
    #[error("review extraction failed on {url}: {reason}")]
    Extraction { url: String, reason: String },

    #[error("table serialization failed: {0}")]
    Serialization(String),

    #[error("JSON error for {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Core(#[from] reviewscrape_core::CoreError),

    #[error(transparent)]
    Config(#[from] reviewscrape_core::ConfigError),
}
