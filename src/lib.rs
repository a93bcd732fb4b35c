//! Reel-Tally: an image-tag census for movies currently in theaters
//!
//! This crate walks a paginated movie catalog API, resolves every entry to an
//! IMDB identifier (directly or via a progressive title search), counts the
//! literal `<img ` tags on each movie's IMDB page, and prints one JSON report.
//! The heavy lifting is a self-feeding command queue drained by a fixed pool
//! of workers, where processing one command may enqueue more.

pub mod config;
pub mod engine;
pub mod net;
pub mod report;
pub mod sources;
pub mod state;

use thiserror::Error;

/// Main error type for Reel-Tally operations
#[derive(Debug, Error)]
pub enum TallyError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Retry budget exhausted for {url} after {attempts} attempts")]
    RetriesExhausted { url: String, attempts: u32 },

    #[error("Unexpected catalog payload: {0}")]
    CatalogShape(String),

    #[error("Could not resolve {title:?} to an IMDB id")]
    ResolutionFailed { title: String },

    #[error("Command queue at capacity ({capacity}); raise the queue floor or lower pacing")]
    QueueFull { capacity: usize },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Reel-Tally operations
pub type Result<T> = std::result::Result<T, TallyError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use engine::{Command, Engine, TaskQueue};
pub use net::RetryPolicy;
pub use report::ResultRecord;
