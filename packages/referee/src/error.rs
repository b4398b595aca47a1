//! Error types for the referee client.
//!
//! The markdown splitter is total and never produces these; they cover the
//! API transport, form validation and the CLI surface.

use thiserror::Error;

/// Main error type for the referee library.
#[derive(Debug, Error)]
pub enum RefereeError {
    /// HTTP request failed before a response was received.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The comparison API answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// All retry attempts for an idempotent request failed.
    #[error("Request failed after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: u32, message: String },

    /// The guided form is incomplete or inconsistent.
    #[error("{0}")]
    InvalidForm(String),

    /// An option does not belong to the selected category.
    #[error(
        "'{option}' is not an option in category '{category}'. Available: {}",
        .available.join(", ")
    )]
    InvalidOption {
        option: String,
        category: String,
        available: Vec<String>,
    },

    /// The category is not in the catalogue served by the API.
    #[error("Unknown category: '{0}'")]
    UnknownCategory(String),

    /// The configured API base URL cannot be used.
    #[error("Invalid API URL: '{0}'. Expected an http(s) URL (e.g., http://localhost:8000)")]
    InvalidApiUrl(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for referee operations.
pub type Result<T> = std::result::Result<T, RefereeError>;
