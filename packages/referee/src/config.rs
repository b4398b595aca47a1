//! Configuration constants and validation functions for the referee client.

use std::time::Duration;

use url::Url;

use crate::error::{RefereeError, Result};

/// Base URL of a locally running comparison API.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Environment variable that overrides the API base URL.
pub const API_URL_ENV: &str = "REFEREE_API_URL";

/// Environment variable that overrides the request timeout.
pub const TIMEOUT_ENV: &str = "REFEREE_TIMEOUT_SECS";

/// HTTP timeout in seconds.
///
/// The API gives its agent 45 seconds per comparison; the extra margin covers
/// transport and response serialization.
pub const HTTP_TIMEOUT_SECS: u64 = 60;

/// Maximum number of attempts for idempotent (GET) requests.
pub const MAX_RETRIES: u32 = 3;

/// Default wrap width for rendered cards.
pub const DEFAULT_WRAP_WIDTH: usize = 100;

/// Narrowest width cards are rendered at.
pub const MIN_WRAP_WIDTH: usize = 40;

/// Category preselected in the guided form.
pub const DEFAULT_CATEGORY: &str = "Frontend Frameworks";

/// Team size preselected in the guided form.
pub const DEFAULT_TEAM_SIZE: u32 = 3;

/// Allowed team size range for the guided form.
pub const TEAM_SIZE_RANGE: std::ops::RangeInclusive<u32> = 1..=100;

/// Timeline choices offered by the guided form.
pub const TIMELINE_CHOICES: &[&str] = &["1 month", "3 months", "6 months", "1 year", "Long-term"];

/// Expertise choices offered by the guided form.
pub const EXPERTISE_CHOICES: &[&str] = &["Beginner", "Intermediate", "Advanced", "Expert"];

/// Number of suggestion chips shown in an empty chat.
pub const CHAT_SUGGESTION_LIMIT: usize = 4;

/// Validate an API base URL.
///
/// # Examples
/// ```
/// use tech_stack_referee::config::validate_api_url;
///
/// assert!(validate_api_url("http://localhost:8000").is_ok());
/// assert!(validate_api_url("localhost:8000").is_err());
/// ```
pub fn validate_api_url(api_url: &str) -> Result<()> {
    let parsed = Url::parse(api_url).map_err(|_| RefereeError::InvalidApiUrl(api_url.to_string()))?;
    match parsed.scheme() {
        "http" | "https" if parsed.host().is_some() => Ok(()),
        _ => Err(RefereeError::InvalidApiUrl(api_url.to_string())),
    }
}

/// Validate a team size against [`TEAM_SIZE_RANGE`].
pub fn validate_team_size(team_size: u32) -> Result<()> {
    if TEAM_SIZE_RANGE.contains(&team_size) {
        Ok(())
    } else {
        Err(RefereeError::InvalidForm(format!(
            "Team size must be between {} and {}, got {team_size}",
            TEAM_SIZE_RANGE.start(),
            TEAM_SIZE_RANGE.end()
        )))
    }
}

/// Validate a free-text query: it must contain something besides whitespace.
///
/// # Examples
/// ```
/// use tech_stack_referee::config::validate_query;
///
/// assert!(validate_query("Compare React vs Vue").is_ok());
/// assert!(validate_query("   ").is_err());
/// ```
pub fn validate_query(query: &str) -> Result<()> {
    if query.trim().is_empty() {
        Err(RefereeError::InvalidForm("Please enter a query".to_string()))
    } else {
        Ok(())
    }
}

/// Validate a value against a fixed choice list (case-sensitive, as offered).
pub fn validate_choice(field: &str, value: &str, choices: &[&str]) -> Result<()> {
    if choices.contains(&value) {
        Ok(())
    } else {
        Err(RefereeError::InvalidForm(format!(
            "Invalid {field}: '{value}'. Choose one of: {}",
            choices.join(", ")
        )))
    }
}

/// Client configuration for talking to the comparison API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

impl ClientConfig {
    /// Create a config builder with defaults.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            api_base_url: DEFAULT_API_URL.into(),
            timeout_secs: HTTP_TIMEOUT_SECS,
            max_retries: MAX_RETRIES,
        }
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Join an endpoint path onto the base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.api_base_url)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.into(),
            timeout_secs: HTTP_TIMEOUT_SECS,
            max_retries: MAX_RETRIES,
        }
    }
}

/// Builder for constructing a validated [`ClientConfig`].
pub struct ClientConfigBuilder {
    api_base_url: String,
    timeout_secs: u64,
    max_retries: u32,
}

impl ClientConfigBuilder {
    pub fn api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }

    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Validate and build. A trailing slash on the base URL is dropped so
    /// endpoint paths can be appended verbatim.
    pub fn build(self) -> Result<ClientConfig> {
        let api_base_url = self.api_base_url.trim().trim_end_matches('/').to_string();
        validate_api_url(&api_base_url)?;
        Ok(ClientConfig {
            api_base_url,
            timeout_secs: self.timeout_secs,
            max_retries: self.max_retries.max(1),
        })
    }
}
