//! HTTP client wrapper for the comparison API.

use std::thread;
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::{RefereeError, Result};

/// User agent string identifying this client.
const USER_AGENT: &str = concat!("tech-stack-referee/", env!("CARGO_PKG_VERSION"));

/// Base delay for exponential backoff (milliseconds).
const RETRY_BASE_DELAY_MS: u64 = 500;

/// Create a configured HTTP client.
pub fn create_client(config: &ClientConfig) -> Result<Client> {
    let client = Client::builder()
        .timeout(config.timeout())
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// GET a JSON document with retry logic.
///
/// Uses exponential backoff for transient failures (connection errors,
/// timeouts, 5xx responses). Client errors are returned immediately.
pub fn get_json<T: DeserializeOwned>(client: &Client, url: &str, max_retries: u32) -> Result<T> {
    let mut last_error: Option<String> = None;

    for attempt in 0..max_retries {
        if attempt > 0 {
            // Exponential backoff: 500ms, 1000ms, 2000ms
            let delay = RETRY_BASE_DELAY_MS * (1 << (attempt - 1));
            tracing::debug!(attempt, delay_ms = delay, "Retrying after delay");
            thread::sleep(Duration::from_millis(delay));
        }

        match client.get(url).send() {
            Ok(response) => {
                let status = response.status();

                if status.is_server_error() {
                    tracing::warn!(
                        status = %status,
                        attempt = attempt + 1,
                        max_retries,
                        "Server error, will retry"
                    );
                    last_error = Some(error_from_response(response).to_string());
                    continue;
                }

                return read_json(response);
            }
            Err(e) => {
                if e.is_connect() || e.is_timeout() {
                    tracing::warn!(
                        error = %e,
                        attempt = attempt + 1,
                        max_retries,
                        "Connection error, will retry"
                    );
                    last_error = Some(e.to_string());
                    continue;
                }
                return Err(RefereeError::Http(e));
            }
        }
    }

    Err(RefereeError::RetriesExhausted {
        attempts: max_retries,
        message: last_error.unwrap_or_else(|| "Unknown error".to_string()),
    })
}

/// POST a JSON body and decode the JSON answer. Single attempt.
pub fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
    client: &Client,
    url: &str,
    body: &B,
) -> Result<T> {
    let response = client.post(url).json(body).send()?;
    read_json(response)
}

/// Decode a successful response, or turn a failed one into an API error.
fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    if !response.status().is_success() {
        return Err(error_from_response(response));
    }
    let text = response.text()?;
    Ok(serde_json::from_str(&text)?)
}

/// Build an API error from a non-success response.
fn error_from_response(response: Response) -> RefereeError {
    let status = response.status().as_u16();
    let body = response.text().unwrap_or_default();
    RefereeError::Api {
        status,
        message: error_message(status, &body),
    }
}

/// Extract a human-readable message from an error body.
///
/// A JSON `detail` field wins (its JSON text when not a string); JSON
/// without `detail` falls back to the status code; a body that is not JSON
/// at all reads as "Unknown error".
///
/// # Examples
/// ```
/// use tech_stack_referee::http::error_message;
///
/// assert_eq!(error_message(500, r#"{"detail": "Agent error"}"#), "Agent error");
/// assert_eq!(error_message(404, r#"{"other": 1}"#), "HTTP 404");
/// assert_eq!(error_message(502, "<html>Bad gateway</html>"), "Unknown error");
/// ```
#[must_use]
pub fn error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => match value.get("detail") {
            Some(serde_json::Value::String(detail)) if !detail.is_empty() => detail.clone(),
            // Falsy details: missing, null, false or ""
            Some(
                serde_json::Value::Null
                | serde_json::Value::Bool(false)
                | serde_json::Value::String(_),
            )
            | None => format!("HTTP {status}"),
            Some(other) => other.to_string(),
        },
        Err(_) => "Unknown error".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client() {
        let client = create_client(&ClientConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_error_message_string_detail() {
        assert_eq!(
            error_message(500, r#"{"detail": "Agent error: timed out"}"#),
            "Agent error: timed out"
        );
    }

    #[test]
    fn test_error_message_structured_detail() {
        let body = r#"{"detail": [{"loc": ["body", "query"], "msg": "field required"}]}"#;
        let message = error_message(422, body);
        assert!(message.contains("field required"));
        assert!(message.starts_with('['));
    }

    #[test]
    fn test_error_message_empty_or_null_detail() {
        assert_eq!(error_message(500, r#"{"detail": ""}"#), "HTTP 500");
        assert_eq!(error_message(500, r#"{"detail": null}"#), "HTTP 500");
    }

    #[test]
    fn test_error_message_without_detail() {
        assert_eq!(error_message(404, r#"{"error": "nope"}"#), "HTTP 404");
    }

    #[test]
    fn test_error_message_non_json() {
        assert_eq!(error_message(502, "Bad Gateway"), "Unknown error");
        assert_eq!(error_message(500, ""), "Unknown error");
    }
}
