//! HTTP client wrapper for talking to the test-management service.

use std::thread;
use std::time::Duration;

use reqwest::blocking::{Client, Response};

use crate::config::HTTP_TIMEOUT_SECS;
use crate::error::{ConverterError, Result};

/// User agent string identifying this converter.
const USER_AGENT: &str = concat!("gherkin-junit/", env!("CARGO_PKG_VERSION"));

/// Maximum number of attempts for transient failures.
pub const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (milliseconds).
const RETRY_BASE_DELAY_MS: u64 = 500;

/// Create a configured HTTP client.
///
/// # Returns
/// A `reqwest::blocking::Client` configured with appropriate timeout and user agent.
pub fn create_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Send a request with retry logic.
///
/// `send` builds and sends a fresh request on every attempt, since request
/// bodies such as multipart forms are consumed when sent. Network errors,
/// timeouts and 5xx responses are retried with exponential backoff. Any
/// other response is returned to the caller unchanged, so 4xx statuses are
/// not retried.
pub fn send_with_retry<F>(mut send: F) -> Result<Response>
where
    F: FnMut() -> reqwest::Result<Response>,
{
    let mut last_error: Option<String> = None;

    for attempt in 0..MAX_RETRIES {
        if attempt > 0 {
            // Exponential backoff: 500ms, 1000ms, 2000ms
            let delay = RETRY_BASE_DELAY_MS * (1 << (attempt - 1));
            tracing::debug!(attempt, delay_ms = delay, "Retrying after delay");
            thread::sleep(Duration::from_millis(delay));
        }

        match send() {
            Ok(response) => {
                let status = response.status();
                if status.is_server_error() {
                    tracing::warn!(
                        status = %status,
                        attempt = attempt + 1,
                        max_retries = MAX_RETRIES,
                        "Server error, will retry"
                    );
                    last_error = Some(format!("Server error: {status}"));
                    continue;
                }
                return Ok(response);
            }
            Err(e) => {
                if e.is_connect() || e.is_timeout() {
                    tracing::warn!(
                        error = %e,
                        attempt = attempt + 1,
                        max_retries = MAX_RETRIES,
                        "Connection error, will retry"
                    );
                    last_error = Some(e.to_string());
                    continue;
                }
                // Other errors (like invalid URL) - don't retry
                return Err(ConverterError::Http(e));
            }
        }
    }

    Err(ConverterError::RetriesExhausted {
        attempts: MAX_RETRIES,
        message: last_error.unwrap_or_else(|| "Unknown error".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client() {
        let client = create_client();
        assert!(client.is_ok());
    }

    #[test]
    fn test_user_agent() {
        assert!(USER_AGENT.starts_with("gherkin-junit/"));
    }
}
