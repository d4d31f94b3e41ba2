//! HTTP plumbing shared by the REST agents.

use parliament_core::agent::AgentError;
use reqwest::{StatusCode, header::HeaderValue};
use serde::Deserialize;
use std::time::Duration;

/// Per-request timeout for LLM calls.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the shared client with the request timeout applied.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Transport failures (no response at all).
pub fn map_send_error(provider: &str, err: reqwest::Error) -> AgentError {
    AgentError::ProcessError {
        status_code: None,
        message: format!("{provider} API request failed: {err}"),
        is_retryable: err.is_connect() || err.is_timeout(),
        retry_after: None,
    }
}

/// Maps a non-success response to a `ProcessError`, extracting the
/// provider's `{"error": {"message", "status"}}` body when present.
pub fn map_http_error(status: StatusCode, body: String, retry_after: Option<Duration>) -> AgentError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    let is_retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    AgentError::ProcessError {
        status_code: Some(status.as_u16()),
        message,
        is_retryable,
        retry_after,
    }
}

/// Only the delay-seconds form of `Retry-After` is understood.
pub fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    let value = header?.to_str().ok()?;
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

/// Reads a failed response into an `AgentError`.
pub async fn error_from_response(provider: &str, response: reqwest::Response) -> AgentError {
    let status = response.status();
    let retry_after = parse_retry_after(response.headers().get("retry-after"));
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| format!("Failed to read {provider} error body"));
    map_http_error(status, body, retry_after)
}
