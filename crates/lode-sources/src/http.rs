//! Shared HTTP plumbing for the provider adapters.
//!
//! Centralizes status-code checks (429 with `Retry-After` parsing,
//! non-success → [`SourceError::Api`]) so adapter modules stay focused on
//! request construction and response mapping.

use std::time::Duration;

use crate::error::SourceError;

/// HTTP session shared by every adapter.
///
/// Cloning is cheap; all clones share one connection pool, which is closed
/// when the last clone is dropped.
#[derive(Debug, Clone)]
pub struct SourceClient {
    pub(crate) http: reqwest::Client,
}

impl SourceClient {
    /// Build a client with the given User-Agent and per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the TLS backend cannot be initialized.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { http })
    }

    /// GET `url` and return the checked response.
    pub(crate) async fn get(&self, url: &str) -> Result<reqwest::Response, SourceError> {
        let resp = self.http.get(url).send().await?;
        check_response(resp).await
    }
}

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **429 Too Many Requests** → [`SourceError::RateLimited`] with
///   `Retry-After` header parsing (falls back to 60 s if absent or
///   unparseable).
/// - **Non-success status** → [`SourceError::Api`] with status code and
///   response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, SourceError> {
    if resp.status() == 429 {
        let retry_after = parse_retry_after(&resp);
        return Err(SourceError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if !resp.status().is_success() {
        return Err(SourceError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    fn mock_response_with_retry_after(status: u16, value: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .header("Retry-After", value)
                .body("")
                .unwrap(),
        )
    }

    #[test]
    fn parse_retry_after_variants() {
        assert_eq!(parse_retry_after(&mock_response_with_retry_after(429, "120")), 120);
        assert_eq!(parse_retry_after(&mock_response(429, "")), 60);
        assert_eq!(
            parse_retry_after(&mock_response_with_retry_after(429, "soon")),
            60
        );
    }

    #[tokio::test]
    async fn rate_limited_with_header() {
        let err = check_response(mock_response_with_retry_after(429, "30"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SourceError::RateLimited {
                retry_after_secs: 30
            }
        ));
    }

    #[tokio::test]
    async fn api_error_keeps_body() {
        let err = check_response(mock_response(503, "upstream down"))
            .await
            .unwrap_err();
        match err {
            SourceError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "upstream down");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn success_passes_through() {
        assert!(check_response(mock_response(200, "{}")).await.is_ok());
    }

    #[test]
    fn client_builds() {
        assert!(SourceClient::new("lodestar-test", Duration::from_secs(1)).is_ok());
    }
}
