use crate::core::{ApiResponse, HttpMethod, Transport};
use crate::utils::error::{ConsoleError, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 7;

/// JSON-over-HTTP transport backed by reqwest.
///
/// One timeout covers the whole exchange, connection and body included.
/// Replies are returned with their status; a 2xx reply must carry JSON.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            timeout,
        }
    }

    pub fn from_secs(timeout_seconds: u64) -> Self {
        Self::new(Duration::from_secs(timeout_seconds))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn map_send_error(&self, url: &str, err: reqwest::Error) -> ConsoleError {
        if err.is_timeout() {
            ConsoleError::Timeout {
                url: url.to_string(),
                timeout: self.timeout,
            }
        } else if err.is_builder() {
            ConsoleError::Unreachable {
                url: url.to_string(),
                message: format!("invalid request URL: {}", err),
            }
        } else {
            ConsoleError::Unreachable {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::from_secs(DEFAULT_TIMEOUT_SECONDS)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<ApiResponse> {
        let mut request = match method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
        };

        request = request
            .header(ACCEPT, "application/json")
            .timeout(self.timeout);

        if let Some(payload) = body {
            request = request.header(CONTENT_TYPE, "application/json").json(payload);
        }

        tracing::debug!("{} {}", method, url);

        let response = request
            .send()
            .await
            .map_err(|e| self.map_send_error(url, e))?;
        let status = response.status().as_u16();
        tracing::debug!("{} {} -> {}", method, url, status);

        let raw = response
            .bytes()
            .await
            .map_err(|e| self.map_send_error(url, e))?;

        match serde_json::from_slice::<serde_json::Value>(&raw) {
            Ok(json) => Ok(ApiResponse::new(status, json)),
            Err(_) if !(200..300).contains(&status) => Err(ConsoleError::Status {
                status,
                message: "response body is not JSON".to_string(),
            }),
            Err(e) => Err(ConsoleError::InvalidResponse {
                url: url.to_string(),
                message: format!("body is not valid JSON: {}", e),
            }),
        }
    }
}
