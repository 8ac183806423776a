use crate::domain::model::{ApiResponse, HttpMethod, Resolution};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Sends one JSON request and returns the decoded reply.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<ApiResponse>;
}

/// Maps a logical service name to its current base URL.
#[async_trait]
pub trait ServiceResolver: Send + Sync {
    async fn resolve(&self, service_name: &str) -> Result<Resolution>;
}

pub trait ConfigProvider: Send + Sync {
    fn registry_url(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
}
