use crate::core::{ApiResponse, HttpMethod, Resolution, ServiceResolver, Transport, UserId};
use crate::utils::error::{ConsoleError, Result};
use serde_json::json;
use std::sync::Arc;

pub const USER_CATALOGUE_SERVICE: &str = "user_catalogue";

/// Client for the user catalogue, located through the registry.
///
/// The service is resolved once when the client is built and the result is
/// kept for the client's lifetime. Build a new client per request cycle to
/// pick up registry changes.
pub struct UserCatalogueClient<T: Transport> {
    transport: Arc<T>,
    resolution: Resolution,
}

impl<T: Transport> UserCatalogueClient<T> {
    /// Resolves the user catalogue through `resolver`. Registry failures are
    /// returned; an unknown service is not an error until an operation runs.
    pub async fn connect<R: ServiceResolver + ?Sized>(
        transport: Arc<T>,
        resolver: &R,
    ) -> Result<Self> {
        let resolution = resolver.resolve(USER_CATALOGUE_SERVICE).await?;
        Ok(Self::with_resolution(transport, resolution))
    }

    pub fn with_resolution(transport: Arc<T>, resolution: Resolution) -> Self {
        Self {
            transport,
            resolution,
        }
    }

    pub fn base(&self) -> &Resolution {
        &self.resolution
    }

    fn url(&self, path: &str) -> Result<String> {
        match &self.resolution {
            Resolution::Found(endpoint) => Ok(endpoint.join(path)),
            Resolution::NotFound => Err(ConsoleError::ServiceNotFound {
                service: USER_CATALOGUE_SERVICE.to_string(),
            }),
        }
    }

    async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<ApiResponse> {
        let url = self.url(path)?;
        self.transport.request(method, &url, body.as_ref()).await
    }

    /// `GET /users`, returns `{users: [...]}` as sent by the catalogue.
    pub async fn list_users(&self) -> Result<ApiResponse> {
        self.send(HttpMethod::Get, "/users", None).await
    }

    pub async fn create_user(
        &self,
        username: impl ToString,
        password: impl ToString,
    ) -> Result<ApiResponse> {
        let body = json!({
            "username": username.to_string(),
            "password": password.to_string(),
        });
        self.send(HttpMethod::Post, "/users", Some(body)).await
    }

    pub async fn list_user_devices(&self, user_id: impl Into<UserId>) -> Result<ApiResponse> {
        let user_id: UserId = user_id.into();
        let path = format!("/user_devices?user_id={}", user_id);
        self.send(HttpMethod::Get, &path, None).await
    }

    pub async fn assign_device(
        &self,
        user_id: impl Into<UserId>,
        device_id: impl ToString,
        device_label: impl ToString,
    ) -> Result<ApiResponse> {
        let user_id: UserId = user_id.into();
        let body = json!({
            "user_id": user_id,
            "device_id": device_id.to_string(),
            "device_label": device_label.to_string(),
        });
        self.send(HttpMethod::Post, "/assign", Some(body)).await
    }

    pub async fn unassign_device(
        &self,
        user_id: impl Into<UserId>,
        device_id: impl ToString,
    ) -> Result<ApiResponse> {
        let user_id: UserId = user_id.into();
        let body = json!({
            "user_id": user_id,
            "device_id": device_id.to_string(),
        });
        self.send(HttpMethod::Post, "/unassign", Some(body)).await
    }
}
