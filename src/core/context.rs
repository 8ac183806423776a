use crate::core::discovery::ServiceDiscovery;
use crate::core::devices::DeviceInventory;
use crate::core::transport::HttpTransport;
use crate::core::user_catalogue::UserCatalogueClient;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use std::sync::Arc;

/// Everything one request cycle needs, built from an explicit configuration.
///
/// Nothing here is shared between cycles: each context owns its transport,
/// and each `user_catalogue()` call resolves the service again.
pub struct ConsoleContext {
    transport: Arc<HttpTransport>,
    discovery: ServiceDiscovery<HttpTransport>,
    registry_url: String,
}

impl ConsoleContext {
    pub fn new<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        let transport = Arc::new(HttpTransport::from_secs(config.timeout_seconds()));
        let discovery = ServiceDiscovery::new(Arc::clone(&transport), config.registry_url());
        tracing::debug!(
            "Console context: registry={} timeout={}s",
            discovery.registry_url(),
            config.timeout_seconds()
        );
        Self {
            registry_url: discovery.registry_url().to_string(),
            transport,
            discovery,
        }
    }

    pub fn transport(&self) -> &Arc<HttpTransport> {
        &self.transport
    }

    pub fn discovery(&self) -> &ServiceDiscovery<HttpTransport> {
        &self.discovery
    }

    pub async fn user_catalogue(&self) -> Result<UserCatalogueClient<HttpTransport>> {
        UserCatalogueClient::connect(Arc::clone(&self.transport), &self.discovery).await
    }

    pub fn device_inventory(&self) -> DeviceInventory<HttpTransport> {
        DeviceInventory::new(Arc::clone(&self.transport), &self.registry_url)
    }
}
