use crate::core::{HttpMethod, Resolution, ResolvedEndpoint, ServiceRecord, ServiceResolver, Transport};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Resolves logical service names against the registry's `/services` list.
///
/// Every call queries the registry again; nothing is cached.
pub struct ServiceDiscovery<T: Transport> {
    transport: Arc<T>,
    registry_url: String,
}

impl<T: Transport> ServiceDiscovery<T> {
    pub fn new(transport: Arc<T>, registry_url: &str) -> Self {
        Self {
            transport,
            registry_url: registry_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn registry_url(&self) -> &str {
        &self.registry_url
    }

    /// Fetches the registry's service list. A missing `services` field is
    /// an empty list; entries that are not objects are ignored.
    pub async fn list_services(&self) -> Result<Vec<ServiceRecord>> {
        let url = format!("{}/services", self.registry_url);
        let response = self.transport.request(HttpMethod::Get, &url, None).await?;
        Ok(response.list_field::<ServiceRecord>("services"))
    }

    /// Base URL of `service_name`, or an empty string when it is unknown or
    /// the registry cannot be queried.
    pub async fn url_of(&self, service_name: &str) -> String {
        match self.resolve(service_name).await {
            Ok(resolution) => resolution.into_url(),
            Err(e) => {
                tracing::warn!("Registry lookup for '{}' failed: {}", service_name, e);
                String::new()
            }
        }
    }
}

pub(crate) fn find_service(records: &[ServiceRecord], service_name: &str) -> Resolution {
    records
        .iter()
        .find(|record| record.name == service_name && !record.url.is_empty())
        .map(|record| Resolution::Found(ResolvedEndpoint::new(&record.url)))
        .unwrap_or(Resolution::NotFound)
}

#[async_trait]
impl<T: Transport> ServiceResolver for ServiceDiscovery<T> {
    async fn resolve(&self, service_name: &str) -> Result<Resolution> {
        let records = self.list_services().await?;
        let resolution = find_service(&records, service_name);

        match &resolution {
            Resolution::Found(endpoint) => {
                tracing::debug!("Resolved '{}' to {}", service_name, endpoint.base_url())
            }
            Resolution::NotFound => tracing::warn!(
                "Service '{}' not found among {} registered services",
                service_name,
                records.len()
            ),
        }

        Ok(resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, url: &str) -> ServiceRecord {
        ServiceRecord {
            name: name.to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_first_match_with_url_wins() {
        let records = vec![
            record("storage", "http://s:1"),
            record("user_catalogue", ""),
            record("user_catalogue", "http://u:9090/api/"),
            record("user_catalogue", "http://other:1"),
        ];
        let resolution = find_service(&records, "user_catalogue");
        assert_eq!(
            resolution,
            Resolution::Found(ResolvedEndpoint::new("http://u:9090/api"))
        );
    }

    #[test]
    fn test_name_match_is_exact() {
        let records = vec![record("User_Catalogue", "http://u:1"), record("user_catalogue ", "http://u:2")];
        assert_eq!(find_service(&records, "user_catalogue"), Resolution::NotFound);
    }

    #[test]
    fn test_empty_list_is_not_found() {
        assert_eq!(find_service(&[], "anything"), Resolution::NotFound);
    }
}
