use crate::core::{Device, HttpMethod, Transport};
use crate::utils::error::Result;
use serde_json::Value;
use std::sync::Arc;

/// Devices registered directly on the registry (`GET /devices`), no discovery.
pub struct DeviceInventory<T: Transport> {
    transport: Arc<T>,
    registry_url: String,
}

impl<T: Transport> DeviceInventory<T> {
    pub fn new(transport: Arc<T>, registry_url: &str) -> Self {
        Self {
            transport,
            registry_url: registry_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn list_devices(&self) -> Result<Vec<Device>> {
        let url = format!("{}/devices", self.registry_url);
        let response = self.transport.request(HttpMethod::Get, &url, None).await?;
        Ok(parse_devices(&response.body))
    }
}

/// Entries without a usable `device_id` are skipped; a missing label is `""`.
pub(crate) fn parse_devices(body: &Value) -> Vec<Device> {
    let Some(entries) = body.get("devices").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut devices = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let Some(device_id) = entry.get("device_id").and_then(scalar_to_string) else {
            tracing::warn!("Skipping device entry {} without device_id", index);
            continue;
        };
        let device_label = entry
            .get("device_label")
            .and_then(scalar_to_string)
            .unwrap_or_default();
        devices.push(Device {
            device_id,
            device_label,
        });
    }
    devices
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
