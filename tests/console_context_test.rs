use catalogue_admin::core::ServiceResolver;
use catalogue_admin::utils::validation::Validate;
use catalogue_admin::{ConsoleConfig, ConsoleContext, Device, ErrorKind};
use httpmock::prelude::*;
use serde_json::json;
use tempfile::TempDir;

#[tokio::test]
async fn test_device_listing_skips_entries_without_id() {
    let registry = MockServer::start();
    let devices_mock = registry.mock(|when, then| {
        when.method(GET).path("/devices");
        then.status(200).json_body(json!({
            "devices": [{"device_id": "d1"}, {"device_label": "no-id-case"}]
        }));
    });

    let context = ConsoleContext::new(&ConsoleConfig::new(format!("{}/", registry.base_url()), 2));
    let devices = context.device_inventory().list_devices().await.unwrap();

    devices_mock.assert();
    assert_eq!(
        devices,
        vec![Device {
            device_id: "d1".to_string(),
            device_label: String::new(),
        }]
    );
}

#[tokio::test]
async fn test_device_listing_keeps_labels() {
    let registry = MockServer::start();
    registry.mock(|when, then| {
        when.method(GET).path("/devices");
        then.status(200).json_body(json!({
            "devices": [
                {"device_id": "tank-1", "device_label": "Tank A", "resources": []},
                {"device_id": "tank-2", "device_label": "Tank B"}
            ]
        }));
    });

    let context = ConsoleContext::new(&ConsoleConfig::new(registry.base_url(), 2));
    let devices = context.device_inventory().list_devices().await.unwrap();
    let labels: Vec<&str> = devices.iter().map(|d| d.device_label.as_str()).collect();
    assert_eq!(labels, vec!["Tank A", "Tank B"]);
}

#[tokio::test]
async fn test_device_listing_propagates_unreachable_registry() {
    let context = ConsoleContext::new(&ConsoleConfig::new("http://127.0.0.1:1", 1));
    let err = context.device_inventory().list_devices().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unreachable);
}

#[tokio::test]
async fn test_context_from_config_file_drives_full_cycle() {
    let registry = MockServer::start();
    let catalogue = MockServer::start();
    let catalogue_url = catalogue.base_url();
    registry.mock(move |when, then| {
        when.method(GET).path("/services");
        then.status(200).json_body(json!({
            "services": [{"name": "user_catalogue", "url": catalogue_url}]
        }));
    });
    let users_mock = catalogue.mock(|when, then| {
        when.method(GET).path("/users");
        then.status(200).json_body(json!({"status": "ok", "users": []}));
    });

    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("console.toml");
    std::fs::write(
        &config_path,
        format!(
            "[registry]\nbase_url = \"{}\"\n\n[http]\ntimeout_seconds = 2\n",
            registry.base_url()
        ),
    )
    .unwrap();

    let config = ConsoleConfig::from_file(&config_path).unwrap();
    config.validate().unwrap();

    let context = ConsoleContext::new(&config);
    assert_eq!(context.transport().timeout().as_secs(), 2);

    let resolution = context.discovery().resolve("user_catalogue").await.unwrap();
    assert!(resolution.is_found());

    let catalogue_client = context.user_catalogue().await.unwrap();
    let response = catalogue_client.list_users().await.unwrap();
    users_mock.assert();
    assert_eq!(response.into_success().unwrap()["users"], json!([]));
}

#[test]
fn test_missing_config_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = ConsoleConfig::from_file(temp_dir.path().join("absent.toml")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}
