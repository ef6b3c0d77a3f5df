#![allow(dead_code)]

use powerflex_client::{Configuration, PowerFlexClient};
use serde_json::json;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "Password123";
pub const LEGACY_TOKEN: &str = "legacy-token";
pub const ACCESS_TOKEN: &str = "access-token";

/// Client pointed at the mock gateway
pub fn create_test_client(server: &MockServer) -> PowerFlexClient {
    PowerFlexClient::with_client(
        reqwest::Client::new(),
        Configuration::new("127.0.0.1", USERNAME, PASSWORD),
        server.uri(),
    )
    .expect("Failed to create client")
}

pub async fn mount_version(server: &MockServer, version: &str) {
    Mock::given(method("GET"))
        .and(path("/api/version"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!("\"{}\"", version)))
        .mount(server)
        .await;
}

/// Version query plus the pre-4.0 login and logout
pub async fn mount_legacy_gateway(server: &MockServer, version: &str) {
    mount_version(server, version).await;
    Mock::given(method("GET"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!("\"{}\"", LEGACY_TOKEN)))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/logout"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}

/// Version query plus the 4.0+ appliance login and logout
pub async fn mount_appliance_gateway(server: &MockServer, version: &str) {
    mount_version(server, version).await;
    Mock::given(method("POST"))
        .and(path("/rest/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": ACCESS_TOKEN,
            "refresh_token": "refresh-token",
        })))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/auth/logout"))
        .respond_with(ResponseTemplate::new(204))
        .mount(server)
        .await;
}

/// Initialized client for a gateway of `version`
pub async fn initialized_client(server: &MockServer, version: &str) -> PowerFlexClient {
    let _ = env_logger::try_init();
    if version.starts_with('3') {
        mount_legacy_gateway(server, version).await;
    } else {
        mount_appliance_gateway(server, version).await;
    }
    let client = create_test_client(server);
    client.initialize().await.expect("Failed to initialize client");
    client
}
