mod common;

use common::*;
use powerflex_client::{utils::params, ApiVersion, PowerFlexError, ResourceSet};
use serde_json::json;
use wiremock::{
    matchers::{bearer_token, body_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

#[tokio::test]
async fn test_login_posts_credentials_as_json() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;
    mount_version(&server, "4.5").await;
    Mock::given(method("POST"))
        .and(path("/rest/auth/login"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"username": USERNAME, "password": PASSWORD})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": ACCESS_TOKEN,
            "refresh_token": "refresh-token",
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/auth/logout"))
        .and(body_json(json!({"refresh_token": "refresh-token"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    client.initialize().await.expect("Failed to initialize client");

    assert_eq!(client.resource_set().expect("resource set"), ResourceSet::Gen1);
    assert!(!client.token().is_set());
}

#[tokio::test]
async fn test_delete_device_with_bearer_token() {
    let server = MockServer::start().await;
    let client = initialized_client(&server, "4.5").await;

    Mock::given(method("POST"))
        .and(path("/api/instances/Device::d1/action/removeDevice"))
        .and(bearer_token(ACCESS_TOKEN))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client
        .gen1()
        .expect("gen1 resources")
        .device()
        .delete("d1", None)
        .await
        .expect("Failed to delete device");
}

#[tokio::test]
async fn test_delete_device_failure() {
    let server = MockServer::start().await;
    let client = initialized_client(&server, "4.5").await;

    Mock::given(method("POST"))
        .and(path("/api/instances/Device::d1/action/removeDevice"))
        .and(body_json(json!({"forceRemove": "True"})))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "Device is in use",
        })))
        .mount(&server)
        .await;

    let result = client
        .gen1()
        .expect("gen1 resources")
        .device()
        .delete("d1", Some(true))
        .await;

    match result {
        Err(err @ PowerFlexError::FailDeleting { .. }) => {
            assert_eq!(
                err.response().expect("error body")["message"],
                "Device is in use"
            );
        }
        other => panic!("expected FailDeleting, got {:?}", other),
    }
}

#[tokio::test]
async fn test_appliance_login_failure_is_reported() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;
    mount_version(&server, "4.5").await;
    Mock::given(method("POST"))
        .and(path("/rest/auth/login"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Bad credentials"))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let result = client.initialize().await;

    match result {
        Err(err @ PowerFlexError::FailQuerying { .. }) => {
            assert_eq!(
                err.response(),
                Some(&json!("Bad credentials"))
            );
        }
        other => panic!("expected FailQuerying, got {:?}", other),
    }
    assert!(!client.token().is_set());
}

#[tokio::test]
async fn test_version_query_failure() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/version"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let result = client.initialize().await;

    assert!(matches!(result, Err(PowerFlexError::FailQuerying { .. })));
}

#[tokio::test]
async fn test_mdm_cluster_calls_use_basic_token_auth() {
    let server = MockServer::start().await;
    let client = initialized_client(&server, "4.5").await;

    Mock::given(method("POST"))
        .and(path("/api/instances/System/action/removeStandbyMdm"))
        .and(header("authorization", format!("Basic {}", basic_credentials()).as_str()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let removed = client
        .system()
        .expect("system api")
        .remove_standby_mdm("mdm2")
        .await
        .expect("Failed to remove standby MDM");
    assert!(removed);
}

fn basic_credentials() -> String {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD.encode(format!("{}:{}", USERNAME, ACCESS_TOKEN))
}

#[tokio::test]
async fn test_get_sends_bearer_without_content_type() {
    let server = MockServer::start().await;
    let client = initialized_client(&server, "4.5").await;

    Mock::given(method("GET"))
        .and(path("/api/types/Sdc/instances"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    client
        .gen1()
        .expect("gen1 resources")
        .sdc()
        .get(None, None, None)
        .await
        .expect("Failed to list SDCs");

    let requests = server.received_requests().await.expect("recorded requests");
    let listing = requests
        .iter()
        .find(|r| r.method.as_str() == "GET" && r.url.path() == "/api/types/Sdc/instances")
        .expect("listing request");
    assert_eq!(
        listing.headers.get("authorization").map(|v| v.as_bytes()),
        Some(format!("Bearer {}", ACCESS_TOKEN).as_bytes())
    );
    assert!(listing.headers.get("content-type").is_none());
}

#[tokio::test]
async fn test_post_and_put_send_json_content_type() {
    let server = MockServer::start().await;
    let client = initialized_client(&server, "4.5").await;

    Mock::given(method("POST"))
        .and(path("/api/instances/Sdc::s1/action/setSdcName"))
        .and(bearer_token(ACCESS_TOKEN))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/instances/Sdc::s1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "s1", "name": "sdc-a"})))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/instances/Sdc::s1"))
        .and(bearer_token(ACCESS_TOKEN))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"name": "sdc-a"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let renamed = client
        .gen1()
        .expect("gen1 resources")
        .sdc()
        .rename("s1", "sdc-a")
        .await
        .expect("Failed to rename SDC");
    assert_eq!(renamed["name"], "sdc-a");

    let body = params(json!({"name": "sdc-a"}));
    let response = client
        .send_put_request("/instances/{entity}::{id}", Some(&body), &[("entity", "Sdc"), ("id", "s1")])
        .await
        .expect("Failed to send PUT");
    assert!(response.is_ok());
}

#[tokio::test]
async fn test_appliance_logout_failure_is_reported() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;
    mount_version(&server, "4.5").await;
    Mock::given(method("POST"))
        .and(path("/rest/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": ACCESS_TOKEN,
            "refresh_token": "refresh-token",
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/auth/logout"))
        .respond_with(ResponseTemplate::new(500).set_body_string("session store down"))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let result = client.initialize().await;

    match result {
        Err(err @ PowerFlexError::Client { .. }) => {
            assert_eq!(err.response(), Some(&json!("session store down")));
        }
        other => panic!("expected Client error, got {:?}", other),
    }
    assert!(!client.is_initialized());
}

#[tokio::test]
async fn test_legacy_logout_failure_is_reported() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;
    mount_version(&server, "3.5").await;
    Mock::given(method("GET"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!("\"{}\"", LEGACY_TOKEN)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/logout"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let result = client.initialize().await;

    assert!(matches!(result, Err(PowerFlexError::Client { .. })));
    // Token stays until a successful logout
    assert!(client.token().is_set());
}

#[tokio::test]
async fn test_legacy_logout_without_token_sends_nothing() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/logout"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    assert!(!client.token().is_set());
    client
        .authenticator()
        .logout(&ApiVersion::new(3, 5))
        .await
        .expect("logout without a token is a no-op");
}
