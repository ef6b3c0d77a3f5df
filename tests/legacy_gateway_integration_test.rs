mod common;

use common::*;
use powerflex_client::{
    models::{VolumeClass, VolumeCreateRequest}, utils::params, ApiVersion, PowerFlexError, ResourceSet,
};
use serde_json::json;
use wiremock::{
    matchers::{basic_auth, body_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

#[tokio::test]
async fn test_initialize_selects_gen1_for_legacy_gateway() {
    let server = MockServer::start().await;
    let client = initialized_client(&server, "3.5").await;

    assert!(client.is_initialized());
    assert_eq!(client.resource_set().expect("resource set"), ResourceSet::Gen1);
    let version = client
        .system()
        .expect("system api")
        .api_version(true)
        .await
        .expect("cached version");
    assert_eq!(version, ApiVersion::new(3, 5));
    // Every call logs out again
    assert!(!client.token().is_set());
}

#[tokio::test]
async fn test_create_volume_end_to_end() {
    let server = MockServer::start().await;
    let client = initialized_client(&server, "3.5").await;

    Mock::given(method("POST"))
        .and(path("/api/types/Volume/instances"))
        .and(basic_auth(USERNAME, LEGACY_TOKEN))
        .and(body_json(json!({"storagePoolId": "1", "volumeSizeInGb": "8"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "v1"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/instances/Volume::v1"))
        .and(basic_auth(USERNAME, LEGACY_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "v1",
            "sizeInKb": 8388608,
            "storagePoolId": "1",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let volume = client
        .gen1()
        .expect("gen1 resources")
        .volume()
        .create(&VolumeCreateRequest::new("1", 8))
        .await
        .expect("Failed to create volume");

    assert_eq!(volume["id"], "v1");
    assert_eq!(volume["sizeInKb"], 8388608);
}

#[tokio::test]
async fn test_create_volume_failure_reports_gateway_body() {
    let server = MockServer::start().await;
    let client = initialized_client(&server, "3.5").await;

    Mock::given(method("POST"))
        .and(path("/api/types/Volume/instances"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "Storage pool not found",
            "errorCode": 6,
        })))
        .mount(&server)
        .await;

    let result = client
        .gen1()
        .expect("gen1 resources")
        .volume()
        .create(&VolumeCreateRequest::new("missing", 8))
        .await;

    match result {
        Err(PowerFlexError::FailCreating { response, .. }) => {
            let response = response.expect("error body");
            assert_eq!(response["message"], "Storage pool not found");
        }
        other => panic!("expected FailCreating, got {:?}", other),
    }
}

#[tokio::test]
async fn test_get_with_filter_and_fields() {
    let server = MockServer::start().await;
    let client = initialized_client(&server, "3.5").await;

    Mock::given(method("GET"))
        .and(path("/api/types/Volume/instances"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "1", "name": "a", "sizeInKb": 1024},
            {"id": "2", "name": "b", "sizeInKb": 2048},
            {"id": "3", "name": "a", "sizeInKb": 4096},
        ])))
        .mount(&server)
        .await;

    let filter = params(json!({"name": "a"}));
    let volumes = client
        .gen1()
        .expect("gen1 resources")
        .volume()
        .get(None, Some(&filter), Some(&["id"]))
        .await
        .expect("Failed to list volumes");

    assert_eq!(volumes, json!([{"id": "1"}, {"id": "3"}]));
}

#[tokio::test]
async fn test_get_by_id_rejects_filter() {
    let server = MockServer::start().await;
    let client = initialized_client(&server, "3.5").await;

    let filter = params(json!({"name": "a"}));
    let result = client
        .gen1()
        .expect("gen1 resources")
        .volume()
        .get(Some("v1"), Some(&filter), None)
        .await;

    assert!(matches!(result, Err(PowerFlexError::InvalidInput(_))));
}

#[tokio::test]
async fn test_each_call_logs_in_and_out() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;
    mount_version(&server, "3.5").await;
    // One session for initialize() plus one per call
    Mock::given(method("GET"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!("\"{}\"", LEGACY_TOKEN)))
        .expect(3)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/logout"))
        .respond_with(ResponseTemplate::new(200))
        .expect(3)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/types/Sds/instances"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    client.initialize().await.expect("Failed to initialize client");

    let resources = client.gen1().expect("gen1 resources");
    let first = resources.sds();
    let second = resources.sds();
    let (a, b) = tokio::join!(first.get(None, None, None), second.get(None, None, None));
    assert_eq!(a.expect("first list"), json!([]));
    assert_eq!(b.expect("second list"), json!([]));
    assert!(!client.token().is_set());
}

#[tokio::test]
async fn test_login_failure_is_reported() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;
    mount_version(&server, "3.5").await;
    Mock::given(method("GET"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Unauthorized",
            "httpStatusCode": 401,
        })))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let result = client.initialize().await;

    assert!(matches!(result, Err(PowerFlexError::FailQuerying { .. })));
    assert!(!client.token().is_set());
    assert!(!client.is_initialized());
}

#[tokio::test]
async fn test_versions_below_three_are_rejected() {
    let server = MockServer::start().await;
    let _ = env_logger::try_init();
    mount_legacy_gateway(&server, "2.6").await;

    let client = create_test_client(&server);
    let result = client.initialize().await;

    assert!(matches!(result, Err(PowerFlexError::Client { .. })));
    assert!(!client.is_initialized());
    assert!(matches!(client.gen1(), Err(PowerFlexError::ClientNotInitialized)));
}

#[tokio::test]
async fn test_gen2_resources_unavailable_below_five() {
    let server = MockServer::start().await;
    let client = initialized_client(&server, "3.6").await;

    assert!(matches!(
        client.gen2(),
        Err(PowerFlexError::UnsupportedResourceSet { .. })
    ));
}

#[tokio::test]
async fn test_remove_standby_mdm_accepts_empty_failure_body() {
    let server = MockServer::start().await;
    let client = initialized_client(&server, "3.5").await;

    Mock::given(method("POST"))
        .and(path("/api/instances/System/action/removeStandbyMdm"))
        .and(basic_auth(USERNAME, LEGACY_TOKEN))
        .and(body_json(json!({"id": "mdm2"})))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let removed = client
        .system()
        .expect("system api")
        .remove_standby_mdm("mdm2")
        .await
        .expect("empty body is success");
    assert!(removed);
}

#[tokio::test]
async fn test_remove_standby_mdm_failure_with_body() {
    let server = MockServer::start().await;
    let client = initialized_client(&server, "3.5").await;

    Mock::given(method("POST"))
        .and(path("/api/instances/System/action/removeStandbyMdm"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "MDM is not a standby",
        })))
        .mount(&server)
        .await;

    let result = client
        .system()
        .expect("system api")
        .remove_standby_mdm("mdm1")
        .await;
    assert!(matches!(result, Err(PowerFlexError::Client { .. })));
}

#[tokio::test]
async fn test_volume_actions_send_volume_class() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;
    let client = initialized_client(&server, "3.5").await;

    Mock::given(method("POST"))
        .and(path("/api/instances/Volume::v1/action/setVolumeSize"))
        .and(body_json(json!({"sizeInGB": "16", "volumeClass": "defaultclass"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/instances/Volume::v1/action/setVolumeName"))
        .and(body_json(json!({"newName": "vol-a", "volumeClass": "csi"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/instances/Volume::v1/action/addMappedSdc"))
        .and(body_json(json!({"sdcId": "s1", "volumeClass": "defaultclass"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/instances/Volume::v1/action/removeMappedSdc"))
        .and(body_json(json!({"allSdcs": "True", "volumeClass": "defaultclass"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/instances/Volume::v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "v1"})))
        .mount(&server)
        .await;

    let volumes = client.gen1().expect("gen1 resources").volume();
    volumes
        .extend("v1", 16, None, None)
        .await
        .expect("Failed to extend volume");
    volumes
        .rename("v1", "vol-a", None, Some(VolumeClass::Csi))
        .await
        .expect("Failed to rename volume");
    volumes
        .add_mapped_sdc("v1", Some("s1"), None, None, None, None, None)
        .await
        .expect("Failed to map volume");
    volumes
        .remove_mapped_sdc("v1", None, None, Some(true), None, None, None)
        .await
        .expect("Failed to unmap volume");
}

#[tokio::test]
async fn test_storage_pool_io_priority_and_parallelism() {
    let server = MockServer::start().await;
    let client = initialized_client(&server, "3.5").await;

    Mock::given(method("POST"))
        .and(path(
            "/api/instances/StoragePool::sp1/action/setVTreeMigrationIoPriorityPolicy",
        ))
        .and(body_json(json!({
            "policy": "limitNumOfConcurrentIos",
            "numOfConcurrentIosPerDevice": "4",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(
            "/api/instances/StoragePool::sp1/action/setRebuildRebalanceParallelism",
        ))
        .and(body_json(json!({"limit": "3"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/instances/StoragePool::sp1/action/modifyPersistentChecksum"))
        .and(body_json(json!({"validateOnRead": "True", "builderLimitInKb": "1024"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/instances/StoragePool::sp1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "sp1"})))
        .expect(3)
        .mount(&server)
        .await;

    let pools = client.gen1().expect("gen1 resources").storage_pool();
    pools
        .set_vtree_migration_io_priority_policy("sp1", "limitNumOfConcurrentIos", Some(4), None)
        .await
        .expect("Failed to set vtree migration policy");
    pools
        .set_rebuild_rebalance_parallelism_limit("sp1", 3)
        .await
        .expect("Failed to set parallelism limit");
    let pool = pools
        .modify_persistent_checksum("sp1", Some(true), Some(1024))
        .await
        .expect("Failed to modify persistent checksum");

    assert_eq!(pool["id"], "sp1");
}
