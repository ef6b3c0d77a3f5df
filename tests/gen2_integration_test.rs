mod common;

use common::*;
use powerflex_client::{
    apis::gen2::{HostRef, ProtectionDomainUpdate, StoragePoolUpdate},
    models::{
        Gen2StoragePoolCreateRequest, ProtectionDomainState, ProtectionScheme, SdtIp, SdtIpRole,
    },
    PowerFlexError, ResourceSet, Resources,
};
use serde_json::json;
use wiremock::{
    matchers::{bearer_token, body_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

#[tokio::test]
async fn test_initialize_selects_gen2_from_five() {
    let server = MockServer::start().await;
    let client = initialized_client(&server, "5.0").await;

    assert_eq!(client.resource_set().expect("resource set"), ResourceSet::Gen2);
    assert!(matches!(client.resources(), Ok(Resources::Gen2(_))));
    match client.gen1() {
        Err(PowerFlexError::UnsupportedResourceSet { api_version, .. }) => {
            assert_eq!(api_version, "5.0");
        }
        Err(other) => panic!("expected UnsupportedResourceSet, got {:?}", other),
        Ok(_) => panic!("gen1 resources must be unavailable on 5.0"),
    }
}

#[tokio::test]
async fn test_create_storage_pool_with_all_capacity() {
    let server = MockServer::start().await;
    let client = initialized_client(&server, "5.0").await;

    Mock::given(method("POST"))
        .and(path("/api/types/StoragePool/instances"))
        .and(bearer_token(ACCESS_TOKEN))
        .and(body_json(json!({
            "name": "sp1",
            "protectionDomainId": "pd1",
            "deviceGroupId": "dg1",
            "gen": "EC",
            "numDataSlices": "2",
            "numProtectionSlices": "2",
            "useAllAvailableCapacity": "True",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "sp-1"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/instances/StoragePool::sp-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "sp-1",
            "name": "sp1",
        })))
        .mount(&server)
        .await;

    let request = Gen2StoragePoolCreateRequest {
        name: "sp1".to_string(),
        protection_domain_id: "pd1".to_string(),
        device_group_id: "dg1".to_string(),
        protection_scheme: ProtectionScheme::TwoPlusTwo,
        compression_method: None,
        physical_size_gb: None,
        capacity_alert_high_threshold: None,
        capacity_alert_critical_threshold: None,
        over_provisioning_factor: None,
    };
    let pool = client
        .gen2()
        .expect("gen2 resources")
        .storage_pool()
        .create(&request)
        .await
        .expect("Failed to create storage pool");

    assert_eq!(pool["name"], "sp1");
}

#[tokio::test]
async fn test_unmap_volume_from_all_hosts() {
    let server = MockServer::start().await;
    let client = initialized_client(&server, "5.0").await;

    Mock::given(method("POST"))
        .and(path("/api/instances/Volume::v1/action/removeMappedHost"))
        .and(body_json(json!({"allHosts": "True"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/instances/Volume::v1/action/addMappedHost"))
        .and(body_json(json!({"nqn": "nqn.2014-08.org:host1"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let volumes = client.gen2().expect("gen2 resources").volume();
    volumes
        .add_mapped_host("v1", HostRef::Nqn("nqn.2014-08.org:host1"), None, None, None)
        .await
        .expect("Failed to map volume");
    volumes
        .remove_mapped_host("v1", None, None)
        .await
        .expect("Failed to unmap volume");
}

#[tokio::test]
async fn test_volume_metrics_query() {
    let server = MockServer::start().await;
    let client = initialized_client(&server, "5.0").await;

    Mock::given(method("POST"))
        .and(path("/dtapi/rest/v1/metrics/query"))
        .and(bearer_token(ACCESS_TOKEN))
        .and(body_json(json!({
            "resource_type": "volume",
            "ids": ["v1"],
            "metrics": ["host_read_bandwidth"],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resources": [{"id": "v1", "metrics": [{"name": "host_read_bandwidth", "values": [0]}]}],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let metrics = client
        .gen2()
        .expect("gen2 resources")
        .volume()
        .get_statistics("v1", Some(&["host_read_bandwidth"]))
        .await
        .expect("Failed to query metrics");

    assert_eq!(metrics["resources"][0]["id"], "v1");
}

#[tokio::test]
async fn test_metrics_query_failure() {
    let server = MockServer::start().await;
    let client = initialized_client(&server, "5.0").await;

    Mock::given(method("POST"))
        .and(path("/dtapi/rest/v1/metrics/query"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "bad type"})))
        .mount(&server)
        .await;

    let result = client
        .utility()
        .expect("utility api")
        .query_metrics_for_all_storage_nodes(None, None)
        .await;

    assert!(matches!(result, Err(PowerFlexError::FailQuerying { .. })));
}

#[tokio::test]
async fn test_reinitialize_after_gateway_upgrade() {
    let server = MockServer::start().await;
    let client = initialized_client(&server, "3.5").await;
    assert_eq!(client.resource_set().expect("resource set"), ResourceSet::Gen1);

    server.reset().await;
    mount_appliance_gateway(&server, "5.0").await;
    client.initialize().await.expect("Failed to re-initialize client");

    let version = client
        .system()
        .expect("system api")
        .api_version(true)
        .await
        .expect("cached version");
    assert_eq!(version.as_str(), "5.0");
    assert_eq!(client.resource_set().expect("resource set"), ResourceSet::Gen2);
    assert!(client.gen2().is_ok());
    assert!(matches!(
        client.gen1(),
        Err(PowerFlexError::UnsupportedResourceSet { .. })
    ));
}

#[tokio::test]
async fn test_create_storage_pool_applies_thresholds() {
    let server = MockServer::start().await;
    let client = initialized_client(&server, "5.0").await;

    Mock::given(method("POST"))
        .and(path("/api/types/StoragePool/instances"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "sp-2"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/instances/StoragePool::sp-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "sp-2",
            "name": "sp2",
            "capacityAlertHighThreshold": 80,
            "capacityAlertCriticalThreshold": 90,
            "overProvisioningFactor": 2,
        })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/instances/StoragePool::sp-2/action/setCapacityAlertThresholds"))
        .and(body_json(json!({
            "capacityAlertHighThresholdPercent": "70",
            "capacityAlertCriticalThresholdPercent": "90",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/instances/StoragePool::sp-2/action/setOverProvisioningFactor"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let request = Gen2StoragePoolCreateRequest {
        name: "sp2".to_string(),
        protection_domain_id: "pd1".to_string(),
        device_group_id: "dg1".to_string(),
        protection_scheme: ProtectionScheme::EightPlusTwo,
        compression_method: None,
        physical_size_gb: Some(512),
        capacity_alert_high_threshold: Some(70),
        capacity_alert_critical_threshold: None,
        over_provisioning_factor: Some(2),
    };
    let pool = client
        .gen2()
        .expect("gen2 resources")
        .storage_pool()
        .create(&request)
        .await
        .expect("Failed to create storage pool");

    assert_eq!(pool["id"], "sp-2");
}

#[tokio::test]
async fn test_storage_pool_update_rejects_new_device_group() {
    let server = MockServer::start().await;
    let client = initialized_client(&server, "5.0").await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let current = json!({"id": "sp-1", "name": "sp1", "deviceGroupId": "dg1"});
    let desired = StoragePoolUpdate {
        name: Some("renamed".to_string()),
        device_group_id: Some("dg2".to_string()),
        ..Default::default()
    };
    let result = client
        .gen2()
        .expect("gen2 resources")
        .storage_pool()
        .update(&desired, &current)
        .await;

    assert!(matches!(
        result,
        Err(PowerFlexError::NotUpdatable { param: "device group ID", .. })
    ));
}

#[tokio::test]
async fn test_protection_domain_need_update_fetches_current() {
    let server = MockServer::start().await;
    let client = initialized_client(&server, "5.0").await;

    Mock::given(method("GET"))
        .and(path("/api/instances/ProtectionDomain::pd-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "pd-1",
            "name": "pd1",
            "protectionDomainState": "Active",
            "rebuildEnabled": true,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let desired = ProtectionDomainUpdate {
        name: Some("pd1".to_string()),
        rebuild_enabled: Some(false),
        ..Default::default()
    };
    let (needed, changes) = client
        .gen2()
        .expect("gen2 resources")
        .protection_domain()
        .need_update("pd-1", &desired, None)
        .await
        .expect("Failed to compare protection domain");

    assert!(needed);
    assert!(changes.name.is_none());
    assert_eq!(changes.rebuild_enabled, Some(false));
}

#[tokio::test]
async fn test_create_protection_domain_then_inactivate() {
    let server = MockServer::start().await;
    let client = initialized_client(&server, "5.0").await;

    Mock::given(method("POST"))
        .and(path("/api/types/ProtectionDomain/instances"))
        .and(body_json(json!({"name": "pd2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "pd-2"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/instances/ProtectionDomain::pd-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "pd-2",
            "name": "pd2",
            "protectionDomainState": "Active",
        })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/instances/ProtectionDomain::pd-2/action/inactivateProtectionDomain"))
        .and(body_json(json!({"forceShutdown": "True"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let settings = ProtectionDomainUpdate {
        state: Some(ProtectionDomainState::Inactive),
        ..Default::default()
    };
    let protection_domain = client
        .gen2()
        .expect("gen2 resources")
        .protection_domain()
        .create("pd2", &settings)
        .await
        .expect("Failed to create protection domain");

    assert_eq!(protection_domain["id"], "pd-2");
}

#[tokio::test]
async fn test_shared_apis_reachable_on_gen2() {
    let server = MockServer::start().await;
    let client = initialized_client(&server, "5.0").await;

    Mock::given(method("POST"))
        .and(path("/api/types/SnapshotPolicy/instances/action/querySelectedStatistics"))
        .and(body_json(json!({"properties": ["numOfSrcVols"], "ids": ["p1"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "p1": {"numOfSrcVols": 2},
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/types/Sdc/instances/action/querySelectedStatistics"))
        .and(body_json(json!({"properties": ["numOfMappedVolumes"], "allIds": ""})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/types/Host/instances"))
        .and(body_json(json!({"nqn": "nqn.2014-08.org:host1", "maxNumPaths": "4"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "h1"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/instances/Host::h1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "h1",
            "nqn": "nqn.2014-08.org:host1",
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/instances/Host::h1/action/modifyMaxNumPaths"))
        .and(body_json(json!({"newMaxNumPaths": "8"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let resources = client.gen2().expect("gen2 resources");
    let stats = resources
        .snapshot_policy()
        .query_selected_statistics(&["numOfSrcVols"], Some(&["p1"][..]))
        .await
        .expect("Failed to query snapshot policy statistics");
    assert_eq!(stats["p1"]["numOfSrcVols"], 2);

    resources
        .sdc()
        .query_selected_statistics(&["numOfMappedVolumes"], None)
        .await
        .expect("Failed to query SDC statistics");

    let host = resources
        .host()
        .create("nqn.2014-08.org:host1", None, Some(4), None)
        .await
        .expect("Failed to create host");
    assert_eq!(host["id"], "h1");
    resources
        .host()
        .modify_max_num_paths("h1", 8)
        .await
        .expect("Failed to modify max paths");
}

#[tokio::test]
async fn test_sdt_create_and_maintenance() {
    let server = MockServer::start().await;
    let client = initialized_client(&server, "5.0").await;

    Mock::given(method("POST"))
        .and(path("/api/types/Sdt/instances"))
        .and(body_json(json!({
            "ips": [{"ip": "10.0.0.5", "role": "StorageAndHost"}],
            "nvmePort": "4420",
            "name": "sdt1",
            "protectionDomainId": "pd1",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "t1"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/instances/Sdt::t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "t1",
            "name": "sdt1",
        })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/instances/Sdt::t1/action/enterMaintenanceMode"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let sdts = client.gen2().expect("gen2 resources").sdt();
    let ips = [SdtIp {
        ip: "10.0.0.5".to_string(),
        role: SdtIpRole::StorageAndHost,
    }];
    let sdt = sdts
        .create(&ips, "sdt1", "pd1", None, Some(4420), None)
        .await
        .expect("Failed to create NVMe target");
    assert_eq!(sdt["id"], "t1");

    sdts.enter_maintenance_mode("t1")
        .await
        .expect("Failed to enter maintenance mode");

    let empty = sdts.create(&[], "sdt2", "pd1", None, None, None).await;
    assert!(matches!(empty, Err(PowerFlexError::InvalidInput(_))));
}
