use serde::{Deserialize, Serialize};

/// Device media types (pre-5.0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceMediaType {
    #[serde(rename = "HDD")]
    Hdd,
    #[serde(rename = "SSD")]
    Ssd,
    #[serde(rename = "NVDIMM")]
    Nvdimm,
}

/// Storage pool media types (pre-5.0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoragePoolMediaType {
    #[serde(rename = "HDD")]
    Hdd,
    #[serde(rename = "SSD")]
    Ssd,
    Transitional,
}

/// Acceleration pool media types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccelerationPoolMediaType {
    #[serde(rename = "SSD")]
    Ssd,
    #[serde(rename = "NVDIMM")]
    Nvdimm,
}

/// Device group and device media types (5.0+)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceGroupMediaType {
    #[serde(rename = "SSD")]
    Ssd,
    #[serde(rename = "PMEM")]
    Pmem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExternalAccelerationType {
    Invalid,
    #[serde(rename = "None")]
    NoAcceleration,
    Read,
    Write,
    ReadAndWrite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompressionMethod {
    Invalid,
    #[serde(rename = "None")]
    NoCompression,
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataLayout {
    #[serde(rename = "InvalidLayout")]
    Invalid,
    MediumGranularity,
    FineGranularity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RmcacheWriteHandlingMode {
    Passthrough,
    Cached,
}

/// Volume deletion strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RemoveMode {
    OnlyMe,
    IncludingDescendants,
    DescendantsOnly,
    WholeVtree,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeType {
    ThickProvisioned,
    ThinProvisioned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeClass {
    #[serde(rename = "defaultclass")]
    Default,
    Replication,
    Csi,
    Openstack,
    Vvol,
    Datastore,
    Nasfs,
    Nasvdm,
    Nascluster,
    Nas,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutoSnapshotRemovalAction {
    Detach,
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeviceTestMode {
    TestOnly,
    NoTest,
    TestAndActivate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrlMode {
    Volatile,
    NonVolatile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SdsIpRole {
    SdsOnly,
    SdcOnly,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerformanceProfile {
    HighPerformance,
    Compact,
}

/// Storage node ip roles (5.0+)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageNodeIpRole {
    Storage,
    App,
    StorageAndApp,
}

/// NVMe target ip roles (5.0+)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SdtIpRole {
    StorageOnly,
    HostOnly,
    StorageAndHost,
}

/// Erasure coding layout of a 5.0+ storage pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProtectionScheme {
    TwoPlusTwo,
    EightPlusTwo,
}

impl ProtectionScheme {
    /// (data slices, protection slices)
    pub fn slices(self) -> (u32, u32) {
        match self {
            ProtectionScheme::TwoPlusTwo => (2, 2),
            ProtectionScheme::EightPlusTwo => (8, 2),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProtectionDomainState {
    Active,
    Inactive,
}

/// SDS ip entry, used in [`SdsCreateRequest::sds_ip_list`] and `add_ip`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SdsIp {
    pub ip: String,
    pub role: SdsIpRole,
}

/// Storage node ip entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageNodeIp {
    pub ip: String,
    pub role: StorageNodeIpRole,
}

/// NVMe target ip entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SdtIp {
    pub ip: String,
    pub role: SdtIpRole,
}

/// Device attached to an SDS at creation time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub device_path: String,
    pub storage_pool_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<DeviceMediaType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccelerationDeviceInfo {
    #[serde(rename = "accelerationDevicePath")]
    pub device_path: String,
    pub accp_id: String,
    #[serde(rename = "accelerationDeviceName", skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RfcacheDevice {
    pub path: String,
    pub name: String,
}

/// Volume to snapshot in `snapshot_volumes` / `create_snapshot`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotDef {
    pub volume_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_name: Option<String>,
}

impl SnapshotDef {
    pub fn new(volume_id: impl Into<String>) -> Self {
        Self {
            volume_id: volume_id.into(),
            snapshot_name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.snapshot_name = Some(name.into());
        self
    }
}

/// Volume creation request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeCreateRequest {
    pub storage_pool_id: String,
    pub volume_size_in_gb: u64,
    pub name: Option<String>,
    pub volume_type: Option<VolumeType>,
    pub use_rmcache: Option<bool>,
    pub compression_method: Option<CompressionMethod>,
    pub volume_class: Option<VolumeClass>,
}

impl VolumeCreateRequest {
    pub fn new(storage_pool_id: impl Into<String>, volume_size_in_gb: u64) -> Self {
        Self {
            storage_pool_id: storage_pool_id.into(),
            volume_size_in_gb,
            ..Default::default()
        }
    }
}

/// Device creation request (pre-5.0)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceCreateRequest {
    #[serde(rename = "deviceCurrentPathname")]
    pub current_pathname: String,
    pub sds_id: String,
    pub acceleration_pool_id: Option<String>,
    pub external_acceleration_type: Option<ExternalAccelerationType>,
    #[serde(rename = "forceDeviceTakeover")]
    pub force: Option<bool>,
    pub media_type: Option<DeviceMediaType>,
    pub name: Option<String>,
    pub storage_pool_id: Option<String>,
}

/// Device creation request (5.0+)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gen2DeviceCreateRequest {
    #[serde(rename = "deviceCurrentPathname")]
    pub current_pathname: String,
    pub device_group_id: String,
    pub node_id: String,
    #[serde(rename = "forceDeviceTakeover")]
    pub force: Option<bool>,
    pub media_type: DeviceGroupMediaType,
    pub name: Option<String>,
}

/// Storage pool creation request (pre-5.0)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoragePoolCreateRequest {
    pub media_type: StoragePoolMediaType,
    pub protection_domain_id: String,
    pub checksum_enabled: Option<bool>,
    pub compression_method: Option<CompressionMethod>,
    pub data_layout: Option<DataLayout>,
    pub external_acceleration_type: Option<ExternalAccelerationType>,
    pub fgl_accp_id: Option<String>,
    pub name: Option<String>,
    pub rmcache_write_handling_mode: Option<RmcacheWriteHandlingMode>,
    pub spare_percentage: Option<u32>,
    pub use_rfcache: Option<bool>,
    pub use_rmcache: Option<bool>,
    pub zero_padding_enabled: Option<bool>,
}

impl StoragePoolCreateRequest {
    pub fn new(media_type: StoragePoolMediaType, protection_domain_id: impl Into<String>) -> Self {
        Self {
            media_type,
            protection_domain_id: protection_domain_id.into(),
            checksum_enabled: None,
            compression_method: None,
            data_layout: None,
            external_acceleration_type: None,
            fgl_accp_id: None,
            name: None,
            rmcache_write_handling_mode: None,
            spare_percentage: None,
            use_rfcache: None,
            use_rmcache: None,
            zero_padding_enabled: None,
        }
    }
}

/// Storage pool creation request (5.0+)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gen2StoragePoolCreateRequest {
    pub name: String,
    pub protection_domain_id: String,
    pub device_group_id: String,
    pub protection_scheme: ProtectionScheme,
    pub compression_method: Option<CompressionMethod>,
    /// `None` uses all available capacity
    pub physical_size_gb: Option<u64>,
    pub capacity_alert_high_threshold: Option<u32>,
    pub capacity_alert_critical_threshold: Option<u32>,
    pub over_provisioning_factor: Option<u32>,
}

/// SDS creation request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdsCreateRequest {
    pub protection_domain_id: String,
    pub sds_ip_list: Vec<SdsIp>,
    #[serde(rename = "accelerationDeviceInfoList")]
    pub acceleration_devices_info: Option<Vec<AccelerationDeviceInfo>>,
    #[serde(rename = "deviceInfoList")]
    pub devices_info: Option<Vec<DeviceInfo>>,
    pub device_test_mode: Option<DeviceTestMode>,
    #[serde(rename = "deviceTestTimeSecs")]
    pub device_test_time_sec: Option<u32>,
    pub drl_mode: Option<DrlMode>,
    pub fault_set_id: Option<String>,
    pub force_clean: Option<bool>,
    pub force_device_takeover: Option<bool>,
    pub name: Option<String>,
    pub num_of_io_buffers: Option<u32>,
    #[serde(rename = "sdsRfcacheDeviceInfoList")]
    pub rfcache_devices_info: Option<Vec<RfcacheDevice>>,
    pub rmcache_enabled: Option<bool>,
    pub rmcache_size_in_kb: Option<u64>,
    pub sds_port: Option<u16>,
}

/// Snapshot policy creation request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotPolicyCreateRequest {
    #[serde(rename = "autoSnapshotCreationCadenceInMin")]
    pub auto_snap_creation_cadence_in_min: u32,
    #[serde(rename = "numOfRetainedSnapshotsPerLevel")]
    pub retained_snaps_per_level: Vec<u32>,
    pub name: Option<String>,
    pub paused: Option<bool>,
}

/// Replication consistency group creation request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RcgCreateRequest {
    #[serde(rename = "rpoInSeconds")]
    pub rpo: u32,
    pub protection_domain_id: String,
    pub remote_protection_domain_id: Option<String>,
    pub peer_mdm_id: Option<String>,
    pub destination_system_id: Option<String>,
    pub name: Option<String>,
    pub force_ignore_consistency: Option<bool>,
    pub activity_mode: Option<String>,
}

/// Replication pair creation request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplicationPairCreateRequest {
    #[serde(rename = "sourceVolumeId")]
    pub source_vol_id: String,
    #[serde(rename = "destinationVolumeId")]
    pub dest_vol_id: String,
    #[serde(rename = "replicationConsistencyGroupId")]
    pub rcg_id: String,
    pub copy_type: String,
    pub name: Option<String>,
}

/// Standby MDM definition for `add_standby_mdm`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandbyMdmRequest {
    #[serde(rename = "ips")]
    pub mdm_ips: Vec<String>,
    pub role: String,
    pub management_ips: Option<Vec<String>>,
    #[serde(rename = "name")]
    pub mdm_name: Option<String>,
    pub port: Option<u16>,
    #[serde(rename = "allowAsymmetricIps")]
    pub allow_multiple_ips: Option<bool>,
    #[serde(rename = "forceClean")]
    pub clean: Option<bool>,
    #[serde(rename = "virtIpIntfs")]
    pub virtual_interface: Option<Vec<String>>,
}

/// Cluster mode switch for `switch_cluster_mode`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClusterModeRequest {
    pub mode: String,
    #[serde(rename = "addSlaveMdmIdList")]
    pub add_secondary: Option<Vec<String>>,
    #[serde(rename = "addTBIdList")]
    pub add_tb: Option<Vec<String>>,
    #[serde(rename = "removeSlaveMdmIdList")]
    pub remove_secondary: Option<Vec<String>>,
    #[serde(rename = "removeTBIdList")]
    pub remove_tb: Option<Vec<String>>,
}

/// Secondary I/O policy of a 5.0+ protection domain
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecondaryIoPolicy {
    /// `unlimited` or `favorApplication`
    pub policy: String,
    pub overall_concurrent_io_limit: Option<u32>,
    pub bandwidth_limit_overall_ios: Option<u64>,
    pub bandwidth_limit_bg_dev_scanner: Option<u64>,
    pub bandwidth_limit_singly_impacted_rebuild: Option<u64>,
    pub bandwidth_limit_doubly_impacted_rebuild: Option<u64>,
    pub bandwidth_limit_rebalance: Option<u64>,
    pub bandwidth_limit_other: Option<u64>,
    pub bandwidth_limit_node_network: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{prepare_params, to_params};
    use serde_json::{json, Value};

    #[test]
    fn volume_request_matches_wire_format() {
        let prepared = prepare_params(&to_params(&VolumeCreateRequest::new("1", 8)).unwrap());
        assert_eq!(
            serde_json::to_string(&prepared).unwrap(),
            r#"{"storagePoolId":"1","volumeSizeInGb":"8"}"#
        );
    }

    #[test]
    fn nested_lists_drop_unset_fields() {
        let request = SdsCreateRequest {
            protection_domain_id: "pd".to_string(),
            sds_ip_list: vec![SdsIp {
                ip: "10.0.0.1".to_string(),
                role: SdsIpRole::All,
            }],
            devices_info: Some(vec![DeviceInfo {
                device_path: "/dev/sdb".to_string(),
                storage_pool_id: "sp".to_string(),
                device_name: None,
                media_type: Some(DeviceMediaType::Ssd),
            }]),
            force_clean: Some(true),
            ..Default::default()
        };
        let prepared = Value::Object(prepare_params(&to_params(&request).unwrap()));
        assert_eq!(
            prepared,
            json!({
                "protectionDomainId": "pd",
                "sdsIpList": [{"ip": "10.0.0.1", "role": "all"}],
                "deviceInfoList": [{"devicePath": "/dev/sdb", "storagePoolId": "sp", "mediaType": "SSD"}],
                "forceClean": "True"
            })
        );
    }

    #[test]
    fn enum_wire_names() {
        assert_eq!(json!(RemoveMode::WholeVtree), json!("WHOLE_VTREE"));
        assert_eq!(json!(CompressionMethod::NoCompression), json!("None"));
        assert_eq!(json!(VolumeClass::Default), json!("defaultclass"));
        assert_eq!(json!(DeviceTestMode::TestAndActivate), json!("testAndActivate"));
        assert_eq!(json!(DataLayout::Invalid), json!("InvalidLayout"));
    }
}
