//! Resources of gateways below 5.0

pub mod device;
pub mod fault_set;
pub mod protection_domain;
pub mod replication_consistency_group;
pub mod sds;
pub mod storage_pool;
pub mod volume;

pub use device::DeviceApi;
pub use fault_set::FaultSetApi;
pub use protection_domain::ProtectionDomainApi;
pub use replication_consistency_group::ReplicationConsistencyGroupApi;
pub use sds::SdsApi;
pub use storage_pool::StoragePoolApi;
pub use volume::VolumeApi;

// Same wire contract on both generations
pub use super::{AccelerationPoolApi, HostApi, ReplicationPairApi, SdcApi, SnapshotPolicyApi};
