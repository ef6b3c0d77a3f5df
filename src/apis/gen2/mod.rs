//! Resources of PowerFlex 5.0+

pub mod device;
pub mod device_group;
pub mod protection_domain;
pub mod sdt;
pub mod storage_node;
pub mod storage_pool;
pub mod volume;

pub use device::DeviceApi;
pub use device_group::DeviceGroupApi;
pub use protection_domain::{ProtectionDomainApi, ProtectionDomainUpdate};
pub use sdt::SdtApi;
pub use storage_node::StorageNodeApi;
pub use storage_pool::{StoragePoolApi, StoragePoolUpdate};
pub use volume::{HostRef, VolumeApi};

// Same wire contract on both generations
pub use super::{AccelerationPoolApi, HostApi, ReplicationPairApi, SdcApi, SnapshotPolicyApi};
