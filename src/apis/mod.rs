pub mod acceleration_pool;
pub mod credential;
pub mod gen1;
pub mod gen2;
pub mod host;
pub mod replication_pair;
pub mod sdc;
pub mod snapshot_policy;
pub mod system;
pub mod utility;

pub use acceleration_pool::AccelerationPoolApi;
pub use credential::{Credential, CredentialApi, CredentialKind};
pub use host::HostApi;
pub use replication_pair::ReplicationPairApi;
pub use sdc::SdcApi;
pub use snapshot_policy::SnapshotPolicyApi;
pub use system::SystemApi;
pub use utility::UtilityApi;

use crate::{client::PowerFlexClient, utils::ApiVersion};

/// Resource table selected once from the queried API version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceSet {
    /// Gateways below 5.0
    Gen1,
    /// PowerFlex 5.0+
    Gen2,
}

impl ResourceSet {
    pub fn for_version(version: &ApiVersion) -> Self {
        if *version >= ApiVersion::new(5, 0) {
            ResourceSet::Gen2
        } else {
            ResourceSet::Gen1
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ResourceSet::Gen1 => "Gen1",
            ResourceSet::Gen2 => "Gen2",
        }
    }
}

/// Version-appropriate resource accessors
pub enum Resources<'a> {
    Gen1(Gen1Resources<'a>),
    Gen2(Gen2Resources<'a>),
}

/// Resource accessors of pre-5.0 gateways
#[derive(Clone, Copy)]
pub struct Gen1Resources<'a> {
    client: &'a PowerFlexClient,
}

impl<'a> Gen1Resources<'a> {
    pub fn new(client: &'a PowerFlexClient) -> Self {
        Self { client }
    }

    pub fn acceleration_pool(&self) -> AccelerationPoolApi<'a> {
        AccelerationPoolApi::new(self.client)
    }

    pub fn device(&self) -> gen1::DeviceApi<'a> {
        gen1::DeviceApi::new(self.client)
    }

    pub fn fault_set(&self) -> gen1::FaultSetApi<'a> {
        gen1::FaultSetApi::new(self.client)
    }

    pub fn protection_domain(&self) -> gen1::ProtectionDomainApi<'a> {
        gen1::ProtectionDomainApi::new(self.client)
    }

    pub fn sdc(&self) -> SdcApi<'a> {
        SdcApi::new(self.client)
    }

    pub fn host(&self) -> HostApi<'a> {
        HostApi::new(self.client)
    }

    pub fn sds(&self) -> gen1::SdsApi<'a> {
        gen1::SdsApi::new(self.client)
    }

    pub fn snapshot_policy(&self) -> SnapshotPolicyApi<'a> {
        SnapshotPolicyApi::new(self.client)
    }

    pub fn storage_pool(&self) -> gen1::StoragePoolApi<'a> {
        gen1::StoragePoolApi::new(self.client)
    }

    pub fn volume(&self) -> gen1::VolumeApi<'a> {
        gen1::VolumeApi::new(self.client)
    }

    pub fn replication_consistency_group(&self) -> gen1::ReplicationConsistencyGroupApi<'a> {
        gen1::ReplicationConsistencyGroupApi::new(self.client)
    }

    pub fn replication_pair(&self) -> ReplicationPairApi<'a> {
        ReplicationPairApi::new(self.client)
    }
}

/// Resource accessors of PowerFlex 5.0+
#[derive(Clone, Copy)]
pub struct Gen2Resources<'a> {
    client: &'a PowerFlexClient,
}

impl<'a> Gen2Resources<'a> {
    pub fn new(client: &'a PowerFlexClient) -> Self {
        Self { client }
    }

    pub fn device(&self) -> gen2::DeviceApi<'a> {
        gen2::DeviceApi::new(self.client)
    }

    pub fn device_group(&self) -> gen2::DeviceGroupApi<'a> {
        gen2::DeviceGroupApi::new(self.client)
    }

    pub fn protection_domain(&self) -> gen2::ProtectionDomainApi<'a> {
        gen2::ProtectionDomainApi::new(self.client)
    }

    pub fn storage_node(&self) -> gen2::StorageNodeApi<'a> {
        gen2::StorageNodeApi::new(self.client)
    }

    pub fn storage_pool(&self) -> gen2::StoragePoolApi<'a> {
        gen2::StoragePoolApi::new(self.client)
    }

    pub fn volume(&self) -> gen2::VolumeApi<'a> {
        gen2::VolumeApi::new(self.client)
    }

    pub fn acceleration_pool(&self) -> AccelerationPoolApi<'a> {
        AccelerationPoolApi::new(self.client)
    }

    pub fn snapshot_policy(&self) -> SnapshotPolicyApi<'a> {
        SnapshotPolicyApi::new(self.client)
    }

    pub fn replication_pair(&self) -> ReplicationPairApi<'a> {
        ReplicationPairApi::new(self.client)
    }

    pub fn sdc(&self) -> SdcApi<'a> {
        SdcApi::new(self.client)
    }

    pub fn host(&self) -> HostApi<'a> {
        HostApi::new(self.client)
    }

    pub fn sdt(&self) -> gen2::SdtApi<'a> {
        gen2::SdtApi::new(self.client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gen2_starts_at_five() {
        let set = |v: &str| ResourceSet::for_version(&ApiVersion::parse(v).unwrap());
        assert_eq!(set("3.5"), ResourceSet::Gen1);
        assert_eq!(set("4.5"), ResourceSet::Gen1);
        assert_eq!(set("5.0"), ResourceSet::Gen2);
        assert_eq!(set("5.1.2"), ResourceSet::Gen2);
    }
}
