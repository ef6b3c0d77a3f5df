use crate::{
    apis::gen1::SdsApi,
    client::PowerFlexClient,
    entity::EntityRequest,
    error::{PowerFlexError, PowerFlexResult},
    models::{
        CompressionMethod, DataLayout, ExternalAccelerationType, RmcacheWriteHandlingMode,
        StoragePoolCreateRequest, StoragePoolMediaType,
    },
    utils::{params, to_params, Params},
};
use log::info;
use serde_json::{json, Value};

/// Storage pool API operations
pub struct StoragePoolApi<'a> {
    entity: EntityRequest<'a>,
}

impl<'a> StoragePoolApi<'a> {
    pub fn new(client: &'a PowerFlexClient) -> Self {
        Self {
            entity: EntityRequest::new(client, "StoragePool"),
        }
    }

    pub async fn get(
        &self,
        storage_pool_id: Option<&str>,
        filter_fields: Option<&Params>,
        fields: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        self.entity.get(storage_pool_id, filter_fields, fields).await
    }

    /// Create a new Storage Pool
    ///
    /// # Arguments
    /// * `request` - Pool parameters; a fine granularity layout needs `fgl_accp_id`
    pub async fn create(&self, request: &StoragePoolCreateRequest) -> PowerFlexResult<Value> {
        if request.data_layout == Some(DataLayout::FineGranularity) && request.fgl_accp_id.is_none() {
            return Err(PowerFlexError::invalid_input(
                "fgl_accp_id must be set for Fine Granular Storage Pool.",
            ));
        }
        info!(
            "Creating storage pool in protection domain {}",
            request.protection_domain_id
        );
        self.entity.create_entity(&to_params(request)?).await
    }

    pub async fn delete(&self, storage_pool_id: &str) -> PowerFlexResult<()> {
        self.entity.delete_entity(storage_pool_id, None).await
    }

    pub async fn get_devices(
        &self,
        storage_pool_id: &str,
        filter_fields: Option<&Params>,
        fields: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        self.entity
            .get_related(storage_pool_id, "Device", filter_fields, fields)
            .await
    }

    /// SDSs contributing to a storage pool.
    ///
    /// Resolved through the pool's `SpSds` relation, then filtered from the
    /// SDS collection.
    pub async fn get_sdss(
        &self,
        storage_pool_id: &str,
        filter_fields: Option<&Params>,
        fields: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        let sp_sdss = self
            .entity
            .get_related(storage_pool_id, "SpSds", filter_fields, Some(&["sdsId"][..]))
            .await?;
        let sds_ids: Vec<Value> = sp_sdss
            .as_array()
            .map(|items| items.iter().filter_map(|item| item.get("sdsId").cloned()).collect())
            .unwrap_or_default();

        let mut sds_filter = filter_fields.cloned().unwrap_or_default();
        sds_filter.remove("sdsId");
        sds_filter.insert("id".to_string(), Value::Array(sds_ids));

        SdsApi::new(self.entity.client())
            .get(None, Some(&sds_filter), fields)
            .await
    }

    pub async fn get_volumes(
        &self,
        storage_pool_id: &str,
        filter_fields: Option<&Params>,
        fields: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        self.entity
            .get_related(storage_pool_id, "Volume", filter_fields, fields)
            .await
    }

    pub async fn get_statistics(
        &self,
        storage_pool_id: &str,
        fields: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        self.entity.get_statistics(storage_pool_id, fields).await
    }

    pub async fn rename(&self, storage_pool_id: &str, name: &str) -> PowerFlexResult<Value> {
        let params = params(json!({ "name": name }));
        self.entity
            .rename_entity("setStoragePoolName", storage_pool_id, &params)
            .await
    }

    async fn set(
        &self,
        storage_pool_id: &str,
        action: &str,
        params: Option<Params>,
        what: &str,
    ) -> PowerFlexResult<Value> {
        info!("Updating storage pool {} with {}", storage_pool_id, action);
        self.entity
            .post_action_and_get(storage_pool_id, action, params.as_ref(), what)
            .await
    }

    pub async fn set_checksum_enabled(
        &self,
        storage_pool_id: &str,
        checksum_enabled: bool,
    ) -> PowerFlexResult<Value> {
        self.set(
            storage_pool_id,
            "setChecksumEnabled",
            Some(params(json!({ "checksumEnabled": checksum_enabled }))),
            "enable/disable checksum for",
        )
        .await
    }

    pub async fn set_compression_method(
        &self,
        storage_pool_id: &str,
        compression_method: CompressionMethod,
    ) -> PowerFlexResult<Value> {
        self.set(
            storage_pool_id,
            "modifyCompressionMethod",
            Some(params(json!({ "compressionMethod": compression_method }))),
            "set compression method for",
        )
        .await
    }

    /// Set the external acceleration type.
    ///
    /// `override_device_configuration` and `keep_device_ext_acceleration`
    /// are mutually exclusive.
    pub async fn set_external_acceleration_type(
        &self,
        storage_pool_id: &str,
        external_acceleration_type: ExternalAccelerationType,
        override_device_configuration: Option<bool>,
        keep_device_ext_acceleration: Option<bool>,
    ) -> PowerFlexResult<Value> {
        if override_device_configuration == Some(true) && keep_device_ext_acceleration == Some(true) {
            return Err(PowerFlexError::invalid_input(
                "Either override_device_configuration or \
                 keep_device_specific_external_acceleration can be set.",
            ));
        }
        self.set(
            storage_pool_id,
            "setExternalAccelerationType",
            Some(params(json!({
                "externalAccelerationType": external_acceleration_type,
                "overrideDeviceConfiguration": override_device_configuration,
                "keepDeviceSpecificExternalAcceleration": keep_device_ext_acceleration,
            }))),
            "set external acceleration type for",
        )
        .await
    }

    pub async fn set_media_type(
        &self,
        storage_pool_id: &str,
        media_type: StoragePoolMediaType,
        override_device_configuration: Option<bool>,
    ) -> PowerFlexResult<Value> {
        self.set(
            storage_pool_id,
            "setMediaType",
            Some(params(json!({
                "mediaType": media_type,
                "overrideDeviceConfiguration": override_device_configuration,
            }))),
            "set media type for",
        )
        .await
    }

    pub async fn set_rebalance_enabled(
        &self,
        storage_pool_id: &str,
        rebalance_enabled: bool,
    ) -> PowerFlexResult<Value> {
        self.set(
            storage_pool_id,
            "setRebalanceEnabled",
            Some(params(json!({ "rebalanceEnabled": rebalance_enabled }))),
            "enable/disable rebalance for",
        )
        .await
    }

    pub async fn set_rebuild_enabled(
        &self,
        storage_pool_id: &str,
        rebuild_enabled: bool,
    ) -> PowerFlexResult<Value> {
        self.set(
            storage_pool_id,
            "setRebuildEnabled",
            Some(params(json!({ "rebuildEnabled": rebuild_enabled }))),
            "enable/disable rebuild for",
        )
        .await
    }

    pub async fn set_spare_percentage(
        &self,
        storage_pool_id: &str,
        spare_percentage: u32,
    ) -> PowerFlexResult<Value> {
        self.set(
            storage_pool_id,
            "setSparePercentage",
            Some(params(json!({ "sparePercentage": spare_percentage }))),
            "set spare percentage for",
        )
        .await
    }

    /// Enable or disable Rfcache through `enableRfcache` / `disableRfcache`
    pub async fn set_use_rfcache(
        &self,
        storage_pool_id: &str,
        use_rfcache: bool,
    ) -> PowerFlexResult<Value> {
        let action = if use_rfcache { "enableRfcache" } else { "disableRfcache" };
        self.set(storage_pool_id, action, None, "set Rfcache usage for")
            .await
    }

    pub async fn set_use_rmcache(
        &self,
        storage_pool_id: &str,
        use_rmcache: bool,
    ) -> PowerFlexResult<Value> {
        self.set(
            storage_pool_id,
            "setUseRmcache",
            Some(params(json!({ "useRmcache": use_rmcache }))),
            "set Rmcache usage for",
        )
        .await
    }

    pub async fn set_zero_padding_policy(
        &self,
        storage_pool_id: &str,
        zero_padding_enabled: bool,
    ) -> PowerFlexResult<Value> {
        self.set(
            storage_pool_id,
            "setZeroPaddingPolicy",
            Some(params(json!({ "zeroPadEnabled": zero_padding_enabled }))),
            "set Zero Padding policy for",
        )
        .await
    }

    pub async fn set_rep_cap_max_ratio(
        &self,
        storage_pool_id: &str,
        rep_cap_max_ratio: u32,
    ) -> PowerFlexResult<Value> {
        self.set(
            storage_pool_id,
            "setReplicationJournalCapacity",
            Some(params(json!({ "replicationJournalCapacityMaxRatio": rep_cap_max_ratio }))),
            "set the replication journal capacity ratio for",
        )
        .await
    }

    pub async fn set_cap_alert_thresholds(
        &self,
        storage_pool_id: &str,
        cap_alert_high_threshold: u32,
        cap_alert_critical_threshold: u32,
    ) -> PowerFlexResult<Value> {
        self.set(
            storage_pool_id,
            "setCapacityAlertThresholds",
            Some(params(json!({
                "capacityAlertHighThresholdPercent": cap_alert_high_threshold,
                "capacityAlertCriticalThresholdPercent": cap_alert_critical_threshold,
            }))),
            "set the capacity alert thresholds for",
        )
        .await
    }

    pub async fn set_rmcache_write_handling_mode(
        &self,
        storage_pool_id: &str,
        mode: RmcacheWriteHandlingMode,
    ) -> PowerFlexResult<Value> {
        self.set(
            storage_pool_id,
            "setRmcacheWriteHandlingMode",
            Some(params(json!({ "rmcacheWriteHandlingMode": mode }))),
            "set the RM cache write handling mode for",
        )
        .await
    }

    /// Enable persistent checksum with its settings, or disable it
    pub async fn set_persistent_checksum(
        &self,
        storage_pool_id: &str,
        enable: bool,
        validate_on_read: Option<bool>,
        builder_limit_in_kb: Option<u64>,
    ) -> PowerFlexResult<Value> {
        let (action, params) = if enable {
            (
                "enablePersistentChecksum",
                Some(params(json!({
                    "validateOnRead": validate_on_read,
                    "builderLimitInKb": builder_limit_in_kb,
                }))),
            )
        } else {
            ("disablePersistentChecksum", None)
        };
        self.set(storage_pool_id, action, params, "set the persistent checksum for")
            .await
    }

    /// Re-validate and rebuild limits of an already enabled persistent checksum
    pub async fn modify_persistent_checksum(
        &self,
        storage_pool_id: &str,
        validate_on_read: Option<bool>,
        builder_limit_in_kb: Option<u64>,
    ) -> PowerFlexResult<Value> {
        let params = params(json!({
            "validateOnRead": validate_on_read,
            "builderLimitInKb": builder_limit_in_kb,
        }));
        self.set(
            storage_pool_id,
            "modifyPersistentChecksum",
            Some(params),
            "modify the persistent checksum for",
        )
        .await
    }

    async fn set_io_priority_policy(
        &self,
        storage_pool_id: &str,
        action: &str,
        policy: &str,
        concurrent_ios_per_device: Option<u32>,
        bw_limit_per_device_kbps: Option<u64>,
        what: &str,
    ) -> PowerFlexResult<Value> {
        let params = params(json!({
            "policy": policy,
            "numOfConcurrentIosPerDevice": concurrent_ios_per_device,
            "bwLimitPerDeviceInKbps": bw_limit_per_device_kbps,
        }));
        self.set(storage_pool_id, action, Some(params), what).await
    }

    pub async fn set_protected_maintenance_mode_io_priority_policy(
        &self,
        storage_pool_id: &str,
        policy: &str,
        concurrent_ios_per_device: Option<u32>,
        bw_limit_per_device_kbps: Option<u64>,
    ) -> PowerFlexResult<Value> {
        self.set_io_priority_policy(
            storage_pool_id,
            "setProtectedMaintenanceModeIoPriorityPolicy",
            policy,
            concurrent_ios_per_device,
            bw_limit_per_device_kbps,
            "set the protected maintenance mode IO priority policy for",
        )
        .await
    }

    pub async fn set_vtree_migration_io_priority_policy(
        &self,
        storage_pool_id: &str,
        policy: &str,
        concurrent_ios_per_device: Option<u32>,
        bw_limit_per_device_kbps: Option<u64>,
    ) -> PowerFlexResult<Value> {
        self.set_io_priority_policy(
            storage_pool_id,
            "setVTreeMigrationIoPriorityPolicy",
            policy,
            concurrent_ios_per_device,
            bw_limit_per_device_kbps,
            "set VTree migration I/O priority policy for",
        )
        .await
    }

    pub async fn rebalance_io_priority_policy(
        &self,
        storage_pool_id: &str,
        policy: &str,
        concurrent_ios_per_device: Option<u32>,
        bw_limit_per_device_kbps: Option<u64>,
    ) -> PowerFlexResult<Value> {
        self.set_io_priority_policy(
            storage_pool_id,
            "setRebalanceIoPriorityPolicy",
            policy,
            concurrent_ios_per_device,
            bw_limit_per_device_kbps,
            "set the rebalance I/O priority policy for",
        )
        .await
    }

    pub async fn set_rebuild_rebalance_parallelism_limit(
        &self,
        storage_pool_id: &str,
        jobs_per_device: u32,
    ) -> PowerFlexResult<Value> {
        self.set(
            storage_pool_id,
            "setRebuildRebalanceParallelism",
            Some(params(json!({ "limit": jobs_per_device }))),
            "set rebuild rebalance parallelism limit for",
        )
        .await
    }

    pub async fn set_fragmentation_enabled(
        &self,
        storage_pool_id: &str,
        enable_fragmentation: bool,
    ) -> PowerFlexResult<Value> {
        let action = if enable_fragmentation {
            "enableFragmentation"
        } else {
            "disableFragmentation"
        };
        self.set(storage_pool_id, action, None, "enable/disable fragmentation for")
            .await
    }

    pub async fn query_selected_statistics(
        &self,
        properties: &[&str],
        ids: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        self.entity
            .query_selected_statistics(
                "querySelectedStatistics",
                params(json!({ "properties": properties })),
                ids,
            )
            .await
    }
}
