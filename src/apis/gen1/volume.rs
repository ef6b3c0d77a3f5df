use crate::{
    client::PowerFlexClient,
    entity::EntityRequest,
    error::{PowerFlexError, PowerFlexResult},
    models::{CompressionMethod, RemoveMode, VolumeClass, VolumeCreateRequest},
    utils::{params, to_params, Params},
};
use log::info;
use serde_json::{json, Value};

/// Volume API operations
pub struct VolumeApi<'a> {
    entity: EntityRequest<'a>,
}

impl<'a> VolumeApi<'a> {
    pub fn new(client: &'a PowerFlexClient) -> Self {
        Self {
            entity: EntityRequest::new(client, "Volume"),
        }
    }

    /// Get one volume by id, or all volumes
    pub async fn get(
        &self,
        volume_id: Option<&str>,
        filter_fields: Option<&Params>,
        fields: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        self.entity.get(volume_id, filter_fields, fields).await
    }

    /// Create a new Volume
    ///
    /// # Arguments
    /// * `request` - Volume creation parameters
    ///
    /// Returns the created volume as read back from the gateway.
    pub async fn create(&self, request: &VolumeCreateRequest) -> PowerFlexResult<Value> {
        info!(
            "Creating {} GB volume in storage pool {}",
            request.volume_size_in_gb, request.storage_pool_id
        );
        self.entity.create_entity(&to_params(request)?).await
    }

    /// Delete a Volume
    ///
    /// # Arguments
    /// * `volume_id` - Volume id
    /// * `remove_mode` - Which part of the vtree to remove
    /// * `allow_ext_managed` - Allow on externally managed volumes
    pub async fn delete(
        &self,
        volume_id: &str,
        remove_mode: RemoveMode,
        allow_ext_managed: Option<bool>,
        volume_class: Option<VolumeClass>,
    ) -> PowerFlexResult<()> {
        let params = params(json!({
            "removeMode": remove_mode,
            "allowOnExtManagedVol": allow_ext_managed,
            "volumeClass": volume_class.unwrap_or(VolumeClass::Default),
        }));
        self.entity.delete_entity(volume_id, Some(&params)).await
    }

    /// Map a volume to an SDC, identified by exactly one of id or guid
    pub async fn add_mapped_sdc(
        &self,
        volume_id: &str,
        sdc_id: Option<&str>,
        sdc_guid: Option<&str>,
        allow_multiple_mappings: Option<bool>,
        allow_ext_managed: Option<bool>,
        access_mode: Option<&str>,
        volume_class: Option<VolumeClass>,
    ) -> PowerFlexResult<Value> {
        if sdc_id.is_some() == sdc_guid.is_some() {
            return Err(PowerFlexError::invalid_input(
                "Either sdc_id or sdc_guid must be set.",
            ));
        }
        info!("Mapping volume {} to SDC", volume_id);
        let params = params(json!({
            "sdcId": sdc_id,
            "guid": sdc_guid,
            "allowMultipleMappings": allow_multiple_mappings,
            "allowOnExtManagedVol": allow_ext_managed,
            "accessMode": access_mode,
            "volumeClass": volume_class.unwrap_or(VolumeClass::Default),
        }));
        self.entity
            .post_action_and_get(volume_id, "addMappedSdc", Some(&params), "map to SDC")
            .await
    }

    /// Unmap a volume from one SDC (by id or guid) or from all SDCs
    pub async fn remove_mapped_sdc(
        &self,
        volume_id: &str,
        sdc_id: Option<&str>,
        sdc_guid: Option<&str>,
        all_sdcs: Option<bool>,
        skip_appliance_validation: Option<bool>,
        allow_ext_managed: Option<bool>,
        volume_class: Option<VolumeClass>,
    ) -> PowerFlexResult<Value> {
        let selected = [sdc_id.is_some(), sdc_guid.is_some(), all_sdcs.unwrap_or(false)];
        if selected.iter().filter(|set| **set).count() != 1 {
            return Err(PowerFlexError::invalid_input(
                "Either sdc_id or sdc_guid or all_sdcs must be set.",
            ));
        }
        info!("Unmapping volume {} from SDC", volume_id);
        let params = params(json!({
            "sdcId": sdc_id,
            "guid": sdc_guid,
            "allSdcs": all_sdcs,
            "skipApplianceValidation": skip_appliance_validation,
            "allowOnExtManagedVol": allow_ext_managed,
            "volumeClass": volume_class.unwrap_or(VolumeClass::Default),
        }));
        self.entity
            .post_action_and_get(volume_id, "removeMappedSdc", Some(&params), "unmap from SDC")
            .await
    }

    /// Extend a volume to `size_in_gb`
    pub async fn extend(
        &self,
        volume_id: &str,
        size_in_gb: u64,
        allow_ext_managed: Option<bool>,
        volume_class: Option<VolumeClass>,
    ) -> PowerFlexResult<Value> {
        info!("Extending volume {} to {} GB", volume_id, size_in_gb);
        let params = params(json!({
            "sizeInGB": size_in_gb,
            "allowOnExtManagedVol": allow_ext_managed,
            "volumeClass": volume_class.unwrap_or(VolumeClass::Default),
        }));
        self.entity
            .post_action_and_get(volume_id, "setVolumeSize", Some(&params), "extend")
            .await
    }

    pub async fn rename(
        &self,
        volume_id: &str,
        name: &str,
        allow_ext_managed: Option<bool>,
        volume_class: Option<VolumeClass>,
    ) -> PowerFlexResult<Value> {
        let params = params(json!({
            "newName": name,
            "allowOnExtManagedVol": allow_ext_managed,
            "volumeClass": volume_class.unwrap_or(VolumeClass::Default),
        }));
        self.entity
            .rename_entity("setVolumeName", volume_id, &params)
            .await
    }

    pub async fn lock_auto_snapshot(&self, volume_id: &str) -> PowerFlexResult<Value> {
        self.entity
            .post_action_and_get(volume_id, "lockAutoSnapshot", None, "lock AutoSnapshot for")
            .await
    }

    pub async fn unlock_auto_snapshot(
        &self,
        volume_id: &str,
        remove_auto_snapshot: Option<bool>,
    ) -> PowerFlexResult<Value> {
        let params = params(json!({ "autoSnapshotWillBeRemoved": remove_auto_snapshot }));
        self.entity
            .post_action_and_get(
                volume_id,
                "unlockAutoSnapshot",
                Some(&params),
                "unlock AutoSnapshot for",
            )
            .await
    }

    /// Set bandwidth and IOPS limits of a mapped SDC
    pub async fn set_mapped_sdc_limits(
        &self,
        volume_id: &str,
        sdc_id: &str,
        bandwidth_limit: Option<u64>,
        iops_limit: Option<u64>,
    ) -> PowerFlexResult<Value> {
        let params = params(json!({
            "sdcId": sdc_id,
            "bandwidthLimitInKbps": bandwidth_limit,
            "iopsLimit": iops_limit,
        }));
        self.entity
            .post_action_and_get(
                volume_id,
                "setMappedSdcLimits",
                Some(&params),
                "update the SDC limits of",
            )
            .await
    }

    /// Only relevant for volumes with a space efficient data layout
    pub async fn set_compression_method(
        &self,
        volume_id: &str,
        compression_method: CompressionMethod,
    ) -> PowerFlexResult<Value> {
        let params = params(json!({ "compressionMethod": compression_method }));
        self.entity
            .post_action_and_get(
                volume_id,
                "modifyCompressionMethod",
                Some(&params),
                "update the compression method of",
            )
            .await
    }

    pub async fn set_use_rmcache(&self, volume_id: &str, use_rmcache: bool) -> PowerFlexResult<Value> {
        let params = params(json!({ "useRmcache": use_rmcache }));
        self.entity
            .post_action_and_get(
                volume_id,
                "setVolumeUseRmcache",
                Some(&params),
                "update the use_rmcache of",
            )
            .await
    }

    /// Set the access mode of one mapped SDC
    pub async fn set_access_mode_for_sdc(
        &self,
        volume_id: &str,
        sdc_id: &str,
        access_mode: &str,
    ) -> PowerFlexResult<Value> {
        let params = params(json!({ "accessMode": access_mode, "sdcId": sdc_id }));
        self.entity
            .post_action_and_get(
                volume_id,
                "setVolumeMappingAccessMode",
                Some(&params),
                "set the access mode for the SDC mapped to",
            )
            .await
    }

    /// Set the retention period of a secure snapshot; it can be delayed but
    /// not advanced
    pub async fn set_retention_period(
        &self,
        snap_id: &str,
        retention_period_in_min: u32,
    ) -> PowerFlexResult<Value> {
        let params = params(json!({ "retentionPeriodInMin": retention_period_in_min }));
        self.entity
            .post_action_and_get(
                snap_id,
                "setSnapshotSecurity",
                Some(&params),
                "set the retention period for",
            )
            .await
    }

    /// `access_mode_limit` is `ReadWrite` or `ReadOnly`
    pub async fn set_volume_access_mode_limit(
        &self,
        volume_id: &str,
        access_mode_limit: &str,
    ) -> PowerFlexResult<Value> {
        let params = params(json!({ "accessModeLimit": access_mode_limit }));
        self.entity
            .post_action_and_get(
                volume_id,
                "setVolumeAccessModeLimit",
                Some(&params),
                "update the Volume Access Mode Limit of",
            )
            .await
    }

    pub async fn get_statistics(
        &self,
        volume_id: &str,
        fields: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        self.entity.get_statistics(volume_id, fields).await
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
