use crate::{
    client::PowerFlexClient,
    entity::EntityRequest,
    error::PowerFlexResult,
    models::{RemoveMode, VolumeClass, VolumeType},
    utils::{params, Params},
};
use log::info;
use serde_json::{json, Value};

/// Host a volume is mapped to or unmapped from
#[derive(Debug, Clone, Copy)]
pub enum HostRef<'h> {
    Id(&'h str),
    Guid(&'h str),
    Nqn(&'h str),
}

impl HostRef<'_> {
    fn insert_into(self, params: &mut Params) {
        let (key, value) = match self {
            HostRef::Id(id) => ("hostId", id),
            HostRef::Guid(guid) => ("guid", guid),
            HostRef::Nqn(nqn) => ("nqn", nqn),
        };
        params.insert(key.to_string(), json!(value));
    }
}

/// Volume API operations (5.0+)
pub struct VolumeApi<'a> {
    entity: EntityRequest<'a>,
}

impl<'a> VolumeApi<'a> {
    pub fn new(client: &'a PowerFlexClient) -> Self {
        Self {
            entity: EntityRequest::new(client, "Volume"),
        }
    }

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
    /// * `storage_pool_id` - Storage pool id
    /// * `size_in_gb` - Volume size
    /// * `name` - Volume name
    /// * `volume_type` - Thick or thin provisioning
    /// * `use_rmcache` - Use read RAM cache
    /// * `volume_class` - Volume class; the gateway default applies when unset
    pub async fn create(
        &self,
        storage_pool_id: &str,
        size_in_gb: u64,
        name: Option<&str>,
        volume_type: Option<VolumeType>,
        use_rmcache: Option<bool>,
        volume_class: Option<VolumeClass>,
    ) -> PowerFlexResult<Value> {
        info!("Creating {} GB volume in storage pool {}", size_in_gb, storage_pool_id);
        let params = params(json!({
            "storagePoolId": storage_pool_id,
            "volumeSizeInGb": size_in_gb,
            "name": name,
            "volumeType": volume_type,
            "useRmcache": use_rmcache,
            "volumeClass": volume_class,
        }));
        self.entity.create_entity(&params).await
    }

    pub async fn delete(
        &self,
        volume_id: &str,
        remove_mode: RemoveMode,
        volume_class: Option<VolumeClass>,
    ) -> PowerFlexResult<()> {
        let params = params(json!({
            "removeMode": remove_mode,
            "volumeClass": volume_class,
        }));
        self.entity.delete_entity(volume_id, Some(&params)).await
    }

    async fn act(
        &self,
        volume_id: &str,
        action: &str,
        params: &Params,
        what: &str,
    ) -> PowerFlexResult<()> {
        self.entity
            .post_action(volume_id, action, Some(params), what)
            .await?;
        Ok(())
    }

    /// Map a volume to a host
    pub async fn add_mapped_host(
        &self,
        volume_id: &str,
        host: HostRef<'_>,
        allow_multiple_mappings: Option<bool>,
        access_mode: Option<&str>,
        volume_class: Option<VolumeClass>,
    ) -> PowerFlexResult<()> {
        info!("Mapping volume {} to host {:?}", volume_id, host);
        let mut params = params(json!({
            "allowMultipleMappings": allow_multiple_mappings,
            "accessMode": access_mode,
            "volumeClass": volume_class,
        }));
        host.insert_into(&mut params);
        self.act(volume_id, "addMappedHost", &params, "map to host")
            .await
    }

    /// Unmap a volume from one host, or from all hosts when `host` is `None`
    pub async fn remove_mapped_host(
        &self,
        volume_id: &str,
        host: Option<HostRef<'_>>,
        volume_class: Option<VolumeClass>,
    ) -> PowerFlexResult<()> {
        info!("Unmapping volume {} from {:?}", volume_id, host);
        let mut params = params(json!({ "volumeClass": volume_class }));
        match host {
            Some(host) => host.insert_into(&mut params),
            None => {
                params.insert("allHosts".to_string(), json!(true));
            }
        }
        self.act(volume_id, "removeMappedHost", &params, "unmap from host")
            .await
    }

    pub async fn extend(
        &self,
        volume_id: &str,
        size_in_gb: u64,
        volume_class: Option<VolumeClass>,
    ) -> PowerFlexResult<()> {
        info!("Extending volume {} to {} GB", volume_id, size_in_gb);
        let params = params(json!({
            "sizeInGB": size_in_gb,
            "volumeClass": volume_class,
        }));
        self.act(volume_id, "setVolumeSize", &params, "extend").await
    }

    pub async fn rename(
        &self,
        volume_id: &str,
        name: &str,
        volume_class: Option<VolumeClass>,
    ) -> PowerFlexResult<Value> {
        let params = params(json!({
            "newName": name,
            "volumeClass": volume_class,
        }));
        self.entity
            .rename_entity("setVolumeName", volume_id, &params)
            .await
    }

    pub async fn set_mapped_sdc_limits(
        &self,
        volume_id: &str,
        sdc_id: &str,
        bandwidth_limit: Option<u64>,
        iops_limit: Option<u64>,
    ) -> PowerFlexResult<()> {
        let params = params(json!({
            "sdcId": sdc_id,
            "bandwidthLimitInKbps": bandwidth_limit,
            "iopsLimit": iops_limit,
        }));
        self.act(volume_id, "setMappedSdcLimits", &params, "update the SDC limits of")
            .await
    }

    pub async fn set_access_mode_for_sdc(
        &self,
        volume_id: &str,
        sdc_id: &str,
        access_mode: &str,
    ) -> PowerFlexResult<()> {
        let params = params(json!({ "accessMode": access_mode, "sdcId": sdc_id }));
        self.act(
            volume_id,
            "setVolumeMappingAccessMode",
            &params,
            "set the access mode for the SDC mapped to",
        )
        .await
    }

    pub async fn set_retention_period(
        &self,
        snap_id: &str,
        retention_period_in_min: u32,
    ) -> PowerFlexResult<()> {
        let params = params(json!({ "retentionPeriodInMin": retention_period_in_min }));
        self.act(snap_id, "setSnapshotSecurity", &params, "set the retention period for")
            .await
    }

    /// Refresh `dest_vol_id` from the content of `src_vol_id`
    pub async fn refresh(&self, dest_vol_id: &str, src_vol_id: &str) -> PowerFlexResult<()> {
        let params = params(json!({ "srcVolumeId": src_vol_id }));
        self.act(dest_vol_id, "refresh", &params, "refresh").await
    }

    /// Restore `dest_vol_id` from the snapshot `src_vol_id`
    pub async fn restore(&self, dest_vol_id: &str, src_vol_id: &str) -> PowerFlexResult<()> {
        let params = params(json!({ "srcVolumeId": src_vol_id }));
        self.act(dest_vol_id, "restore", &params, "restore").await
    }

    /// Volume metrics from the metrics service
    pub async fn get_statistics(
        &self,
        volume_id: &str,
        metrics: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        self.entity
            .query_metrics("volume", Some(std::slice::from_ref(&volume_id)), metrics)
            .await
    }
}
