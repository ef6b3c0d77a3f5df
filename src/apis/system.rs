use crate::{
    client::PowerFlexClient,
    entity::{EntityRequest, BASE_OBJECT_URL, QUERY_MDM_CLUSTER_URL},
    error::{PowerFlexError, PowerFlexResult},
    models::{ClusterModeRequest, PerformanceProfile, SnapshotDef, StandbyMdmRequest},
    utils::{params, to_params, ApiVersion, Params},
};
use log::{error, info};
use serde_json::{json, Value};

/// System API operations
pub struct SystemApi<'a> {
    entity: EntityRequest<'a>,
}

impl<'a> SystemApi<'a> {
    pub fn new(client: &'a PowerFlexClient) -> Self {
        Self {
            entity: EntityRequest::new(client, "System"),
        }
    }

    fn client(&self) -> &'a PowerFlexClient {
        self.entity.client()
    }

    /// Get the gateway API version.
    ///
    /// The version is cached per client; pass `cached = false` to query the
    /// gateway again.
    pub async fn api_version(&self, cached: bool) -> PowerFlexResult<ApiVersion> {
        if cached {
            let cache = self
                .client()
                .api_version_cache
                .read()
                .unwrap_or_else(|e| e.into_inner());
            if let Some(version) = cache.as_ref() {
                return Ok(version.clone());
            }
        }

        let response = self.client().send_get_request("/version", &[]).await?;
        if !response.is_ok() {
            let err = PowerFlexError::fail_querying("API version", None, response.body);
            error!("{}", err);
            return Err(err);
        }

        let raw = match response.into_body() {
            Value::String(version) => version,
            Value::Number(version) => version.to_string(),
            other => other.to_string(),
        };
        let version = ApiVersion::parse(&raw).inspect_err(|e| error!("{}", e))?;

        *self
            .client()
            .api_version_cache
            .write()
            .unwrap_or_else(|e| e.into_inner()) = Some(version.clone());
        Ok(version)
    }

    /// Get System entities
    pub async fn get(
        &self,
        system_id: Option<&str>,
        filter_fields: Option<&Params>,
        fields: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        self.entity.get(system_id, filter_fields, fields).await
    }

    /// Remove the snapshots of a consistency group
    ///
    /// # Arguments
    /// * `system_id` - System id
    /// * `cg_id` - Snapshot group id
    /// * `allow_ext_managed` - Allow on externally managed volumes
    pub async fn remove_cg_snapshots(
        &self,
        system_id: &str,
        cg_id: &str,
        allow_ext_managed: Option<bool>,
    ) -> PowerFlexResult<Value> {
        let params = params(json!({
            "snapGroupId": cg_id,
            "allowOnExtManagedVol": allow_ext_managed,
        }));
        self.entity
            .post_action(
                system_id,
                "removeConsistencyGroupSnapshots",
                Some(&params),
                "remove consistency group snapshots from",
            )
            .await
    }

    /// Snapshot volumes (pre-5.0)
    ///
    /// # Arguments
    /// * `system_id` - System id
    /// * `snapshot_defs` - Volumes to snapshot
    /// * `access_mode` - Access mode limit of the snapshots
    /// * `retention_period` - Retention in minutes
    /// * `allow_ext_managed` - Allow on externally managed volumes
    pub async fn snapshot_volumes(
        &self,
        system_id: &str,
        snapshot_defs: &[SnapshotDef],
        access_mode: Option<&str>,
        retention_period: Option<u32>,
        allow_ext_managed: Option<bool>,
    ) -> PowerFlexResult<Value> {
        info!("Snapshotting {} volumes on system {}", snapshot_defs.len(), system_id);
        let params = params(json!({
            "snapshotDefs": snapshot_defs,
            "allowOnExtManagedVol": allow_ext_managed,
            "accessModeLimit": access_mode,
            "retentionPeriodInMin": retention_period,
        }));
        self.entity
            .post_action(system_id, "snapshotVolumes", Some(&params), "snapshot volumes on")
            .await
    }

    /// Create snapshots (5.0+)
    pub async fn create_snapshot(
        &self,
        system_id: &str,
        snapshot_defs: &[SnapshotDef],
        retention_period: Option<u32>,
    ) -> PowerFlexResult<Value> {
        let params = params(json!({
            "snapshotDefs": snapshot_defs,
            "retentionPeriodInMin": retention_period,
        }));
        self.entity
            .post_action(system_id, "createSnapshot", Some(&params), "create snapshot on")
            .await
    }

    /// Create thin clones (5.0+)
    pub async fn create_thin_clone(
        &self,
        system_id: &str,
        snapshot_defs: &[SnapshotDef],
    ) -> PowerFlexResult<Value> {
        let params = params(json!({ "snapshotDefs": snapshot_defs }));
        self.entity
            .post_action(system_id, "createThinClone", Some(&params), "create thin clone on")
            .await
    }

    /// Add a standby MDM to the cluster
    pub async fn add_standby_mdm(&self, request: &StandbyMdmRequest) -> PowerFlexResult<Value> {
        info!("Adding standby MDM {:?}", request.mdm_ips);
        self.entity
            .post_object_action("addStandbyMdm", Some(&to_params(request)?), "add standBy MDM")
            .await
    }

    /// Remove a standby MDM.
    ///
    /// A failure status without a body is treated as success.
    pub async fn remove_standby_mdm(&self, mdm_id: &str) -> PowerFlexResult<bool> {
        info!("Removing standby MDM {}", mdm_id);
        let params = params(json!({ "id": mdm_id }));
        self.mdm_cluster_action("removeStandbyMdm", &params, "remove standBy MDM from")
            .await
    }

    /// Switch the MDM cluster mode.
    ///
    /// A failure status without a body is treated as success.
    pub async fn switch_cluster_mode(&self, request: &ClusterModeRequest) -> PowerFlexResult<bool> {
        info!("Switching MDM cluster mode to {}", request.mode);
        self.mdm_cluster_action(
            "switchClusterMode",
            &to_params(request)?,
            "switch MDM cluster mode",
        )
        .await
    }

    async fn mdm_cluster_action(
        &self,
        action: &str,
        params: &Params,
        what: &str,
    ) -> PowerFlexResult<bool> {
        let response = self
            .client()
            .send_mdm_cluster_post_request(
                BASE_OBJECT_URL,
                Some(params),
                &[("entity", self.entity.entity()), ("action", action)],
            )
            .await?;
        if !response.is_ok() && response.body.is_some() {
            let err = PowerFlexError::client(
                format!("Failed to {} PowerFlex {}.", what, self.entity.entity()),
                response.body,
            );
            error!("{}", err);
            return Err(err);
        }
        Ok(true)
    }

    /// Get the MDM cluster details
    pub async fn get_mdm_cluster_details(&self) -> PowerFlexResult<Value> {
        let response = self
            .client()
            .send_post_request(QUERY_MDM_CLUSTER_URL, None, &[("entity", self.entity.entity())])
            .await?;
        if !response.is_ok() {
            let err = PowerFlexError::client(
                format!(
                    "Failed to get MDM cluster details on PowerFlex {}.",
                    self.entity.entity()
                ),
                response.body,
            );
            error!("{}", err);
            return Err(err);
        }
        Ok(response.into_body())
    }

    /// Get the gateway configuration details
    pub async fn get_gateway_configuration_details(&self) -> PowerFlexResult<Value> {
        let response = self.client().send_get_request("/Configuration", &[]).await?;
        if !response.is_ok() {
            let err = PowerFlexError::client(
                format!(
                    "Failed to get gateway configuration details on PowerFlex {}.",
                    self.entity.entity()
                ),
                response.body,
            );
            error!("{}", err);
            return Err(err);
        }
        Ok(response.into_body())
    }

    /// Move MDM cluster ownership to another MDM
    pub async fn change_mdm_ownership(&self, mdm_id: &str) -> PowerFlexResult<()> {
        let params = params(json!({ "id": mdm_id }));
        self.entity
            .post_object_action("changeMdmOwnership", Some(&params), "change ownership")
            .await?;
        Ok(())
    }

    pub async fn set_cluster_mdm_performance_profile(
        &self,
        performance_profile: PerformanceProfile,
    ) -> PowerFlexResult<Value> {
        let params = params(json!({ "perfProfile": performance_profile }));
        self.entity
            .post_object_action(
                "setMdmPerformanceParameters",
                Some(&params),
                "set performance profile of MDMs",
            )
            .await
    }

    pub async fn rename_mdm(&self, mdm_id: &str, mdm_new_name: &str) -> PowerFlexResult<Value> {
        let params = params(json!({ "id": mdm_id, "newName": mdm_new_name }));
        self.entity
            .post_object_action("renameMdm", Some(&params), "rename the MDM")
            .await
    }

    /// Set the virtual ip interfaces of an MDM, or clear them
    ///
    /// # Arguments
    /// * `mdm_id` - MDM id
    /// * `virtual_ip_interfaces` - Interfaces to set; takes precedence over `clear_interfaces`
    /// * `clear_interfaces` - Clear all interfaces
    pub async fn modify_virtual_ip_interface(
        &self,
        mdm_id: &str,
        virtual_ip_interfaces: Option<&[&str]>,
        clear_interfaces: Option<bool>,
    ) -> PowerFlexResult<Value> {
        let params = match virtual_ip_interfaces {
            Some(interfaces) => params(json!({ "id": mdm_id, "virtIpIntfs": interfaces })),
            None => params(json!({ "id": mdm_id, "clear": clear_interfaces })),
        };
        self.entity
            .post_object_action(
                "modifyVirtualIpInterfaces",
                Some(&params),
                "modify virtual IP interface",
            )
            .await
    }

    /// Query system statistics
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
