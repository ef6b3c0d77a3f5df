use crate::{
    client::PowerFlexClient,
    entity::EntityRequest,
    error::PowerFlexResult,
    models::{PerformanceProfile, SdsCreateRequest, SdsIp, SdsIpRole},
    utils::{params, to_params, Params},
};
use log::info;
use serde_json::{json, Value};

/// SDS (storage data server) API operations
pub struct SdsApi<'a> {
    entity: EntityRequest<'a>,
}

impl<'a> SdsApi<'a> {
    pub fn new(client: &'a PowerFlexClient) -> Self {
        Self {
            entity: EntityRequest::new(client, "Sds"),
        }
    }

    pub async fn get(
        &self,
        sds_id: Option<&str>,
        filter_fields: Option<&Params>,
        fields: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        self.entity.get(sds_id, filter_fields, fields).await
    }

    /// Create a new SDS
    ///
    /// # Arguments
    /// * `request` - Protection domain, ip list and optional devices
    pub async fn create(&self, request: &SdsCreateRequest) -> PowerFlexResult<Value> {
        info!(
            "Creating SDS in protection domain {} with {} ips",
            request.protection_domain_id,
            request.sds_ip_list.len()
        );
        self.entity.create_entity(&to_params(request)?).await
    }

    pub async fn delete(&self, sds_id: &str, force: Option<bool>) -> PowerFlexResult<()> {
        let params = params(json!({ "force": force }));
        self.entity.delete_entity(sds_id, Some(&params)).await
    }

    pub async fn get_devices(
        &self,
        sds_id: &str,
        filter_fields: Option<&Params>,
        fields: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        self.entity
            .get_related(sds_id, "Device", filter_fields, fields)
            .await
    }

    pub async fn rename(&self, sds_id: &str, name: &str) -> PowerFlexResult<Value> {
        let params = params(json!({ "name": name }));
        self.entity.rename_entity("setSdsName", sds_id, &params).await
    }

    pub async fn add_ip(&self, sds_id: &str, sds_ip: &SdsIp) -> PowerFlexResult<Value> {
        info!("Adding ip {} to SDS {}", sds_ip.ip, sds_id);
        self.entity
            .post_action_and_get(sds_id, "addSdsIp", Some(&to_params(sds_ip)?), "add IP to")
            .await
    }

    pub async fn remove_ip(&self, sds_id: &str, ip: &str) -> PowerFlexResult<Value> {
        info!("Removing ip {} from SDS {}", ip, sds_id);
        let params = params(json!({ "ip": ip }));
        self.entity
            .post_action_and_get(sds_id, "removeSdsIp", Some(&params), "remove IP from")
            .await
    }

    /// Change the role of one SDS ip
    pub async fn set_ip_role(
        &self,
        sds_id: &str,
        ip: &str,
        role: SdsIpRole,
        force: Option<bool>,
    ) -> PowerFlexResult<Value> {
        let params = params(json!({
            "sdsIpToSet": ip,
            "newRole": role,
            "forceRoleModification": force,
        }));
        self.entity
            .post_action_and_get(sds_id, "setSdsIpRole", Some(&params), "set ip role for")
            .await
    }

    pub async fn set_port(&self, sds_id: &str, sds_port: u16) -> PowerFlexResult<Value> {
        let params = params(json!({ "sdsPort": sds_port }));
        self.entity
            .post_action_and_get(sds_id, "setSdsPort", Some(&params), "set port for")
            .await
    }

    pub async fn set_rfcache_enabled(
        &self,
        sds_id: &str,
        rfcache_enabled: bool,
    ) -> PowerFlexResult<Value> {
        let action = if rfcache_enabled { "enableRfcache" } else { "disableRfcache" };
        self.entity
            .post_action_and_get(sds_id, action, None, "enable/disable Rfcache for")
            .await
    }

    pub async fn set_rmcache_enabled(
        &self,
        sds_id: &str,
        rmcache_enabled: bool,
    ) -> PowerFlexResult<Value> {
        let params = params(json!({ "rmcacheEnabled": rmcache_enabled }));
        self.entity
            .post_action_and_get(
                sds_id,
                "setSdsRmcacheEnabled",
                Some(&params),
                "enable/disable Rmcache for",
            )
            .await
    }

    pub async fn set_rmcache_size(&self, sds_id: &str, rmcache_size_in_mb: u64) -> PowerFlexResult<Value> {
        let params = params(json!({ "rmcacheSizeInMB": rmcache_size_in_mb }));
        self.entity
            .post_action_and_get(
                sds_id,
                "setSdsRmcacheSize",
                Some(&params),
                "set Rmcache size for",
            )
            .await
    }

    pub async fn set_performance_parameters(
        &self,
        sds_id: &str,
        performance_profile: PerformanceProfile,
    ) -> PowerFlexResult<Value> {
        let params = params(json!({ "perfProfile": performance_profile }));
        self.entity
            .post_action_and_get(
                sds_id,
                "setSdsPerformanceParameters",
                Some(&params),
                "set performance parameters for",
            )
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
