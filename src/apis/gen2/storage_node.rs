use crate::{
    client::PowerFlexClient,
    entity::EntityRequest,
    error::PowerFlexResult,
    models::{StorageNodeIp, StorageNodeIpRole},
    utils::{params, to_params, Params},
};
use log::info;
use serde_json::{json, Value};

/// Storage node API operations; the gateway type is `Node`
pub struct StorageNodeApi<'a> {
    entity: EntityRequest<'a>,
}

impl<'a> StorageNodeApi<'a> {
    pub fn new(client: &'a PowerFlexClient) -> Self {
        Self {
            entity: EntityRequest::new(client, "Node"),
        }
    }

    pub async fn get(
        &self,
        node_id: Option<&str>,
        filter_fields: Option<&Params>,
        fields: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        self.entity.get(node_id, filter_fields, fields).await
    }

    pub async fn create(
        &self,
        name: &str,
        node_ips: &[StorageNodeIp],
        protection_domain_id: &str,
    ) -> PowerFlexResult<Value> {
        info!("Creating storage node {} with {} ips", name, node_ips.len());
        let params = params(json!({
            "protectionDomainId": protection_domain_id,
            "ips": node_ips,
            "name": name,
        }));
        self.entity.create_entity(&params).await
    }

    pub async fn delete(&self, node_id: &str) -> PowerFlexResult<()> {
        self.entity.delete_entity(node_id, None).await
    }

    pub async fn rename(&self, node_id: &str, name: &str) -> PowerFlexResult<Value> {
        let params = params(json!({ "name": name }));
        self.entity
            .rename_entity("renameStorageNode", node_id, &params)
            .await
    }

    pub async fn add_ip(&self, node_id: &str, node_ip: &StorageNodeIp) -> PowerFlexResult<Value> {
        self.entity
            .post_action_and_get(node_id, "addIp", Some(&to_params(node_ip)?), "add IP to")
            .await
    }

    pub async fn remove_ip(&self, node_id: &str, ip: &str) -> PowerFlexResult<Value> {
        let params = params(json!({ "ip": ip }));
        self.entity
            .post_action_and_get(node_id, "removeIp", Some(&params), "remove IP from")
            .await
    }

    pub async fn set_ip_role(
        &self,
        node_id: &str,
        ip: &str,
        role: StorageNodeIpRole,
    ) -> PowerFlexResult<Value> {
        let params = params(json!({ "ip": ip, "newRole": role }));
        self.entity
            .post_action_and_get(node_id, "modifyIpRole", Some(&params), "set ip role for")
            .await
    }

    /// Refresh the original pathnames of the node's devices
    pub async fn update_original_pathnames(
        &self,
        node_id: &str,
        force: Option<bool>,
    ) -> PowerFlexResult<Value> {
        let params = params(json!({ "forceFailedDevices": force }));
        self.entity
            .post_action_and_get(
                node_id,
                "updateNodeOriginalPathnames",
                Some(&params),
                "update original pathnames of",
            )
            .await
    }
}
