use crate::{
    client::PowerFlexClient,
    entity::EntityRequest,
    error::{PowerFlexError, PowerFlexResult},
    models::{SdtIp, SdtIpRole},
    utils::{params, Params},
};
use log::info;
use serde_json::{json, Value};

/// NVMe target (SDT) API operations
pub struct SdtApi<'a> {
    entity: EntityRequest<'a>,
}

impl<'a> SdtApi<'a> {
    pub fn new(client: &'a PowerFlexClient) -> Self {
        Self {
            entity: EntityRequest::new(client, "Sdt"),
        }
    }

    pub async fn get(
        &self,
        sdt_id: Option<&str>,
        filter_fields: Option<&Params>,
        fields: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        self.entity.get(sdt_id, filter_fields, fields).await
    }

    /// Create an NVMe target in a protection domain
    pub async fn create(
        &self,
        sdt_ips: &[SdtIp],
        name: &str,
        protection_domain_id: &str,
        storage_port: Option<u16>,
        nvme_port: Option<u16>,
        discovery_port: Option<u16>,
    ) -> PowerFlexResult<Value> {
        if sdt_ips.is_empty() {
            return Err(PowerFlexError::invalid_input(
                "At least one ip is required for creating an NVMe target.",
            ));
        }
        info!("Creating NVMe target {} with {} ips", name, sdt_ips.len());
        let params = params(json!({
            "ips": sdt_ips,
            "storagePort": storage_port,
            "nvmePort": nvme_port,
            "discoveryPort": discovery_port,
            "name": name,
            "protectionDomainId": protection_domain_id,
        }));
        self.entity.create_entity(&params).await
    }

    pub async fn rename(&self, sdt_id: &str, name: &str) -> PowerFlexResult<Value> {
        let params = params(json!({ "newName": name }));
        self.entity.rename_entity("renameSdt", sdt_id, &params).await
    }

    pub async fn add_ip(&self, sdt_id: &str, ip: &str, role: SdtIpRole) -> PowerFlexResult<Value> {
        let params = params(json!({ "ip": ip, "role": role }));
        self.entity
            .post_action_and_get(sdt_id, "addIp", Some(&params), "add IP for")
            .await
    }

    pub async fn remove_ip(&self, sdt_id: &str, ip: &str) -> PowerFlexResult<Value> {
        let params = params(json!({ "ip": ip }));
        self.entity
            .post_action_and_get(sdt_id, "removeIp", Some(&params), "remove IP from")
            .await
    }

    pub async fn set_ip_role(&self, sdt_id: &str, ip: &str, role: SdtIpRole) -> PowerFlexResult<Value> {
        let params = params(json!({ "ip": ip, "newRole": role }));
        self.entity
            .post_action_and_get(sdt_id, "modifyIpRole", Some(&params), "set ip role for")
            .await
    }

    pub async fn set_storage_port(&self, sdt_id: &str, storage_port: u16) -> PowerFlexResult<Value> {
        let params = params(json!({ "newStoragePort": storage_port }));
        self.entity
            .post_action_and_get(sdt_id, "modifyStoragePort", Some(&params), "set storage port for")
            .await
    }

    pub async fn set_nvme_port(&self, sdt_id: &str, nvme_port: u16) -> PowerFlexResult<Value> {
        let params = params(json!({ "newNvmePort": nvme_port }));
        self.entity
            .post_action_and_get(sdt_id, "modifyNvmePort", Some(&params), "set nvme port for")
            .await
    }

    pub async fn set_discovery_port(
        &self,
        sdt_id: &str,
        discovery_port: u16,
    ) -> PowerFlexResult<Value> {
        let params = params(json!({ "newDiscoveryPort": discovery_port }));
        self.entity
            .post_action_and_get(
                sdt_id,
                "modifyDiscoveryPort",
                Some(&params),
                "set discovery port for",
            )
            .await
    }

    pub async fn enter_maintenance_mode(&self, sdt_id: &str) -> PowerFlexResult<Value> {
        info!("NVMe target {} entering maintenance mode", sdt_id);
        self.entity
            .post_action_and_get(
                sdt_id,
                "enterMaintenanceMode",
                None,
                "enter maintenance mode for",
            )
            .await
    }

    pub async fn exit_maintenance_mode(&self, sdt_id: &str) -> PowerFlexResult<Value> {
        info!("NVMe target {} exiting maintenance mode", sdt_id);
        self.entity
            .post_action_and_get(sdt_id, "exitMaintenanceMode", None, "exit maintenance mode for")
            .await
    }

    pub async fn delete(&self, sdt_id: &str, force: Option<bool>) -> PowerFlexResult<()> {
        let params = params(json!({ "force": force }));
        self.entity.delete_entity(sdt_id, Some(&params)).await
    }
}
