use crate::{
    client::PowerFlexClient,
    entity::EntityRequest,
    error::{PowerFlexError, PowerFlexResult},
    utils::{params, Params},
};
use log::info;
use serde_json::{json, Value};

/// NVMe host API operations, shared by every gateway version
pub struct HostApi<'a> {
    entity: EntityRequest<'a>,
}

impl<'a> HostApi<'a> {
    pub fn new(client: &'a PowerFlexClient) -> Self {
        Self {
            entity: EntityRequest::new(client, "Host"),
        }
    }

    pub async fn get(
        &self,
        host_id: Option<&str>,
        filter_fields: Option<&Params>,
        fields: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        self.entity.get(host_id, filter_fields, fields).await
    }

    /// Register an NVMe host by its NQN
    ///
    /// # Arguments
    /// * `nqn` - NQN of the host
    /// * `name` - Host name
    /// * `max_num_paths` - Maximum number of paths per volume
    /// * `max_num_sys_ports` - Maximum number of ports per protection domain
    pub async fn create(
        &self,
        nqn: &str,
        name: Option<&str>,
        max_num_paths: Option<u32>,
        max_num_sys_ports: Option<u32>,
    ) -> PowerFlexResult<Value> {
        if nqn.is_empty() {
            return Err(PowerFlexError::invalid_input("nqn is required for creating a host."));
        }
        info!("Creating NVMe host {}", nqn);
        let params = params(json!({
            "nqn": nqn,
            "name": name,
            "maxNumPaths": max_num_paths,
            "maxNumSysPorts": max_num_sys_ports,
        }));
        self.entity.create_entity(&params).await
    }

    pub async fn modify_max_num_paths(
        &self,
        host_id: &str,
        max_num_paths: u32,
    ) -> PowerFlexResult<Value> {
        let params = params(json!({ "newMaxNumPaths": max_num_paths }));
        self.entity
            .perform_entity_operation_based_on_action(host_id, "modifyMaxNumPaths", Some(&params), false)
            .await
    }

    pub async fn modify_max_num_sys_ports(
        &self,
        host_id: &str,
        max_num_sys_ports: u32,
    ) -> PowerFlexResult<Value> {
        let params = params(json!({ "newMaxNumSysPorts": max_num_sys_ports }));
        self.entity
            .perform_entity_operation_based_on_action(
                host_id,
                "modifyMaxNumSysPorts",
                Some(&params),
                false,
            )
            .await
    }
}
