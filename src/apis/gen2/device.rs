use crate::{
    client::PowerFlexClient,
    entity::EntityRequest,
    error::{PowerFlexError, PowerFlexResult},
    models::Gen2DeviceCreateRequest,
    utils::{params, to_params, Params},
};
use log::info;
use serde_json::{json, Value};

/// Device API operations (5.0+)
pub struct DeviceApi<'a> {
    entity: EntityRequest<'a>,
}

impl<'a> DeviceApi<'a> {
    pub fn new(client: &'a PowerFlexClient) -> Self {
        Self {
            entity: EntityRequest::new(client, "Device"),
        }
    }

    pub async fn get(
        &self,
        device_id: Option<&str>,
        filter_fields: Option<&Params>,
        fields: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        self.entity.get(device_id, filter_fields, fields).await
    }

    /// Add a device to a storage node and device group
    pub async fn create(&self, request: &Gen2DeviceCreateRequest) -> PowerFlexResult<Value> {
        if request.current_pathname.is_empty()
            || request.device_group_id.is_empty()
            || request.node_id.is_empty()
        {
            return Err(PowerFlexError::invalid_input(
                "current_pathname, media_type, device_group_id and node_id must be set.",
            ));
        }
        info!(
            "Adding device {} on node {} to device group {}",
            request.current_pathname, request.node_id, request.device_group_id
        );
        self.entity.create_entity(&to_params(request)?).await
    }

    pub async fn delete(&self, device_id: &str) -> PowerFlexResult<()> {
        self.entity.delete_entity(device_id, None).await
    }

    pub async fn rename(&self, device_id: &str, name: &str) -> PowerFlexResult<Value> {
        let params = params(json!({ "newName": name }));
        self.entity
            .rename_entity("setDeviceName", device_id, &params)
            .await
    }

    pub async fn set_capacity_limit(
        &self,
        device_id: &str,
        capacity_limit_gb: u64,
    ) -> PowerFlexResult<Value> {
        let params = params(json!({ "capacityLimitInGB": capacity_limit_gb }));
        self.entity
            .post_action_and_get(
                device_id,
                "setDeviceCapacityLimit",
                Some(&params),
                "set capacity limit for",
            )
            .await
    }

    pub async fn clear_errors(&self, device_id: &str, force: Option<bool>) -> PowerFlexResult<Value> {
        let params = params(json!({ "forceClear": force }));
        self.entity
            .perform_entity_operation_based_on_action(device_id, "clearDeviceError", Some(&params), false)
            .await
    }

    /// Activate a device on the given storage node
    pub async fn activate(&self, device_id: &str, node_id: &str) -> PowerFlexResult<Value> {
        let params = params(json!({ "storageNodeId": node_id }));
        self.entity
            .perform_entity_operation_based_on_action(device_id, "activateDevice", Some(&params), false)
            .await
    }

    pub async fn query_device_metrics(
        &self,
        device_id: &str,
        metrics: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        self.entity
            .query_metrics("device", Some(std::slice::from_ref(&device_id)), metrics)
            .await
    }
}
