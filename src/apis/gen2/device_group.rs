use crate::{
    client::PowerFlexClient,
    entity::EntityRequest,
    error::{PowerFlexError, PowerFlexResult},
    models::DeviceGroupMediaType,
    utils::{params, Params},
};
use log::info;
use serde_json::{json, Value};

/// Device group API operations
pub struct DeviceGroupApi<'a> {
    entity: EntityRequest<'a>,
}

impl<'a> DeviceGroupApi<'a> {
    pub fn new(client: &'a PowerFlexClient) -> Self {
        Self {
            entity: EntityRequest::new(client, "DeviceGroup"),
        }
    }

    pub async fn get(
        &self,
        device_group_id: Option<&str>,
        filter_fields: Option<&Params>,
        fields: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        self.entity.get(device_group_id, filter_fields, fields).await
    }

    /// Create a new Device Group
    ///
    /// # Arguments
    /// * `name` - Device group name
    /// * `protection_domain_id` - Owning protection domain
    /// * `media_type` - SSD or PMEM
    /// * `spare_node_count` - Nodes reserved as spare
    /// * `spare_device_count` - Devices reserved as spare
    pub async fn create(
        &self,
        name: &str,
        protection_domain_id: &str,
        media_type: DeviceGroupMediaType,
        spare_node_count: Option<u32>,
        spare_device_count: Option<u32>,
    ) -> PowerFlexResult<Value> {
        if name.is_empty() || protection_domain_id.is_empty() {
            return Err(PowerFlexError::invalid_input(
                "name, protection_domain_id and media_type must be set.",
            ));
        }
        info!("Creating device group {} in protection domain {}", name, protection_domain_id);
        let params = params(json!({
            "dgName": name,
            "mediaType": media_type,
            "protectionDomainId": protection_domain_id,
            "spareNodeCount": spare_node_count,
            "spareDeviceCount": spare_device_count,
        }));
        self.entity.create_entity(&params).await
    }

    pub async fn delete(&self, device_group_id: &str) -> PowerFlexResult<()> {
        self.entity.delete_entity(device_group_id, None).await
    }

    /// Rename a device group or change its spare counts
    pub async fn modify(
        &self,
        device_group_id: &str,
        new_name: Option<&str>,
        spare_node_count: Option<u32>,
        spare_device_count: Option<u32>,
    ) -> PowerFlexResult<Value> {
        let params = params(json!({
            "newName": new_name,
            "spareNodeCount": spare_node_count,
            "spareDeviceCount": spare_device_count,
        }));
        self.entity
            .post_action_and_get(device_group_id, "modifyDeviceGroup", Some(&params), "modify")
            .await
    }

    pub async fn query_usable_capacity(&self, device_group_id: &str) -> PowerFlexResult<Value> {
        self.entity
            .post_action(
                device_group_id,
                "queryUsableCapacity",
                None,
                "query usable capacity of",
            )
            .await
    }

    pub async fn query_device_group_metrics(
        &self,
        device_group_id: &str,
        metrics: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        self.entity
            .query_metrics("device_group", Some(std::slice::from_ref(&device_group_id)), metrics)
            .await
    }
}
