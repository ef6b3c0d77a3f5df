use crate::{
    client::PowerFlexClient,
    entity::EntityRequest,
    error::{PowerFlexError, PowerFlexResult},
    models::{DeviceCreateRequest, DeviceMediaType},
    utils::{params, to_params, Params},
};
use log::info;
use serde_json::{json, Value};

/// Device API operations (pre-5.0)
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

    /// Add a device to an SDS.
    ///
    /// Exactly one of `storage_pool_id` and `acceleration_pool_id` must be set.
    pub async fn create(&self, request: &DeviceCreateRequest) -> PowerFlexResult<Value> {
        if request.storage_pool_id.is_some() == request.acceleration_pool_id.is_some() {
            return Err(PowerFlexError::invalid_input(
                "Either storage_pool_id or acceleration_pool_id must be set.",
            ));
        }
        info!(
            "Adding device {} to SDS {}",
            request.current_pathname, request.sds_id
        );
        self.entity.create_entity(&to_params(request)?).await
    }

    /// Remove a device, sent as `removeDevice` with `forceRemove`
    pub async fn delete(&self, device_id: &str, force: Option<bool>) -> PowerFlexResult<()> {
        let params = params(json!({ "forceRemove": force }));
        self.entity.delete_entity(device_id, Some(&params)).await
    }

    pub async fn rename(&self, device_id: &str, name: &str) -> PowerFlexResult<Value> {
        let params = params(json!({ "newName": name }));
        self.entity
            .rename_entity("setDeviceName", device_id, &params)
            .await
    }

    pub async fn set_media_type(
        &self,
        device_id: &str,
        media_type: DeviceMediaType,
    ) -> PowerFlexResult<Value> {
        let params = params(json!({ "mediaType": media_type }));
        self.entity
            .post_action_and_get(device_id, "setMediaType", Some(&params), "set media type for")
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
