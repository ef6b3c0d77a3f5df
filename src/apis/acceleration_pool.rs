use crate::{
    client::PowerFlexClient,
    entity::EntityRequest,
    error::{PowerFlexError, PowerFlexResult},
    models::AccelerationPoolMediaType,
    utils::{params, Params},
};
use log::info;
use serde_json::{json, Value};

/// Acceleration pool API operations
pub struct AccelerationPoolApi<'a> {
    entity: EntityRequest<'a>,
}

impl<'a> AccelerationPoolApi<'a> {
    pub fn new(client: &'a PowerFlexClient) -> Self {
        Self {
            entity: EntityRequest::new(client, "AccelerationPool"),
        }
    }

    pub async fn get(
        &self,
        acceleration_pool_id: Option<&str>,
        filter_fields: Option<&Params>,
        fields: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        self.entity.get(acceleration_pool_id, filter_fields, fields).await
    }

    /// Create an acceleration pool; SSD pools require `is_rfcache`
    pub async fn create(
        &self,
        media_type: AccelerationPoolMediaType,
        protection_domain_id: &str,
        name: Option<&str>,
        is_rfcache: Option<bool>,
    ) -> PowerFlexResult<Value> {
        if media_type == AccelerationPoolMediaType::Ssd && !is_rfcache.unwrap_or(false) {
            return Err(PowerFlexError::invalid_input(
                "isRfcache must be set for media_type SSD.",
            ));
        }
        info!(
            "Creating acceleration pool in protection domain {}",
            protection_domain_id
        );
        let params = params(json!({
            "mediaType": media_type,
            "protectionDomainId": protection_domain_id,
            "name": name,
            "isRfcache": is_rfcache,
        }));
        self.entity.create_entity(&params).await
    }

    pub async fn delete(&self, acceleration_pool_id: &str) -> PowerFlexResult<()> {
        self.entity.delete_entity(acceleration_pool_id, None).await
    }
}
