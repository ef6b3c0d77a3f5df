use crate::{
    client::PowerFlexClient,
    entity::EntityRequest,
    error::PowerFlexResult,
    utils::{params, Params},
};
use serde_json::{json, Value};

/// Fault set API operations
pub struct FaultSetApi<'a> {
    entity: EntityRequest<'a>,
}

impl<'a> FaultSetApi<'a> {
    pub fn new(client: &'a PowerFlexClient) -> Self {
        Self {
            entity: EntityRequest::new(client, "FaultSet"),
        }
    }

    pub async fn get(
        &self,
        fault_set_id: Option<&str>,
        filter_fields: Option<&Params>,
        fields: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        self.entity.get(fault_set_id, filter_fields, fields).await
    }

    pub async fn create(
        &self,
        protection_domain_id: &str,
        name: Option<&str>,
    ) -> PowerFlexResult<Value> {
        let params = params(json!({
            "protectionDomainId": protection_domain_id,
            "name": name,
        }));
        self.entity.create_entity(&params).await
    }

    pub async fn delete(&self, fault_set_id: &str) -> PowerFlexResult<()> {
        self.entity.delete_entity(fault_set_id, None).await
    }

    pub async fn clear(&self, fault_set_id: &str) -> PowerFlexResult<Value> {
        self.entity
            .post_action_and_get(fault_set_id, "clearFaultSet", None, "clear")
            .await
    }

    pub async fn get_sdss(
        &self,
        fault_set_id: &str,
        filter_fields: Option<&Params>,
        fields: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        self.entity
            .get_related(fault_set_id, "Sds", filter_fields, fields)
            .await
    }

    pub async fn rename(&self, fault_set_id: &str, name: &str) -> PowerFlexResult<Value> {
        let params = params(json!({ "newName": name }));
        self.entity
            .rename_entity("setFaultSetName", fault_set_id, &params)
            .await
    }
}
