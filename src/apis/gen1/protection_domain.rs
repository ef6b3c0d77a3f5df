use crate::{
    client::PowerFlexClient,
    entity::EntityRequest,
    error::PowerFlexResult,
    utils::{params, Params},
};
use log::info;
use serde_json::{json, Value};

/// Protection domain API operations (pre-5.0)
pub struct ProtectionDomainApi<'a> {
    entity: EntityRequest<'a>,
}

impl<'a> ProtectionDomainApi<'a> {
    pub fn new(client: &'a PowerFlexClient) -> Self {
        Self {
            entity: EntityRequest::new(client, "ProtectionDomain"),
        }
    }

    pub async fn get(
        &self,
        protection_domain_id: Option<&str>,
        filter_fields: Option<&Params>,
        fields: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        self.entity.get(protection_domain_id, filter_fields, fields).await
    }

    pub async fn create(&self, name: &str) -> PowerFlexResult<Value> {
        info!("Creating protection domain {}", name);
        self.entity.create_entity(&params(json!({ "name": name }))).await
    }

    pub async fn delete(&self, protection_domain_id: &str) -> PowerFlexResult<()> {
        self.entity.delete_entity(protection_domain_id, None).await
    }

    pub async fn activate(
        &self,
        protection_domain_id: &str,
        force: Option<bool>,
    ) -> PowerFlexResult<Value> {
        let params = params(json!({ "forceActivate": force }));
        self.entity
            .post_action_and_get(
                protection_domain_id,
                "activateProtectionDomain",
                Some(&params),
                "activate",
            )
            .await
    }

    pub async fn inactivate(
        &self,
        protection_domain_id: &str,
        force: Option<bool>,
    ) -> PowerFlexResult<Value> {
        let params = params(json!({ "forceShutdown": force }));
        self.entity
            .post_action_and_get(
                protection_domain_id,
                "inactivateProtectionDomain",
                Some(&params),
                "inactivate",
            )
            .await
    }

    pub async fn get_sdss(
        &self,
        protection_domain_id: &str,
        filter_fields: Option<&Params>,
        fields: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        self.entity
            .get_related(protection_domain_id, "Sds", filter_fields, fields)
            .await
    }

    pub async fn get_storage_pools(
        &self,
        protection_domain_id: &str,
        filter_fields: Option<&Params>,
        fields: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        self.entity
            .get_related(protection_domain_id, "StoragePool", filter_fields, fields)
            .await
    }

    pub async fn rename(&self, protection_domain_id: &str, name: &str) -> PowerFlexResult<Value> {
        let params = params(json!({ "name": name }));
        self.entity
            .rename_entity("setProtectionDomainName", protection_domain_id, &params)
            .await
    }
}
