use crate::{
    client::PowerFlexClient,
    entity::EntityRequest,
    error::PowerFlexResult,
    models::PerformanceProfile,
    utils::{params, Params},
};
use serde_json::{json, Value};

/// SDC (storage data client) API operations, shared by every gateway version
pub struct SdcApi<'a> {
    entity: EntityRequest<'a>,
}

impl<'a> SdcApi<'a> {
    pub fn new(client: &'a PowerFlexClient) -> Self {
        Self {
            entity: EntityRequest::new(client, "Sdc"),
        }
    }

    pub async fn get(
        &self,
        sdc_id: Option<&str>,
        filter_fields: Option<&Params>,
        fields: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        self.entity.get(sdc_id, filter_fields, fields).await
    }

    pub async fn delete(&self, sdc_id: &str) -> PowerFlexResult<()> {
        self.entity.delete_entity(sdc_id, None).await
    }

    /// Volumes mapped to an SDC
    pub async fn get_mapped_volumes(
        &self,
        sdc_id: &str,
        filter_fields: Option<&Params>,
        fields: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        self.entity
            .get_related(sdc_id, "Volume", filter_fields, fields)
            .await
    }

    pub async fn rename(&self, sdc_id: &str, name: &str) -> PowerFlexResult<Value> {
        let params = params(json!({ "sdcName": name }));
        self.entity.rename_entity("setSdcName", sdc_id, &params).await
    }

    pub async fn set_performance_profile(
        &self,
        sdc_id: &str,
        perf_profile: PerformanceProfile,
    ) -> PowerFlexResult<Value> {
        let params = params(json!({ "perfProfile": perf_profile }));
        self.entity
            .post_action_and_get(
                sdc_id,
                "setSdcPerformanceParameters",
                Some(&params),
                "set performance profile for",
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
