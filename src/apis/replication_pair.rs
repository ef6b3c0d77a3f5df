use crate::{
    client::PowerFlexClient,
    entity::EntityRequest,
    error::PowerFlexResult,
    models::ReplicationPairCreateRequest,
    utils::{params, to_params, Params},
};
use log::info;
use serde_json::{json, Value};

/// Replication pair API operations
pub struct ReplicationPairApi<'a> {
    entity: EntityRequest<'a>,
}

impl<'a> ReplicationPairApi<'a> {
    pub fn new(client: &'a PowerFlexClient) -> Self {
        Self {
            entity: EntityRequest::new(client, "ReplicationPair"),
        }
    }

    pub async fn get(
        &self,
        pair_id: Option<&str>,
        filter_fields: Option<&Params>,
        fields: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        self.entity.get(pair_id, filter_fields, fields).await
    }

    /// Pair a source volume with a destination volume inside an RCG
    pub async fn add(&self, request: &ReplicationPairCreateRequest) -> PowerFlexResult<Value> {
        info!(
            "Adding replication pair {} -> {} to RCG {}",
            request.source_vol_id, request.dest_vol_id, request.rcg_id
        );
        self.entity.create_entity(&to_params(request)?).await
    }

    pub async fn remove(&self, pair_id: &str) -> PowerFlexResult<()> {
        self.entity.delete_entity(pair_id, None).await
    }

    pub async fn pause(&self, pair_id: &str) -> PowerFlexResult<Value> {
        self.entity
            .perform_entity_operation_based_on_action(pair_id, "pausePairInitialCopy", None, false)
            .await
    }

    pub async fn resume(&self, pair_id: &str) -> PowerFlexResult<Value> {
        self.entity
            .perform_entity_operation_based_on_action(pair_id, "resumePairInitialCopy", None, false)
            .await
    }

    pub async fn get_statistics(&self, pair_id: &str) -> PowerFlexResult<Value> {
        self.entity.get_statistics(pair_id, None).await
    }

    /// Statistics of every replication pair, with the gateway's default properties
    pub async fn get_all_statistics(&self) -> PowerFlexResult<Value> {
        self.entity
            .post_type_action("querySelectedStatistics", None, "list statistics")
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
