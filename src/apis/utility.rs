use crate::{
    apis::SystemApi,
    client::PowerFlexClient,
    constants::{
        SNAPSHOT_POLICY_STATISTICS, STORAGE_POOL_STATISTICS, STORAGE_POOL_STATISTICS_ABOVE_3_5,
        VOLUME_STATISTICS,
    },
    entity::{query_metrics, EntityRequest},
    error::PowerFlexResult,
    utils::params,
};
use serde_json::{json, Value};

/// Bulk statistics and metrics queries across entity types
pub struct UtilityApi<'a> {
    client: &'a PowerFlexClient,
}

impl<'a> UtilityApi<'a> {
    pub fn new(client: &'a PowerFlexClient) -> Self {
        Self { client }
    }

    async fn statistics(
        &self,
        entity: &'static str,
        properties: &[&str],
        ids: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        EntityRequest::new(self.client, entity)
            .query_selected_statistics(
                "querySelectedStatistics",
                params(json!({ "properties": properties })),
                ids,
            )
            .await
    }

    /// Statistics of storage pools; all pools when `ids` is `None`.
    ///
    /// Default properties depend on the gateway version.
    pub async fn get_statistics_for_all_storage_pools(
        &self,
        ids: Option<&[&str]>,
        properties: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        let properties = match properties {
            Some(properties) => properties.to_vec(),
            None => {
                let version = SystemApi::new(self.client).api_version(true).await?;
                let mut defaults = STORAGE_POOL_STATISTICS.to_vec();
                if version.as_str() != "3.5" {
                    defaults.extend_from_slice(STORAGE_POOL_STATISTICS_ABOVE_3_5);
                }
                defaults
            }
        };
        self.statistics("StoragePool", &properties, ids).await
    }

    /// Statistics of volumes; all volumes when `ids` is `None`
    pub async fn get_statistics_for_all_volumes(
        &self,
        ids: Option<&[&str]>,
        properties: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        self.statistics("Volume", properties.unwrap_or(VOLUME_STATISTICS), ids)
            .await
    }

    /// Statistics of snapshot policies; all policies when `ids` is `None`
    pub async fn get_statistics_for_all_snapshot_policies(
        &self,
        ids: Option<&[&str]>,
        properties: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        self.statistics(
            "SnapshotPolicy",
            properties.unwrap_or(SNAPSHOT_POLICY_STATISTICS),
            ids,
        )
        .await
    }

    /// Volume metrics from the 5.0+ metrics service
    pub async fn query_metrics_for_all_volumes(
        &self,
        ids: Option<&[&str]>,
        metrics: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        query_metrics(self.client, "volume", ids, metrics).await
    }

    /// Storage node metrics from the 5.0+ metrics service
    pub async fn query_metrics_for_all_storage_nodes(
        &self,
        ids: Option<&[&str]>,
        metrics: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        query_metrics(self.client, "storage_node", ids, metrics).await
    }
}
