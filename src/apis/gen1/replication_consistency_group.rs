use crate::{
    client::PowerFlexClient,
    constants::{RCG_STATISTICS, RCG_STATISTICS_ABOVE_3_5},
    entity::EntityRequest,
    error::PowerFlexResult,
    models::RcgCreateRequest,
    utils::{params, to_params, Params},
};
use log::info;
use serde_json::{json, Value};

/// Replication consistency group (RCG) API operations
pub struct ReplicationConsistencyGroupApi<'a> {
    entity: EntityRequest<'a>,
}

impl<'a> ReplicationConsistencyGroupApi<'a> {
    pub fn new(client: &'a PowerFlexClient) -> Self {
        Self {
            entity: EntityRequest::new(client, "ReplicationConsistencyGroup"),
        }
    }

    pub async fn get(
        &self,
        rcg_id: Option<&str>,
        filter_fields: Option<&Params>,
        fields: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        self.entity.get(rcg_id, filter_fields, fields).await
    }

    /// Create a new replication consistency group
    ///
    /// # Arguments
    /// * `request` - RPO, local and remote protection domains, peer system
    pub async fn create(&self, request: &RcgCreateRequest) -> PowerFlexResult<Value> {
        info!(
            "Creating RCG in protection domain {} with RPO {}s",
            request.protection_domain_id, request.rpo
        );
        self.entity.create_entity(&to_params(request)?).await
    }

    pub async fn delete(
        &self,
        rcg_id: &str,
        force_ignore_consistency: Option<bool>,
    ) -> PowerFlexResult<()> {
        let params = params(json!({ "forceIgnoreConsistency": force_ignore_consistency }));
        self.entity.delete_entity(rcg_id, Some(&params)).await
    }

    /// Snapshot every volume of the group
    pub async fn create_snapshot(&self, rcg_id: &str) -> PowerFlexResult<Value> {
        self.entity
            .post_action_and_get(
                rcg_id,
                "createReplicationConsistencyGroupSnapshots",
                None,
                "create snapshot of",
            )
            .await
    }

    pub async fn get_statistics(&self, rcg_id: &str) -> PowerFlexResult<Value> {
        self.entity.get_statistics(rcg_id, None).await
    }

    async fn operation(
        &self,
        rcg_id: &str,
        action: &str,
        params: Option<Params>,
        add_entity: bool,
    ) -> PowerFlexResult<Value> {
        info!("Running {} on RCG {}", action, rcg_id);
        self.entity
            .perform_entity_operation_based_on_action(rcg_id, action, params.as_ref(), add_entity)
            .await
    }

    pub async fn activate(&self, rcg_id: &str) -> PowerFlexResult<Value> {
        self.operation(rcg_id, "activateReplicationConsistencyGroup", None, false)
            .await
    }

    pub async fn inactivate(&self, rcg_id: &str) -> PowerFlexResult<Value> {
        self.operation(rcg_id, "terminateReplicationConsistencyGroup", None, false)
            .await
    }

    pub async fn freeze(&self, rcg_id: &str) -> PowerFlexResult<Value> {
        self.operation(rcg_id, "freezeApply", None, true).await
    }

    pub async fn unfreeze(&self, rcg_id: &str) -> PowerFlexResult<Value> {
        self.operation(rcg_id, "unfreezeApply", None, true).await
    }

    /// `pause_mode` is e.g. `StopDataTransfer` or `OnlyTrackChanges`
    pub async fn pause(&self, rcg_id: &str, pause_mode: &str) -> PowerFlexResult<Value> {
        let params = params(json!({ "pauseMode": pause_mode }));
        self.operation(rcg_id, "pause", Some(params), true).await
    }

    pub async fn resume(&self, rcg_id: &str) -> PowerFlexResult<Value> {
        self.operation(rcg_id, "resume", None, true).await
    }

    pub async fn set_as_consistent(&self, rcg_id: &str) -> PowerFlexResult<Value> {
        self.operation(rcg_id, "setReplicationConsistencyGroupConsistent", None, false)
            .await
    }

    pub async fn set_as_inconsistent(&self, rcg_id: &str) -> PowerFlexResult<Value> {
        self.operation(rcg_id, "setReplicationConsistencyGroupInconsistent", None, false)
            .await
    }

    pub async fn modify_rpo(&self, rcg_id: &str, rpo_in_seconds: u32) -> PowerFlexResult<Value> {
        let params = params(json!({ "rpoInSeconds": rpo_in_seconds }));
        self.operation(
            rcg_id,
            "ModifyReplicationConsistencyGroupRpo",
            Some(params),
            false,
        )
        .await
    }

    pub async fn modify_target_volume_access_mode(
        &self,
        rcg_id: &str,
        target_volume_access_mode: &str,
    ) -> PowerFlexResult<Value> {
        let params = params(json!({ "targetVolumeAccessMode": target_volume_access_mode }));
        self.operation(
            rcg_id,
            "modifyReplicationConsistencyGroupTargetVolumeAccessMode",
            Some(params),
            false,
        )
        .await
    }

    pub async fn rename_rcg(&self, rcg_id: &str, new_name: &str) -> PowerFlexResult<Value> {
        let params = params(json!({ "newName": new_name }));
        self.operation(rcg_id, "rename", Some(params), true).await
    }

    /// Statistics of every RCG with the default properties of the gateway
    /// generation (3.5 and below, or 3.6+).
    pub async fn get_all_statistics(&self, api_version_less_than_3_6: bool) -> PowerFlexResult<Value> {
        let properties = if api_version_less_than_3_6 {
            RCG_STATISTICS
        } else {
            RCG_STATISTICS_ABOVE_3_5
        };
        let params = params(json!({ "properties": properties, "allIds": "" }));
        self.entity
            .post_type_action("querySelectedStatistics", Some(&params), "list statistics")
            .await
    }
}
