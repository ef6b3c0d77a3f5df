use crate::{
    client::PowerFlexClient,
    entity::EntityRequest,
    error::PowerFlexResult,
    models::{AutoSnapshotRemovalAction, SnapshotPolicyCreateRequest},
    utils::{params, to_params, Params},
};
use log::info;
use serde_json::{json, Value};

/// Snapshot policy API operations
pub struct SnapshotPolicyApi<'a> {
    entity: EntityRequest<'a>,
}

impl<'a> SnapshotPolicyApi<'a> {
    pub fn new(client: &'a PowerFlexClient) -> Self {
        Self {
            entity: EntityRequest::new(client, "SnapshotPolicy"),
        }
    }

    pub async fn get(
        &self,
        snapshot_policy_id: Option<&str>,
        filter_fields: Option<&Params>,
        fields: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        self.entity.get(snapshot_policy_id, filter_fields, fields).await
    }

    /// Create a new Snapshot Policy
    ///
    /// # Arguments
    /// * `request` - Cadence, retained snapshots per level, name and paused state
    pub async fn create(&self, request: &SnapshotPolicyCreateRequest) -> PowerFlexResult<Value> {
        info!(
            "Creating snapshot policy with cadence {} min",
            request.auto_snap_creation_cadence_in_min
        );
        self.entity.create_entity(&to_params(request)?).await
    }

    pub async fn delete(&self, snapshot_policy_id: &str) -> PowerFlexResult<()> {
        self.entity.delete_entity(snapshot_policy_id, None).await
    }

    /// Change the cadence and retention levels of a policy
    pub async fn modify(
        &self,
        snapshot_policy_id: &str,
        auto_snap_creation_cadence_in_min: u32,
        retained_snaps_per_level: &[u32],
    ) -> PowerFlexResult<Value> {
        let params = params(json!({
            "autoSnapshotCreationCadenceInMin": auto_snap_creation_cadence_in_min,
            "numOfRetainedSnapshotsPerLevel": retained_snaps_per_level,
        }));
        self.entity
            .post_action_and_get(
                snapshot_policy_id,
                "modifySnapshotPolicy",
                Some(&params),
                "modify",
            )
            .await
    }

    pub async fn add_source_volume(
        &self,
        snapshot_policy_id: &str,
        volume_id: &str,
    ) -> PowerFlexResult<Value> {
        let params = params(json!({ "sourceVolumeId": volume_id }));
        self.entity
            .post_action_and_get(
                snapshot_policy_id,
                "addSourceVolumeToSnapshotPolicy",
                Some(&params),
                "add source volume to",
            )
            .await
    }

    /// Detach or remove the auto snapshots of the volume as it leaves the policy
    pub async fn remove_source_volume(
        &self,
        snapshot_policy_id: &str,
        volume_id: &str,
        auto_snap_removal_action: AutoSnapshotRemovalAction,
        detach_locked_auto_snaps: Option<bool>,
    ) -> PowerFlexResult<Value> {
        let params = params(json!({
            "sourceVolumeId": volume_id,
            "autoSnapshotRemovalAction": auto_snap_removal_action,
            "detachLockedAutoSnapshots": detach_locked_auto_snaps,
        }));
        self.entity
            .post_action_and_get(
                snapshot_policy_id,
                "removeSourceVolumeFromSnapshotPolicy",
                Some(&params),
                "remove source volume from",
            )
            .await
    }

    pub async fn pause(&self, snapshot_policy_id: &str) -> PowerFlexResult<Value> {
        self.entity
            .post_action_and_get(snapshot_policy_id, "pauseSnapshotPolicy", None, "pause")
            .await
    }

    pub async fn resume(&self, snapshot_policy_id: &str) -> PowerFlexResult<Value> {
        self.entity
            .post_action_and_get(snapshot_policy_id, "resumeSnapshotPolicy", None, "resume")
            .await
    }

    pub async fn rename(&self, snapshot_policy_id: &str, name: &str) -> PowerFlexResult<Value> {
        let params = params(json!({ "newName": name }));
        self.entity
            .rename_entity("renameSnapshotPolicy", snapshot_policy_id, &params)
            .await
    }

    pub async fn get_statistics(
        &self,
        snapshot_policy_id: &str,
        fields: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        self.entity.get_statistics(snapshot_policy_id, fields).await
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
