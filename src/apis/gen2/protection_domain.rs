use crate::{
    client::PowerFlexClient,
    entity::EntityRequest,
    error::{PowerFlexError, PowerFlexResult},
    models::{ProtectionDomainState, SecondaryIoPolicy},
    utils::{params, to_params, Params},
};
use log::{error, info};
use serde_json::{json, Value};

/// Desired state of a 5.0+ protection domain; `None` leaves an attribute as it is
#[derive(Debug, Clone, Default)]
pub struct ProtectionDomainUpdate {
    pub name: Option<String>,
    pub state: Option<ProtectionDomainState>,
    pub rebuild_enabled: Option<bool>,
    pub rebalance_enabled: Option<bool>,
    pub secondary_io_policy: Option<SecondaryIoPolicy>,
}

impl ProtectionDomainUpdate {
    /// Attributes of `self` that differ from `current`.
    ///
    /// Policy fields are compared only when the domain reports them. Any
    /// difference keeps the whole desired policy.
    pub fn changes(&self, current: &Value) -> ProtectionDomainUpdate {
        ProtectionDomainUpdate {
            name: self
                .name
                .clone()
                .filter(|name| current["name"].as_str() != Some(name.as_str())),
            state: self.state.filter(|state| {
                serde_json::to_value(state).ok().as_ref() != current.get("protectionDomainState")
            }),
            rebuild_enabled: self
                .rebuild_enabled
                .filter(|enabled| current["rebuildEnabled"].as_bool() != Some(*enabled)),
            rebalance_enabled: self
                .rebalance_enabled
                .filter(|enabled| current["rebalanceEnabled"].as_bool() != Some(*enabled)),
            secondary_io_policy: self
                .secondary_io_policy
                .clone()
                .filter(|policy| policy_differs(policy, current)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.state.is_none()
            && self.rebuild_enabled.is_none()
            && self.rebalance_enabled.is_none()
            && self.secondary_io_policy.is_none()
    }
}

fn policy_differs(policy: &SecondaryIoPolicy, current: &Value) -> bool {
    let Ok(Value::Object(desired)) = serde_json::to_value(policy) else {
        return false;
    };
    desired.iter().any(|(key, value)| match current.get(key) {
        Some(reported) if !reported.is_null() && !value.is_null() => reported != value,
        _ => false,
    })
}

/// Protection domain API operations (5.0+)
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

    /// First protection domain named `name`, if any
    pub async fn get_by_name(&self, name: &str) -> PowerFlexResult<Option<Value>> {
        let filter = params(json!({ "name": name }));
        let found = self.entity.get(None, Some(&filter), None).await?;
        Ok(found.as_array().and_then(|items| items.first().cloned()))
    }

    pub fn check_create_params(name: &str) -> PowerFlexResult<()> {
        if name.is_empty() {
            return Err(PowerFlexError::invalid_input(
                "name is required for creating a protection domain.",
            ));
        }
        Ok(())
    }

    /// Create a protection domain, then apply `settings`
    pub async fn create(
        &self,
        name: &str,
        settings: &ProtectionDomainUpdate,
    ) -> PowerFlexResult<Value> {
        Self::check_create_params(name)?;
        info!("Creating protection domain {}", name);
        let created = self.entity.create_entity(&params(json!({ "name": name }))).await?;
        let protection_domain_id = created["id"]
            .as_str()
            .ok_or_else(|| {
                PowerFlexError::InvalidResponse("created ProtectionDomain has no id".to_string())
            })?
            .to_string();
        let (_, protection_domain) = self
            .update(&protection_domain_id, settings, Some(&created))
            .await?;
        Ok(protection_domain)
    }

    /// The id of a protection domain can not change
    pub fn check_update_params(protection_domain_id: &str, current: &Value) -> PowerFlexResult<()> {
        if current["id"].as_str() != Some(protection_domain_id) {
            let err = PowerFlexError::not_updatable(
                "protection domain ID",
                "ProtectionDomain",
                Some(protection_domain_id),
            );
            error!("{}", err);
            return Err(err);
        }
        Ok(())
    }

    /// Changes needed to bring the domain to `desired`.
    ///
    /// The domain is fetched when `current` is not given.
    pub async fn need_update(
        &self,
        protection_domain_id: &str,
        desired: &ProtectionDomainUpdate,
        current: Option<&Value>,
    ) -> PowerFlexResult<(bool, ProtectionDomainUpdate)> {
        let changes = match current {
            Some(current) => desired.changes(current),
            None => desired.changes(&self.get(Some(protection_domain_id), None, None).await?),
        };
        Ok((!changes.is_empty(), changes))
    }

    /// Bring the domain to `desired`.
    ///
    /// Returns whether anything changed and the domain as it is afterwards.
    pub async fn update(
        &self,
        protection_domain_id: &str,
        desired: &ProtectionDomainUpdate,
        current: Option<&Value>,
    ) -> PowerFlexResult<(bool, Value)> {
        let current = match current {
            Some(current) => current.clone(),
            None => self.get(Some(protection_domain_id), None, None).await?,
        };
        Self::check_update_params(protection_domain_id, &current)?;
        let changes = desired.changes(&current);
        if changes.is_empty() {
            return Ok((false, current));
        }

        if let Some(name) = &changes.name {
            self.rename(protection_domain_id, name).await?;
        }
        match changes.state {
            Some(ProtectionDomainState::Inactive) => {
                self.inactivate(protection_domain_id, true).await?
            }
            Some(ProtectionDomainState::Active) => self.activate(protection_domain_id, true).await?,
            None => {}
        }
        if let Some(enabled) = changes.rebuild_enabled {
            self.set_rebuild_enabled(protection_domain_id, enabled).await?;
        }
        if let Some(enabled) = changes.rebalance_enabled {
            self.set_rebalance_enabled(protection_domain_id, enabled).await?;
        }
        if let Some(policy) = &changes.secondary_io_policy {
            self.set_secondary_io_policy(protection_domain_id, policy).await?;
        }

        let protection_domain = self.get(Some(protection_domain_id), None, None).await?;
        Ok((true, protection_domain))
    }

    pub async fn delete(&self, protection_domain_id: &str) -> PowerFlexResult<()> {
        self.entity.delete_entity(protection_domain_id, None).await
    }

    async fn set(
        &self,
        protection_domain_id: &str,
        action: &str,
        params: &Params,
        what: &str,
    ) -> PowerFlexResult<()> {
        info!("Updating protection domain {} with {}", protection_domain_id, action);
        self.entity
            .post_action(protection_domain_id, action, Some(params), what)
            .await?;
        Ok(())
    }

    pub async fn activate(&self, protection_domain_id: &str, force: bool) -> PowerFlexResult<()> {
        self.set(
            protection_domain_id,
            "activateProtectionDomain",
            &params(json!({ "forceActivate": force })),
            "activate",
        )
        .await
    }

    pub async fn inactivate(&self, protection_domain_id: &str, force: bool) -> PowerFlexResult<()> {
        self.set(
            protection_domain_id,
            "inactivateProtectionDomain",
            &params(json!({ "forceShutdown": force })),
            "inactivate",
        )
        .await
    }

    pub async fn set_rebuild_enabled(
        &self,
        protection_domain_id: &str,
        enabled: bool,
    ) -> PowerFlexResult<()> {
        self.set(
            protection_domain_id,
            "setRebuildEnabled",
            &params(json!({ "rebuildEnabled": enabled })),
            "enable/disable rebuild for",
        )
        .await
    }

    pub async fn set_rebalance_enabled(
        &self,
        protection_domain_id: &str,
        enabled: bool,
    ) -> PowerFlexResult<()> {
        self.set(
            protection_domain_id,
            "setRebalanceEnabled",
            &params(json!({ "rebalanceEnabled": enabled })),
            "enable/disable rebalance for",
        )
        .await
    }

    /// Set the secondary I/O policy and its bandwidth limits
    pub async fn set_secondary_io_policy(
        &self,
        protection_domain_id: &str,
        policy: &SecondaryIoPolicy,
    ) -> PowerFlexResult<()> {
        if policy.policy.is_empty() {
            return Err(PowerFlexError::invalid_input(
                "policy is required for setting secondary I/O policy.",
            ));
        }
        self.set(
            protection_domain_id,
            "setSecondaryIoPolicy",
            &to_params(policy)?,
            "set secondary I/O policy for",
        )
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

#[cfg(test)]
mod tests {
    use super::*;

    fn current_domain() -> Value {
        json!({
            "id": "pd-1",
            "name": "pd1",
            "protectionDomainState": "Active",
            "rebuildEnabled": true,
            "rebalanceEnabled": true,
            "policy": "unlimited",
            "bandwidthLimitRebalance": 100,
        })
    }

    #[test]
    fn changes_skip_matching_attributes() {
        let desired = ProtectionDomainUpdate {
            name: Some("pd1".to_string()),
            state: Some(ProtectionDomainState::Inactive),
            rebuild_enabled: Some(true),
            rebalance_enabled: Some(false),
            secondary_io_policy: None,
        };

        let changes = desired.changes(&current_domain());

        assert!(changes.name.is_none());
        assert_eq!(changes.state, Some(ProtectionDomainState::Inactive));
        assert!(changes.rebuild_enabled.is_none());
        assert_eq!(changes.rebalance_enabled, Some(false));
    }

    #[test]
    fn policy_compared_only_on_reported_fields() {
        let unreported = ProtectionDomainUpdate {
            secondary_io_policy: Some(SecondaryIoPolicy {
                policy: "unlimited".to_string(),
                bandwidth_limit_other: Some(10),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(unreported.changes(&current_domain()).is_empty());

        let changed = ProtectionDomainUpdate {
            secondary_io_policy: Some(SecondaryIoPolicy {
                policy: "favorApplication".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(changed.changes(&current_domain()).secondary_io_policy.is_some());
    }

    #[test]
    fn id_can_not_be_updated() {
        let err = ProtectionDomainApi::check_update_params("pd-2", &current_domain()).unwrap_err();

        assert_eq!(
            err.to_string(),
            "The protection domain ID of PowerFlex ProtectionDomain with id pd-2 can not be updated."
        );
    }
}
