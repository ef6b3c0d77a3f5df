use crate::{
    apis::gen2::ProtectionDomainApi,
    client::PowerFlexClient,
    entity::EntityRequest,
    error::{PowerFlexError, PowerFlexResult},
    models::{CompressionMethod, Gen2StoragePoolCreateRequest, ProtectionScheme},
    utils::{params, Params},
};
use log::{error, info};
use serde_json::{json, Value};

/// Desired state of a 5.0+ storage pool.
///
/// `None` leaves the attribute as it is. The protection domain, device group
/// and protection scheme are fixed at creation and only checked against the
/// current pool.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoragePoolUpdate {
    pub name: Option<String>,
    pub protection_domain_id: Option<String>,
    pub device_group_id: Option<String>,
    pub protection_scheme: Option<ProtectionScheme>,
    pub capacity_alert_high_threshold: Option<u32>,
    pub capacity_alert_critical_threshold: Option<u32>,
    pub over_provisioning_factor: Option<u32>,
    pub physical_size_gb: Option<u64>,
    pub compression_method: Option<CompressionMethod>,
}

impl StoragePoolUpdate {
    /// Attributes of `self` that differ from `current`
    pub fn changes(&self, current: &Value) -> StoragePoolUpdate {
        StoragePoolUpdate {
            name: self
                .name
                .clone()
                .filter(|name| current["name"].as_str() != Some(name.as_str())),
            capacity_alert_high_threshold: self
                .capacity_alert_high_threshold
                .filter(|v| differs(current, "capacityAlertHighThreshold", u64::from(*v))),
            capacity_alert_critical_threshold: self
                .capacity_alert_critical_threshold
                .filter(|v| differs(current, "capacityAlertCriticalThreshold", u64::from(*v))),
            over_provisioning_factor: self
                .over_provisioning_factor
                .filter(|v| differs(current, "overProvisioningFactor", u64::from(*v))),
            physical_size_gb: self
                .physical_size_gb
                .filter(|v| differs(current, "physicalSizeGB", *v)),
            compression_method: self
                .compression_method
                .filter(|m| serde_json::to_value(m).ok().as_ref() != current.get("compressionMethod")),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == StoragePoolUpdate::default()
    }
}

fn differs(current: &Value, key: &str, desired: u64) -> bool {
    current[key].as_u64() != Some(desired)
}

/// Storage pool API operations (5.0+)
pub struct StoragePoolApi<'a> {
    entity: EntityRequest<'a>,
}

impl<'a> StoragePoolApi<'a> {
    pub fn new(client: &'a PowerFlexClient) -> Self {
        Self {
            entity: EntityRequest::new(client, "StoragePool"),
        }
    }

    pub async fn get(
        &self,
        storage_pool_id: Option<&str>,
        filter_fields: Option<&Params>,
        fields: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        self.entity.get(storage_pool_id, filter_fields, fields).await
    }

    /// First pool of a protection domain named `name`, if any
    pub async fn get_by_name(
        &self,
        protection_domain_id: &str,
        name: &str,
    ) -> PowerFlexResult<Option<Value>> {
        let filter = params(json!({ "name": name }));
        let found = ProtectionDomainApi::new(self.entity.client())
            .get_storage_pools(protection_domain_id, Some(&filter), None)
            .await?;
        Ok(found.as_array().and_then(|items| items.first().cloned()))
    }

    /// Validate a creation request before anything is sent
    pub fn check_create_params(request: &Gen2StoragePoolCreateRequest) -> PowerFlexResult<()> {
        if request.name.is_empty()
            || request.protection_domain_id.is_empty()
            || request.device_group_id.is_empty()
        {
            return Err(PowerFlexError::invalid_input(
                "name, protection_domain_id, device_group_id, protection_scheme are required for creating a storage pool.",
            ));
        }
        Ok(())
    }

    /// Create an erasure coded storage pool, then apply the thresholds and
    /// over provisioning factor of `request`.
    ///
    /// Without `physical_size_gb` the pool takes all available capacity.
    pub async fn create(&self, request: &Gen2StoragePoolCreateRequest) -> PowerFlexResult<Value> {
        Self::check_create_params(request)?;
        let (data_slices, protection_slices) = request.protection_scheme.slices();
        let mut params = params(json!({
            "name": request.name,
            "protectionDomainId": request.protection_domain_id,
            "deviceGroupId": request.device_group_id,
            "gen": "EC",
            "compressionMethod": request.compression_method,
            "numDataSlices": data_slices,
            "numProtectionSlices": protection_slices,
        }));
        match request.physical_size_gb {
            Some(size) => params.insert("physicalSizeGB".to_string(), json!(size)),
            None => params.insert("useAllAvailableCapacity".to_string(), json!(true)),
        };
        info!(
            "Creating {:?} storage pool {} in device group {}",
            request.protection_scheme, request.name, request.device_group_id
        );
        let created = self.entity.create_entity(&params).await?;

        let desired = StoragePoolUpdate {
            capacity_alert_high_threshold: request.capacity_alert_high_threshold,
            capacity_alert_critical_threshold: request.capacity_alert_critical_threshold,
            over_provisioning_factor: request.over_provisioning_factor,
            ..Default::default()
        };
        let (_, pool) = self.update(&desired, &created).await?;
        Ok(pool)
    }

    /// Reject changes to attributes that are fixed at creation
    pub fn check_update_params(desired: &StoragePoolUpdate, current: &Value) -> PowerFlexResult<()> {
        let fixed = [
            ("protection domain ID", "protectionDomainId", desired.protection_domain_id.clone()),
            ("device group ID", "deviceGroupId", desired.device_group_id.clone()),
            (
                "protection scheme",
                "protectionScheme",
                desired
                    .protection_scheme
                    .and_then(|scheme| serde_json::to_value(scheme).ok())
                    .and_then(|scheme| scheme.as_str().map(str::to_string)),
            ),
        ];
        for (param, key, value) in fixed {
            if let Some(value) = value {
                if current[key].as_str() != Some(value.as_str()) {
                    let err = PowerFlexError::not_updatable(
                        param,
                        "StoragePool",
                        current["id"].as_str(),
                    );
                    error!("{}", err);
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    /// Changes needed to bring the pool to `desired`.
    ///
    /// The pool is fetched when `current` is not given.
    pub async fn need_update(
        &self,
        storage_pool_id: &str,
        desired: &StoragePoolUpdate,
        current: Option<&Value>,
    ) -> PowerFlexResult<(bool, StoragePoolUpdate)> {
        let changes = match current {
            Some(current) => desired.changes(current),
            None => desired.changes(&self.get(Some(storage_pool_id), None, None).await?),
        };
        Ok((!changes.is_empty(), changes))
    }

    /// Bring the pool described by `current` to `desired`.
    ///
    /// Returns whether anything changed and the pool as it is afterwards.
    pub async fn update(
        &self,
        desired: &StoragePoolUpdate,
        current: &Value,
    ) -> PowerFlexResult<(bool, Value)> {
        Self::check_update_params(desired, current)?;
        let changes = desired.changes(current);
        if changes.is_empty() {
            return Ok((false, current.clone()));
        }
        let storage_pool_id = current["id"]
            .as_str()
            .ok_or_else(|| PowerFlexError::invalid_input("storage pool has no id."))?;

        if let Some(name) = &changes.name {
            self.rename(storage_pool_id, name).await?;
        }
        if changes.capacity_alert_high_threshold.is_some()
            || changes.capacity_alert_critical_threshold.is_some()
        {
            let threshold = |changed: Option<u32>, key: &str| {
                changed
                    .or_else(|| current[key].as_u64().and_then(|v| u32::try_from(v).ok()))
                    .ok_or_else(|| {
                        PowerFlexError::invalid_input(format!(
                            "{} of storage pool {} is unknown.",
                            key, storage_pool_id
                        ))
                    })
            };
            let high = threshold(changes.capacity_alert_high_threshold, "capacityAlertHighThreshold")?;
            let critical = threshold(
                changes.capacity_alert_critical_threshold,
                "capacityAlertCriticalThreshold",
            )?;
            self.set_capacity_alert_thresholds(storage_pool_id, high, critical)
                .await?;
        }
        if let Some(factor) = changes.over_provisioning_factor {
            self.set_over_provisioning_factor(storage_pool_id, factor)
                .await?;
        }
        if let Some(size) = changes.physical_size_gb {
            self.resize(storage_pool_id, Some(size)).await?;
        }
        if let Some(method) = changes.compression_method {
            self.set_compression_method(storage_pool_id, method).await?;
        }

        let pool = self.get(Some(storage_pool_id), None, None).await?;
        Ok((true, pool))
    }

    pub async fn delete(&self, storage_pool_id: &str) -> PowerFlexResult<()> {
        self.entity.delete_entity(storage_pool_id, None).await
    }

    pub async fn rename(&self, storage_pool_id: &str, name: &str) -> PowerFlexResult<Value> {
        let params = params(json!({ "newName": name }));
        self.entity
            .rename_entity("renameStoragePool", storage_pool_id, &params)
            .await
    }

    async fn set(
        &self,
        storage_pool_id: &str,
        action: &str,
        params: &Params,
        what: &str,
    ) -> PowerFlexResult<()> {
        info!("Updating storage pool {} with {}", storage_pool_id, action);
        self.entity
            .post_action(storage_pool_id, action, Some(params), what)
            .await?;
        Ok(())
    }

    pub async fn set_capacity_alert_thresholds(
        &self,
        storage_pool_id: &str,
        high_threshold: u32,
        critical_threshold: u32,
    ) -> PowerFlexResult<()> {
        self.set(
            storage_pool_id,
            "setCapacityAlertThresholds",
            &params(json!({
                "capacityAlertHighThresholdPercent": high_threshold,
                "capacityAlertCriticalThresholdPercent": critical_threshold,
            })),
            "set capacity alert thresholds for",
        )
        .await
    }

    pub async fn set_over_provisioning_factor(
        &self,
        storage_pool_id: &str,
        over_provisioning_factor: u32,
    ) -> PowerFlexResult<()> {
        self.set(
            storage_pool_id,
            "setOverProvisioningFactor",
            &params(json!({ "overProvisioningFactor": over_provisioning_factor })),
            "set over provisioning factor for",
        )
        .await
    }

    /// Resize a pool; `None` grows it to all available capacity
    pub async fn resize(&self, storage_pool_id: &str, size_in_gb: Option<u64>) -> PowerFlexResult<()> {
        let params = match size_in_gb {
            Some(size) => params(json!({ "physicalSizeGB": size })),
            None => params(json!({ "useAllAvailableCapacity": true })),
        };
        self.set(storage_pool_id, "modifyStoragePoolSize", &params, "resize")
            .await
    }

    pub async fn set_compression_method(
        &self,
        storage_pool_id: &str,
        compression_method: CompressionMethod,
    ) -> PowerFlexResult<()> {
        self.set(
            storage_pool_id,
            "modifyCompressionMethod",
            &params(json!({ "compressionMethod": compression_method })),
            "set compression method for",
        )
        .await
    }

    pub async fn set_zero_padding_policy(
        &self,
        storage_pool_id: &str,
        zero_padding_enabled: bool,
    ) -> PowerFlexResult<()> {
        self.set(
            storage_pool_id,
            "setZeroPaddingPolicy",
            &params(json!({ "zeroPadEnabled": zero_padding_enabled })),
            "set zero padding policy for",
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current_pool() -> Value {
        json!({
            "id": "sp-1",
            "name": "sp1",
            "protectionDomainId": "pd-1",
            "deviceGroupId": "dg-1",
            "protectionScheme": "TwoPlusTwo",
            "capacityAlertHighThreshold": 80,
            "capacityAlertCriticalThreshold": 90,
            "overProvisioningFactor": 2,
            "physicalSizeGB": 1024,
            "compressionMethod": "None",
        })
    }

    #[test]
    fn changes_keep_only_differing_attributes() {
        let desired = StoragePoolUpdate {
            name: Some("sp1".to_string()),
            capacity_alert_high_threshold: Some(70),
            capacity_alert_critical_threshold: Some(90),
            physical_size_gb: Some(2048),
            compression_method: Some(CompressionMethod::NoCompression),
            ..Default::default()
        };

        let changes = desired.changes(&current_pool());

        assert_eq!(
            changes,
            StoragePoolUpdate {
                capacity_alert_high_threshold: Some(70),
                physical_size_gb: Some(2048),
                ..Default::default()
            }
        );
    }

    #[test]
    fn matching_state_needs_no_changes() {
        let desired = StoragePoolUpdate {
            name: Some("sp1".to_string()),
            over_provisioning_factor: Some(2),
            protection_scheme: Some(ProtectionScheme::TwoPlusTwo),
            ..Default::default()
        };

        assert!(desired.changes(&current_pool()).is_empty());
        assert!(StoragePoolApi::check_update_params(&desired, &current_pool()).is_ok());
    }

    #[test]
    fn fixed_attributes_can_not_be_updated() {
        let desired = StoragePoolUpdate {
            protection_scheme: Some(ProtectionScheme::EightPlusTwo),
            ..Default::default()
        };

        let err = StoragePoolApi::check_update_params(&desired, &current_pool()).unwrap_err();

        assert!(matches!(
            err,
            PowerFlexError::NotUpdatable { param: "protection scheme", .. }
        ));
        assert_eq!(
            err.to_string(),
            "The protection scheme of PowerFlex StoragePool with id sp-1 can not be updated."
        );
    }

    #[test]
    fn create_request_requires_names() {
        let request = Gen2StoragePoolCreateRequest {
            name: "sp1".to_string(),
            protection_domain_id: String::new(),
            device_group_id: "dg-1".to_string(),
            protection_scheme: ProtectionScheme::TwoPlusTwo,
            compression_method: None,
            physical_size_gb: None,
            capacity_alert_high_threshold: None,
            capacity_alert_critical_threshold: None,
            over_provisioning_factor: None,
        };

        assert!(matches!(
            StoragePoolApi::check_create_params(&request),
            Err(PowerFlexError::InvalidInput(_))
        ));
    }
}
