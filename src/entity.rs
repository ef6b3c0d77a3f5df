use crate::{
    client::{ApiResponse, PowerFlexClient},
    error::{PowerFlexError, PowerFlexResult},
    utils::{filter_response, query_response_fields, Params},
};
use log::{error, info};
use serde_json::{json, Value};

pub const BASE_ACTION_URL: &str = "/instances/{entity}::{entity_id}/action/{action}";
pub const BASE_ENTITY_URL: &str = "/instances/{entity}::{entity_id}";
pub const BASE_ENTITY_LIST_OR_CREATE_URL: &str = "/types/{entity}/instances";
pub const BASE_RELATIONSHIP_URL: &str = "/instances/{entity}::{entity_id}/relationships/{related}";
pub const BASE_OBJECT_URL: &str = "/instances/{entity}/action/{action}";
pub const LIST_STATISTICS_URL: &str = "/types/{entity}/instances/action/{action}";
pub const QUERY_MDM_CLUSTER_URL: &str = "/instances/{entity}/queryMdmCluster";
pub const METRICS_QUERY_PATH: &str = "/dtapi/rest/v1/metrics/query";

/// Generic entity operations shared by every resource API
#[derive(Clone, Copy)]
pub struct EntityRequest<'a> {
    client: &'a PowerFlexClient,
    entity: &'static str,
}

impl<'a> EntityRequest<'a> {
    pub fn new(client: &'a PowerFlexClient, entity: &'static str) -> Self {
        Self { client, entity }
    }

    pub fn client(&self) -> &'a PowerFlexClient {
        self.client
    }

    /// Gateway type name, e.g. `Volume`
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// Create an entity and return it as fetched back by id
    pub async fn create_entity(&self, params: &Params) -> PowerFlexResult<Value> {
        info!("Creating PowerFlex {}", self.entity);
        let response = self
            .client
            .send_post_request(
                BASE_ENTITY_LIST_OR_CREATE_URL,
                Some(params),
                &[("entity", self.entity)],
            )
            .await?;
        if !response.is_ok() {
            let err = PowerFlexError::fail_creating(self.entity, response.body);
            error!("{}", err);
            return Err(err);
        }

        let entity_id = response
            .body
            .as_ref()
            .and_then(|body| body.get("id"))
            .and_then(Value::as_str)
            .ok_or_else(|| {
                PowerFlexError::InvalidResponse(format!(
                    "create {} response has no id",
                    self.entity
                ))
            })?
            .to_string();

        self.get(Some(&entity_id), None, None).await
    }

    /// Get one entity by id, or the whole collection.
    ///
    /// Filtering and field projection are applied locally.
    pub async fn get(
        &self,
        entity_id: Option<&str>,
        filter_fields: Option<&Params>,
        fields: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        let response = match entity_id {
            Some(entity_id) => {
                if filter_fields.is_some() {
                    return Err(PowerFlexError::invalid_input(
                        "Can not apply filtering while querying entity by id.",
                    ));
                }
                self.client
                    .send_get_request(
                        BASE_ENTITY_URL,
                        &[("entity", self.entity), ("entity_id", entity_id)],
                    )
                    .await?
            }
            None => {
                self.client
                    .send_get_request(BASE_ENTITY_LIST_OR_CREATE_URL, &[("entity", self.entity)])
                    .await?
            }
        };
        if !response.is_ok() {
            let err = PowerFlexError::fail_querying(self.entity, entity_id, response.body);
            error!("{}", err);
            return Err(err);
        }

        shape_response(response.into_body(), filter_fields, fields)
    }

    /// List entities related to `entity_id`, e.g. the volumes of a pool
    pub async fn get_related(
        &self,
        entity_id: &str,
        related: &str,
        filter_fields: Option<&Params>,
        fields: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        let response = self
            .client
            .send_get_request(
                BASE_RELATIONSHIP_URL,
                &[
                    ("entity", self.entity),
                    ("entity_id", entity_id),
                    ("related", related),
                ],
            )
            .await?;
        if !response.is_ok() {
            let msg = format!(
                "Failed to query related {} entities for PowerFlex {} with id {}.",
                related, self.entity, entity_id
            );
            error!("{}", msg);
            return Err(PowerFlexError::client(msg, response.body));
        }

        shape_response(response.into_body(), filter_fields, fields)
    }

    /// Remove an entity through its `remove<Entity>` action
    pub async fn delete_entity(&self, entity_id: &str, params: Option<&Params>) -> PowerFlexResult<()> {
        info!("Deleting PowerFlex {} {}", self.entity, entity_id);
        let action = format!("remove{}", self.entity);
        let response = self
            .client
            .send_post_request(
                BASE_ACTION_URL,
                params,
                &[
                    ("entity", self.entity),
                    ("entity_id", entity_id),
                    ("action", action.as_str()),
                ],
            )
            .await?;
        if !response.is_ok() {
            let err = PowerFlexError::fail_deleting(self.entity, entity_id, response.body);
            error!("{}", err);
            return Err(err);
        }
        Ok(())
    }

    /// Run a rename action and return the refreshed entity
    pub async fn rename_entity(
        &self,
        action: &str,
        entity_id: &str,
        params: &Params,
    ) -> PowerFlexResult<Value> {
        info!("Renaming PowerFlex {} {}", self.entity, entity_id);
        let response = self.send_action(entity_id, action, Some(params)).await?;
        if !response.is_ok() {
            let err = PowerFlexError::fail_renaming(self.entity, entity_id, response.body);
            error!("{}", err);
            return Err(err);
        }

        self.get(Some(entity_id), None, None).await
    }

    /// POST an action; with `add_entity` the entity name is appended to it
    /// (`activate` becomes `activateProtectionDomain`).
    pub async fn perform_entity_operation_based_on_action(
        &self,
        entity_id: &str,
        action: &str,
        params: Option<&Params>,
        add_entity: bool,
    ) -> PowerFlexResult<Value> {
        let action = if add_entity {
            format!("{}{}", action, self.entity)
        } else {
            action.to_string()
        };

        let response = self.send_action(entity_id, &action, params).await?;
        if !response.is_ok() {
            let err = PowerFlexError::fail_entity_operation(
                self.entity,
                Some(entity_id),
                action,
                response.body,
            );
            error!("{}", err);
            return Err(err);
        }
        Ok(response.into_body())
    }

    async fn send_action(
        &self,
        entity_id: &str,
        action: &str,
        params: Option<&Params>,
    ) -> PowerFlexResult<ApiResponse> {
        self.client
            .send_post_request(
                BASE_ACTION_URL,
                params,
                &[
                    ("entity", self.entity),
                    ("entity_id", entity_id),
                    ("action", action),
                ],
            )
            .await
    }

    /// POST an action and return the gateway's answer.
    ///
    /// `what` completes the failure message "Failed to {what} PowerFlex ...".
    pub async fn post_action(
        &self,
        entity_id: &str,
        action: &str,
        params: Option<&Params>,
        what: &str,
    ) -> PowerFlexResult<Value> {
        let response = self.send_action(entity_id, action, params).await?;
        if !response.is_ok() {
            let msg = format!(
                "Failed to {} PowerFlex {} with id {}.",
                what, self.entity, entity_id
            );
            error!("{}", msg);
            return Err(PowerFlexError::client(msg, response.body));
        }
        Ok(response.into_body())
    }

    /// POST an action, then fetch the entity again
    pub async fn post_action_and_get(
        &self,
        entity_id: &str,
        action: &str,
        params: Option<&Params>,
        what: &str,
    ) -> PowerFlexResult<Value> {
        self.post_action(entity_id, action, params, what).await?;
        self.get(Some(entity_id), None, None).await
    }

    /// Related `Statistics` of one entity
    pub async fn get_statistics(
        &self,
        entity_id: &str,
        fields: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        self.get_related(entity_id, "Statistics", None, fields).await
    }

    /// POST an action on the type itself, e.g. `/instances/System/action/addStandbyMdm`
    pub async fn post_object_action(
        &self,
        action: &str,
        params: Option<&Params>,
        what: &str,
    ) -> PowerFlexResult<Value> {
        let response = self
            .client
            .send_post_request(BASE_OBJECT_URL, params, &[("entity", self.entity), ("action", action)])
            .await?;
        if !response.is_ok() {
            let err = PowerFlexError::client(
                format!("Failed to {} on PowerFlex {}.", what, self.entity),
                response.body,
            );
            error!("{}", err);
            return Err(err);
        }
        Ok(response.into_body())
    }

    /// POST a type-level action, e.g. `/types/ReplicationPair/instances/action/...`
    pub async fn post_type_action(
        &self,
        action: &str,
        params: Option<&Params>,
        what: &str,
    ) -> PowerFlexResult<Value> {
        let response = self
            .client
            .send_post_request(LIST_STATISTICS_URL, params, &[("entity", self.entity), ("action", action)])
            .await?;
        if !response.is_ok() {
            let err = PowerFlexError::client(
                format!("Failed to {} for PowerFlex {}.", what, self.entity),
                response.body,
            );
            error!("{}", err);
            return Err(err);
        }
        Ok(response.into_body())
    }

    /// Query type-level statistics for the given ids, or for all entities
    pub async fn query_selected_statistics(
        &self,
        action: &str,
        mut params: Params,
        ids: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        match ids {
            Some(ids) => params.insert("ids".to_string(), json!(ids)),
            None => params.insert("allIds".to_string(), json!("")),
        };

        let response = self
            .client
            .send_post_request(
                LIST_STATISTICS_URL,
                Some(&params),
                &[("entity", self.entity), ("action", action)],
            )
            .await?;
        if !response.is_ok() {
            let err = PowerFlexError::fail_querying(
                format!("{} statistics", self.entity),
                None,
                response.body,
            );
            error!("{}", err);
            return Err(err);
        }
        Ok(response.into_body())
    }

    /// Query the 5.0+ metrics service for `resource_type`
    pub async fn query_metrics(
        &self,
        resource_type: &str,
        ids: Option<&[&str]>,
        metrics: Option<&[&str]>,
    ) -> PowerFlexResult<Value> {
        query_metrics(self.client, resource_type, ids, metrics).await
    }
}

/// Query the metrics service; unset `ids` or `metrics` are left to the gateway
pub(crate) async fn query_metrics(
    client: &PowerFlexClient,
    resource_type: &str,
    ids: Option<&[&str]>,
    metrics: Option<&[&str]>,
) -> PowerFlexResult<Value> {
    let mut params = Params::new();
    params.insert("resource_type".to_string(), json!(resource_type));
    if let Some(ids) = ids {
        params.insert("ids".to_string(), json!(ids));
    }
    if let Some(metrics) = metrics {
        params.insert("metrics".to_string(), json!(metrics));
    }

    let response = client.send_metrics_request(&params).await?;
    if !response.is_ok() {
        let err = PowerFlexError::fail_querying(
            format!("{} metrics", resource_type),
            None,
            response.body,
        );
        error!("{}", err);
        return Err(err);
    }
    Ok(response.into_body())
}

fn shape_response(
    body: Value,
    filter_fields: Option<&Params>,
    fields: Option<&[&str]>,
) -> PowerFlexResult<Value> {
    let mut body = body;
    if let Some(filter_fields) = filter_fields {
        body = match body {
            Value::Array(items) => Value::Array(filter_response(items, filter_fields)),
            other => other,
        };
    }
    if let Some(fields) = fields {
        body = query_response_fields(&body, fields)?;
    }
    Ok(body)
}
