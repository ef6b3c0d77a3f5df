use crate::error::{PowerFlexError, PowerFlexResult};
use log::error;
use serde::Serialize;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Request parameters; `Value::Null` entries are dropped before sending
pub type Params = Map<String, Value>;

/// Dotted numeric PowerFlex API version such as `3.5` or `4.5.1`
#[derive(Debug, Clone)]
pub struct ApiVersion {
    raw: String,
    parts: Vec<u64>,
}

impl ApiVersion {
    pub fn parse(version: &str) -> PowerFlexResult<Self> {
        version.parse()
    }

    pub fn new(major: u64, minor: u64) -> Self {
        Self {
            raw: format!("{}.{}", major, minor),
            parts: vec![major, minor],
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn major(&self) -> u64 {
        self.parts.first().copied().unwrap_or_default()
    }

    /// Gateways below 4.0 speak the legacy token dialect
    pub fn is_version_3(&self) -> bool {
        *self < ApiVersion::new(4, 0)
    }
}

impl FromStr for ApiVersion {
    type Err = PowerFlexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                part.parse::<u64>().ok()
            })
            .collect::<Option<Vec<_>>>();

        match parts {
            Some(parts) => Ok(Self {
                raw: s.to_string(),
                parts,
            }),
            None => Err(PowerFlexError::client(
                format!(
                    "Failed to query PowerFlex API version. Invalid version format: {}.",
                    s
                ),
                None,
            )),
        }
    }
}

impl Ord for ApiVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        for i in 0..len {
            let a = self.parts.get(i).copied().unwrap_or(0);
            let b = other.parts.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for ApiVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ApiVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ApiVersion {}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// True when `version` is a dotted version strictly below 4.0.
///
/// Unparseable input is never treated as legacy.
pub fn is_version_3(version: &str) -> bool {
    ApiVersion::parse(version)
        .map(|v| v.is_version_3())
        .unwrap_or(false)
}

/// Substitute `{name}` placeholders in a path template.
///
/// Values are percent-encoded; unused parameters are ignored.
pub fn format_url(template: &str, url_params: &[(&str, &str)]) -> PowerFlexResult<String> {
    let mut formatted = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        formatted.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let end = after.find('}').ok_or_else(|| {
            PowerFlexError::UrlTemplate(format!("unclosed placeholder in '{}'", template))
        })?;
        let name = &after[..end];
        let value = url_params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
            .ok_or_else(|| {
                PowerFlexError::UrlTemplate(format!(
                    "missing parameter '{}' for '{}'",
                    name, template
                ))
            })?;
        formatted.push_str(&urlencoding::encode(value));
        rest = &after[end + 1..];
    }
    formatted.push_str(rest);

    Ok(formatted)
}

/// Stringify numbers and booleans the way the gateway expects them.
///
/// Booleans become `"True"`/`"False"`; arrays are converted element-wise and
/// every other value passes through untouched.
pub fn convert(param: &Value) -> Value {
    match param {
        Value::Array(items) => Value::Array(items.iter().map(convert).collect()),
        Value::Bool(true) => Value::String("True".to_string()),
        Value::Bool(false) => Value::String("False".to_string()),
        Value::Number(n) => Value::String(n.to_string()),
        other => other.clone(),
    }
}

/// Drop null parameters and convert the rest with [`convert`]
pub fn prepare_params(params: &Params) -> Params {
    params
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(name, value)| (name.clone(), convert(value)))
        .collect()
}

/// Build [`Params`] from a `json!` object literal
pub fn params(value: Value) -> Params {
    match value {
        Value::Object(map) => map,
        _ => Params::new(),
    }
}

/// Serialize a request model into [`Params`].
///
/// `None` fields serialize as nulls and are dropped by [`prepare_params`].
pub fn to_params<T: Serialize>(request: &T) -> PowerFlexResult<Params> {
    match serde_json::to_value(request)? {
        Value::Object(map) => Ok(map),
        other => Err(PowerFlexError::invalid_input(format!(
            "Request parameters must be an object, got {}.",
            other
        ))),
    }
}

fn as_list(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    }
}

/// Keep the items whose fields intersect every filter value.
///
/// Flat, case-sensitive matching; scalars count as one-element sets and
/// items missing a filtered key are dropped.
pub fn filter_response(response: Vec<Value>, filter_fields: &Params) -> Vec<Value> {
    response
        .into_iter()
        .filter(|item| {
            filter_fields.iter().all(|(key, wanted)| {
                let Some(actual) = item.get(key) else {
                    return false;
                };
                let wanted = as_list(wanted);
                as_list(actual)
                    .iter()
                    .any(|value| !value.is_object() && wanted.contains(value))
            })
        })
        .collect()
}

fn query_entity_fields(entity: &Value, fields: &[&str]) -> PowerFlexResult<Value> {
    let mut projected = Map::new();
    let mut missing = Vec::new();

    for field in fields {
        match entity.get(*field) {
            Some(value) => {
                projected.insert(field.to_string(), value.clone());
            }
            None => missing.push(*field),
        }
    }

    if !missing.is_empty() {
        let msg = format!(
            "The following fields are not found in response: {}.",
            missing.join(", ")
        );
        error!("{}", msg);
        return Err(PowerFlexError::FieldsNotFound(msg));
    }

    Ok(Value::Object(projected))
}

/// Project a response (an entity or a list of entities) onto `fields`
pub fn query_response_fields(response: &Value, fields: &[&str]) -> PowerFlexResult<Value> {
    match response {
        Value::Array(items) => items
            .iter()
            .map(|item| query_entity_fields(item, fields))
            .collect::<PowerFlexResult<Vec<_>>>()
            .map(Value::Array),
        other => query_entity_fields(other, fields),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dialect_follows_numeric_order() {
        assert!(is_version_3("3.5"));
        assert!(is_version_3("3.6.700"));
        assert!(!is_version_3("4.0"));
        assert!(!is_version_3("4.5"));
        assert!(!is_version_3("10.2"));
        assert!(!is_version_3("not-a-version"));
    }

    #[test]
    fn versions_compare_with_zero_padding() {
        let short = ApiVersion::parse("3.5").unwrap();
        let long = ApiVersion::parse("3.5.0").unwrap();
        assert_eq!(short, long);
        assert!(ApiVersion::parse("4.0").unwrap() < ApiVersion::parse("10.0").unwrap());
        assert!(ApiVersion::parse("3.").is_err());
        assert!(ApiVersion::parse("v4").is_err());
    }

    #[test]
    fn prepare_params_stringifies_and_drops_nulls() {
        let prepared = prepare_params(&params(json!({"a": 1, "b": true, "c": null})));
        let body = serde_json::to_string(&prepared).unwrap();
        let parsed: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed, json!({"a": "1", "b": "True"}));
    }

    #[test]
    fn convert_recurses_into_arrays_only() {
        assert_eq!(
            convert(&json!([1, false, "x"])),
            json!(["1", "False", "x"])
        );
        assert_eq!(convert(&json!({"n": 1})), json!({"n": 1}));
    }

    #[test]
    fn to_params_keeps_field_names() {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Rename {
            new_name: String,
            allow_on_ext_managed_vol: Option<bool>,
        }

        let prepared = prepare_params(
            &to_params(&Rename {
                new_name: "vol".to_string(),
                allow_on_ext_managed_vol: None,
            })
            .unwrap(),
        );
        assert_eq!(Value::Object(prepared), json!({"newName": "vol"}));
        assert!(to_params(&vec![1, 2]).is_err());
    }

    #[test]
    fn format_url_substitutes_placeholders() {
        let url = format_url(
            "/instances/{entity}::{entity_id}/action/{action}",
            &[("entity", "Volume"), ("entity_id", "v1"), ("action", "setVolumeName")],
        )
        .unwrap();
        assert_eq!(url, "/instances/Volume::v1/action/setVolumeName");
    }

    #[test]
    fn format_url_requires_every_placeholder() {
        let err = format_url("/instances/{entity}::{entity_id}", &[("entity", "Volume")]);
        assert!(matches!(err, Err(PowerFlexError::UrlTemplate(_))));
    }

    #[test]
    fn filter_treats_scalars_as_singletons() {
        let items = vec![
            json!({"id": "1", "name": "a", "tags": ["x", "y"]}),
            json!({"id": "2", "name": "b", "tags": ["z"]}),
            json!({"id": "3"}),
        ];
        let filtered = filter_response(items.clone(), &params(json!({"name": ["a", "b"]})));
        assert_eq!(filtered.len(), 2);

        let filtered = filter_response(items, &params(json!({"tags": "y"})));
        assert_eq!(filtered, vec![json!({"id": "1", "name": "a", "tags": ["x", "y"]})]);
    }

    #[test]
    fn projection_reports_missing_fields() {
        let items = json!([{"id": "1", "name": "a"}, {"id": "2"}]);
        let err = query_response_fields(&items, &["id", "name"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The following fields are not found in response: name."
        );

        let projected = query_response_fields(&json!({"id": "1", "name": "a"}), &["id"]).unwrap();
        assert_eq!(projected, json!({"id": "1"}));
    }
}
