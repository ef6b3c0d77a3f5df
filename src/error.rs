use serde_json::Value;
use thiserror::Error;

/// PowerFlex client error types
#[derive(Error, Debug)]
pub enum PowerFlexError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization/deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parsing failed: {0}")]
    Url(#[from] url::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML serialization failed: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Failed to format URL template: {0}")]
    UrlTemplate(String),

    #[error("PowerFlex Client is not initialized. Call `.initialize()` to proceed.")]
    ClientNotInitialized,

    #[error("{resource_set} resources are not available for PowerFlex API version {api_version}.")]
    UnsupportedResourceSet {
        resource_set: &'static str,
        api_version: String,
    },

    #[error("{0}")]
    InvalidConfiguration(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    FieldsNotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Failed to query PowerFlex {entity}{}.{}", with_id(.entity_id), with_body(.response))]
    FailQuerying {
        entity: String,
        entity_id: Option<String>,
        response: Option<Value>,
    },

    #[error("Failed to create PowerFlex {entity}.{}", with_body(.response))]
    FailCreating {
        entity: String,
        response: Option<Value>,
    },

    #[error("Failed to delete PowerFlex {entity} with id {entity_id}.{}", with_body(.response))]
    FailDeleting {
        entity: String,
        entity_id: String,
        response: Option<Value>,
    },

    #[error("Failed to rename PowerFlex {entity} with id {entity_id}.{}", with_body(.response))]
    FailRenaming {
        entity: String,
        entity_id: String,
        response: Option<Value>,
    },

    #[error("Failed to perform {action} on PowerFlex {entity}{}.{}", with_id(.entity_id), with_body(.response))]
    FailEntityOperation {
        entity: String,
        entity_id: Option<String>,
        action: String,
        response: Option<Value>,
    },

    #[error("Failed to migrate PowerFlex {entity} with id {entity_id}.{}", with_body(.response))]
    FailMigration {
        entity: String,
        entity_id: String,
        response: Option<Value>,
    },

    #[error("The {param} of PowerFlex {entity}{} can not be updated.", with_id(.entity_id))]
    NotUpdatable {
        param: &'static str,
        entity: String,
        entity_id: Option<String>,
    },

    #[error("Credential operations are not supported for PowerFlex Gateway version {0}")]
    CredentialNotSupported(String),

    #[error("Invalid credential type{}", with_type(.0))]
    CredentialTypeError(Option<String>),

    #[error("Failed to {operation} PowerFlex credential{}. Error: {message}", with_id(.credential_id))]
    FailCredentialOperation {
        credential_id: Option<String>,
        operation: String,
        message: String,
    },

    #[error("{message}")]
    Client {
        message: String,
        response: Option<Value>,
    },
}

fn with_id(entity_id: &Option<String>) -> String {
    match entity_id {
        Some(id) => format!(" with id {}", id),
        None => String::new(),
    }
}

fn with_type(credential_type: &Option<String>) -> String {
    match credential_type {
        Some(kind) => format!(": {}", kind),
        None => String::new(),
    }
}

fn with_body(response: &Option<Value>) -> String {
    match response {
        Some(body) => format!(" Error: {}", body),
        None => String::new(),
    }
}

/// Result type for PowerFlex operations
pub type PowerFlexResult<T> = Result<T, PowerFlexError>;

impl PowerFlexError {
    pub fn fail_querying(
        entity: impl Into<String>,
        entity_id: Option<&str>,
        response: Option<Value>,
    ) -> Self {
        Self::FailQuerying {
            entity: entity.into(),
            entity_id: entity_id.map(str::to_string),
            response,
        }
    }

    pub fn fail_creating(entity: impl Into<String>, response: Option<Value>) -> Self {
        Self::FailCreating {
            entity: entity.into(),
            response,
        }
    }

    pub fn fail_deleting(
        entity: impl Into<String>,
        entity_id: impl Into<String>,
        response: Option<Value>,
    ) -> Self {
        Self::FailDeleting {
            entity: entity.into(),
            entity_id: entity_id.into(),
            response,
        }
    }

    pub fn fail_renaming(
        entity: impl Into<String>,
        entity_id: impl Into<String>,
        response: Option<Value>,
    ) -> Self {
        Self::FailRenaming {
            entity: entity.into(),
            entity_id: entity_id.into(),
            response,
        }
    }

    pub fn fail_entity_operation(
        entity: impl Into<String>,
        entity_id: Option<&str>,
        action: impl Into<String>,
        response: Option<Value>,
    ) -> Self {
        Self::FailEntityOperation {
            entity: entity.into(),
            entity_id: entity_id.map(str::to_string),
            action: action.into(),
            response,
        }
    }

    /// Create a generic client error carrying the gateway response
    pub fn client(message: impl Into<String>, response: Option<Value>) -> Self {
        Self::Client {
            message: message.into(),
            response,
        }
    }

    pub fn not_updatable(
        param: &'static str,
        entity: impl Into<String>,
        entity_id: Option<&str>,
    ) -> Self {
        Self::NotUpdatable {
            param,
            entity: entity.into(),
            entity_id: entity_id.map(str::to_string),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Raw gateway response body attached to the error, if any
    pub fn response(&self) -> Option<&Value> {
        match self {
            Self::FailQuerying { response, .. }
            | Self::FailCreating { response, .. }
            | Self::FailDeleting { response, .. }
            | Self::FailRenaming { response, .. }
            | Self::FailEntityOperation { response, .. }
            | Self::FailMigration { response, .. }
            | Self::Client { response, .. } => response.as_ref(),
            _ => None,
        }
    }
}
