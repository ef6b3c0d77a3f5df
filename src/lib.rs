/*
 * PowerFlex Client - Async Rust client for the PowerFlex (VxFlex OS) REST gateway
 */

// Internal modules
mod client;
pub mod models;
pub mod apis;
mod error;
mod auth;
mod configuration;
mod token;
pub mod utils;
pub mod entity;
pub mod constants;

// Re-export public types and interfaces
pub use client::{ApiResponse, PowerFlexClient, API_PREFIX};
pub use configuration::{Configuration, TlsVerification};
pub use token::Token;
pub use error::{PowerFlexError, PowerFlexResult};
pub use auth::{Authentication, Authenticator, BasicAuth, BearerAuth, Dialect};
pub use apis::{
    Credential, CredentialApi, CredentialKind, Gen1Resources, Gen2Resources, ResourceSet,
    Resources, SystemApi, UtilityApi,
};
pub use utils::{ApiVersion, Params};

// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        PowerFlexClient, Configuration,
        PowerFlexError, PowerFlexResult,
        ApiVersion, Params, ResourceSet, Resources,
        Credential, CredentialKind,
        // Common request types
        models::{
            DeviceCreateRequest, SnapshotDef, StoragePoolCreateRequest, VolumeCreateRequest,
        },
    };
}
