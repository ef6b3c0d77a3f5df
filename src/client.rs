use crate::{
    apis::{CredentialApi, Gen1Resources, Gen2Resources, ResourceSet, Resources, SystemApi, UtilityApi},
    auth::{body_value, Authenticator, Dialect},
    configuration::{Configuration, TlsVerification},
    entity::METRICS_QUERY_PATH,
    error::{PowerFlexError, PowerFlexResult},
    token::Token,
    utils::{format_url, prepare_params, ApiVersion, Params},
};
use bytes::Bytes;
use log::{debug, info};
use reqwest::{header::HeaderMap, Certificate, Client, Method, StatusCode};
use serde_json::Value;
use std::sync::{Arc, RwLock};
use tokio::sync::Mutex;
use url::Url;

/// Prefix of every REST resource path on the gateway
pub const API_PREFIX: &str = "/api";

/// Status and parsed body of one gateway call
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Option<Value>,
}

impl ApiResponse {
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }

    /// Body, or `Value::Null` when the gateway sent none
    pub fn into_body(self) -> Value {
        self.body.unwrap_or(Value::Null)
    }
}

/// Request payload variants
pub(crate) enum RequestBody {
    Empty,
    Json(Params),
    Text(String),
}

/// Which credentials the main request carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AuthScheme {
    /// Follow the dialect of the queried version
    Dialect,
    /// Basic (username, token) regardless of dialect
    BasicToken,
}

#[derive(Debug, Clone)]
struct Initialized {
    api_version: ApiVersion,
    resource_set: ResourceSet,
}

/// Main PowerFlex client
#[derive(Clone)]
pub struct PowerFlexClient {
    client: Client,
    configuration: Arc<Configuration>,
    gateway_url: Url,
    authenticator: Arc<Authenticator>,
    session: Arc<Mutex<()>>,
    state: Arc<RwLock<Option<Initialized>>>,
    pub(crate) api_version_cache: Arc<RwLock<Option<ApiVersion>>>,
}

impl PowerFlexClient {
    /// Create a new client for `https://{gateway_address}:{gateway_port}`
    pub fn new(configuration: Configuration) -> PowerFlexResult<Self> {
        configuration.validate()?;

        let mut builder = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(configuration.timeout);

        builder = match configuration.tls_verification() {
            TlsVerification::Disabled => builder.danger_accept_invalid_certs(true),
            TlsVerification::SystemRoots => builder,
            TlsVerification::CaBundle(path) => {
                let pem = std::fs::read(&path)?;
                builder.add_root_certificate(Certificate::from_pem(&pem)?)
            }
        };

        let gateway_url = format!(
            "https://{}:{}",
            configuration.gateway_address, configuration.gateway_port
        );
        Self::with_client(builder.build()?, configuration, gateway_url)
    }

    /// Create a new client with a custom reqwest client and gateway URL
    pub fn with_client(
        client: Client,
        configuration: Configuration,
        gateway_url: impl AsRef<str>,
    ) -> PowerFlexResult<Self> {
        let gateway_url = Url::parse(gateway_url.as_ref())?;
        let configuration = Arc::new(configuration);
        let authenticator = Authenticator::new(
            client.clone(),
            configuration.clone(),
            Token::new(),
            gateway_url.clone(),
        );

        Ok(Self {
            client,
            configuration,
            gateway_url,
            authenticator: Arc::new(authenticator),
            session: Arc::new(Mutex::new(())),
            state: Arc::new(RwLock::new(None)),
            api_version_cache: Arc::new(RwLock::new(None)),
        })
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Session token shared by every accessor of this client
    pub fn token(&self) -> &Token {
        self.authenticator.token()
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    pub fn gateway_url(&self) -> &Url {
        &self.gateway_url
    }

    /// Validate the configuration, query the API version and select the
    /// resource set matching it.
    pub async fn initialize(&self) -> PowerFlexResult<()> {
        self.configuration.validate()?;
        if let Some(level) = self.configuration.log_level {
            log::set_max_level(level);
        }

        let api_version = SystemApi::new(self).api_version(false).await?;
        if api_version < ApiVersion::new(3, 0) {
            return Err(PowerFlexError::client(
                "PowerFlex (VxFlex OS) versions lower than 3.0 are not supported.",
                None,
            ));
        }

        let resource_set = ResourceSet::for_version(&api_version);
        info!(
            "PowerFlex client initialized for API version {} ({:?} resources)",
            api_version, resource_set
        );
        // Re-initializing replaces the selected resource set
        *self.state.write().unwrap_or_else(|e| e.into_inner()) = Some(Initialized {
            api_version,
            resource_set,
        });
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    fn initialized(&self) -> PowerFlexResult<Initialized> {
        self.state
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .ok_or(PowerFlexError::ClientNotInitialized)
    }

    /// Resource set selected by `initialize()`
    pub fn resource_set(&self) -> PowerFlexResult<ResourceSet> {
        Ok(self.initialized()?.resource_set)
    }

    /// Get System API
    pub fn system(&self) -> PowerFlexResult<SystemApi<'_>> {
        self.initialized()?;
        Ok(SystemApi::new(self))
    }

    /// Get Utility API
    pub fn utility(&self) -> PowerFlexResult<UtilityApi<'_>> {
        self.initialized()?;
        Ok(UtilityApi::new(self))
    }

    /// Get Credential API
    pub fn credential(&self) -> PowerFlexResult<CredentialApi<'_>> {
        self.initialized()?;
        Ok(CredentialApi::new(self))
    }

    /// Get the resource table matching the queried API version
    pub fn resources(&self) -> PowerFlexResult<Resources<'_>> {
        Ok(match self.initialized()?.resource_set {
            ResourceSet::Gen1 => Resources::Gen1(Gen1Resources::new(self)),
            ResourceSet::Gen2 => Resources::Gen2(Gen2Resources::new(self)),
        })
    }

    /// Get the pre-5.0 resource table
    pub fn gen1(&self) -> PowerFlexResult<Gen1Resources<'_>> {
        match self.resources()? {
            Resources::Gen1(resources) => Ok(resources),
            Resources::Gen2(_) => Err(self.unsupported(ResourceSet::Gen1)),
        }
    }

    /// Get the 5.0+ resource table
    pub fn gen2(&self) -> PowerFlexResult<Gen2Resources<'_>> {
        match self.resources()? {
            Resources::Gen2(resources) => Ok(resources),
            Resources::Gen1(_) => Err(self.unsupported(ResourceSet::Gen2)),
        }
    }

    fn unsupported(&self, resource_set: ResourceSet) -> PowerFlexError {
        PowerFlexError::UnsupportedResourceSet {
            resource_set: resource_set.name(),
            api_version: self
                .initialized()
                .map(|s| s.api_version.to_string())
                .unwrap_or_default(),
        }
    }

    /// Perform one authenticated call: login, request, logout.
    ///
    /// The session lock is held for the whole sequence so concurrent calls on
    /// one client never observe each other's token.
    pub(crate) async fn send_raw(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        scheme: AuthScheme,
        extra_headers: HeaderMap,
    ) -> PowerFlexResult<(StatusCode, Bytes)> {
        let url = self.gateway_url.join(path)?;
        let _session = self.session.lock().await;

        let version = self.authenticator.login().await?;
        let mut headers = match scheme {
            AuthScheme::Dialect => {
                self.authenticator
                    .request_headers(Dialect::for_version(&version), &method)
                    .await?
            }
            AuthScheme::BasicToken => self.authenticator.basic_token_headers(&method).await?,
        };
        for (name, value) in extra_headers.iter() {
            headers.insert(name.clone(), value.clone());
        }

        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .headers(headers)
            .timeout(self.configuration.timeout);

        match body {
            RequestBody::Json(params) if method == Method::POST || method == Method::PUT => {
                let payload = serde_json::to_string(&prepare_params(&params))?;
                debug!("REST Request: {} {} with body {}", method, url, payload);
                request = request.body(payload);
            }
            RequestBody::Text(payload) => {
                debug!("REST Request: {} {} with text body", method, url);
                request = request.body(payload);
            }
            _ => debug!("REST Request: {} {}", method, url),
        }

        let response = request.send().await?;
        let status = response.status();
        let raw = response.bytes().await?;
        debug!(
            "REST Response: {} with data {}",
            status,
            String::from_utf8_lossy(&raw)
        );

        self.authenticator.logout(&version).await?;
        Ok((status, raw))
    }

    /// Send a request to an `/api` path template.
    ///
    /// `url_params` fill the `{name}` placeholders of `url_template`;
    /// `params` become the JSON body of POST and PUT requests.
    pub async fn send_request(
        &self,
        method: Method,
        url_template: &str,
        params: Option<&Params>,
        url_params: &[(&str, &str)],
    ) -> PowerFlexResult<ApiResponse> {
        let path = format!("{}{}", API_PREFIX, format_url(url_template, url_params)?);
        let body = match params {
            Some(params) => RequestBody::Json(params.clone()),
            None if method == Method::POST || method == Method::PUT => {
                RequestBody::Json(Params::new())
            }
            None => RequestBody::Empty,
        };

        let (status, raw) = self
            .send_raw(method, &path, body, AuthScheme::Dialect, HeaderMap::new())
            .await?;
        Ok(ApiResponse {
            status,
            body: parse_body(status, &raw)?,
        })
    }

    pub async fn send_get_request(
        &self,
        url_template: &str,
        url_params: &[(&str, &str)],
    ) -> PowerFlexResult<ApiResponse> {
        self.send_request(Method::GET, url_template, None, url_params)
            .await
    }

    pub async fn send_post_request(
        &self,
        url_template: &str,
        params: Option<&Params>,
        url_params: &[(&str, &str)],
    ) -> PowerFlexResult<ApiResponse> {
        self.send_request(Method::POST, url_template, params, url_params)
            .await
    }

    pub async fn send_put_request(
        &self,
        url_template: &str,
        params: Option<&Params>,
        url_params: &[(&str, &str)],
    ) -> PowerFlexResult<ApiResponse> {
        self.send_request(Method::PUT, url_template, params, url_params)
            .await
    }

    pub async fn send_delete_request(
        &self,
        url_template: &str,
        url_params: &[(&str, &str)],
    ) -> PowerFlexResult<ApiResponse> {
        self.send_request(Method::DELETE, url_template, None, url_params)
            .await
    }

    /// POST a query to the 5.0+ metrics service, outside the `/api` prefix
    pub async fn send_metrics_request(&self, params: &Params) -> PowerFlexResult<ApiResponse> {
        let (status, raw) = self
            .send_raw(
                Method::POST,
                METRICS_QUERY_PATH,
                RequestBody::Json(params.clone()),
                AuthScheme::Dialect,
                HeaderMap::new(),
            )
            .await?;
        Ok(ApiResponse {
            status,
            body: parse_body(status, &raw)?,
        })
    }

    /// POST for MDM cluster endpoints.
    ///
    /// Always uses basic (username, token) auth and treats an empty body as
    /// "no content"; those endpoints may answer with nothing on success.
    pub async fn send_mdm_cluster_post_request(
        &self,
        url_template: &str,
        params: Option<&Params>,
        url_params: &[(&str, &str)],
    ) -> PowerFlexResult<ApiResponse> {
        let path = format!("{}{}", API_PREFIX, format_url(url_template, url_params)?);
        let body = RequestBody::Json(params.cloned().unwrap_or_default());

        let (status, raw) = self
            .send_raw(Method::POST, &path, body, AuthScheme::BasicToken, HeaderMap::new())
            .await?;
        Ok(ApiResponse {
            status,
            body: body_value(&raw),
        })
    }
}

/// Empty bodies parse to `None`; error bodies that are not JSON are kept as text
fn parse_body(status: StatusCode, raw: &[u8]) -> PowerFlexResult<Option<Value>> {
    if raw.is_empty() {
        return Ok(None);
    }
    if status.is_success() {
        Ok(Some(serde_json::from_slice(raw)?))
    } else {
        Ok(body_value(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_body_handles_empty_and_errors() {
        assert!(parse_body(StatusCode::NO_CONTENT, b"").unwrap().is_none());
        assert_eq!(
            parse_body(StatusCode::OK, b"{\"id\":\"v1\"}").unwrap(),
            Some(serde_json::json!({"id": "v1"}))
        );
        assert!(parse_body(StatusCode::OK, b"not json").is_err());
        assert_eq!(
            parse_body(StatusCode::INTERNAL_SERVER_ERROR, b"boom").unwrap(),
            Some(Value::String("boom".into()))
        );
    }

    #[tokio::test]
    async fn accessors_require_initialize() {
        let client = PowerFlexClient::new(Configuration::new("1.2.3.4", "admin", "admin"))
            .expect("Failed to create client");
        assert!(!client.is_initialized());
        assert!(matches!(client.system(), Err(PowerFlexError::ClientNotInitialized)));
        assert!(matches!(client.resources(), Err(PowerFlexError::ClientNotInitialized)));
        assert!(matches!(client.gen1(), Err(PowerFlexError::ClientNotInitialized)));
    }

    #[test]
    fn new_rejects_incomplete_configuration() {
        let result = PowerFlexClient::new(Configuration::new("1.2.3.4", "admin", ""));
        assert!(matches!(result, Err(PowerFlexError::InvalidConfiguration(_))));
    }
}
