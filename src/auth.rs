use crate::{
    configuration::Configuration,
    error::{PowerFlexError, PowerFlexResult},
    token::Token,
    utils::ApiVersion,
};
use base64::{engine::general_purpose, Engine};
use bytes::Bytes;
use log::{debug, error, info};
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client, Method, StatusCode,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use url::Url;

/// Authentication trait for PowerFlex gateway requests
#[async_trait::async_trait]
pub trait Authentication: Send + Sync {
    /// Apply authentication to the request headers
    async fn apply_auth(&self, headers: &mut HeaderMap) -> PowerFlexResult<()>;
}

/// Basic authentication; the secret is either the password or a session token
#[derive(Clone)]
pub struct BasicAuth {
    username: String,
    secret: String,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: secret.into(),
        }
    }
}

#[async_trait::async_trait]
impl Authentication for BasicAuth {
    async fn apply_auth(&self, headers: &mut HeaderMap) -> PowerFlexResult<()> {
        let credentials = format!("{}:{}", self.username, self.secret);
        let encoded = general_purpose::STANDARD.encode(credentials.as_bytes());
        let auth_value = format!("Basic {}", encoded);

        headers.insert(
            reqwest::header::AUTHORIZATION,
            auth_value.parse().map_err(|e| {
                PowerFlexError::InvalidInput(format!("Invalid auth header: {}", e))
            })?,
        );

        Ok(())
    }
}

/// Bearer token authentication
#[derive(Clone)]
pub struct BearerAuth {
    token: String,
}

impl BearerAuth {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait::async_trait]
impl Authentication for BearerAuth {
    async fn apply_auth(&self, headers: &mut HeaderMap) -> PowerFlexResult<()> {
        let auth_value = format!("Bearer {}", self.token);
        headers.insert(
            reqwest::header::AUTHORIZATION,
            auth_value.parse().map_err(|e| {
                PowerFlexError::InvalidInput(format!("Invalid auth header: {}", e))
            })?,
        );

        Ok(())
    }
}

/// Login dialect spoken by the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Pre-4.0 gateways: basic-auth login returning a bare token
    Legacy,
    /// 4.0+ management appliance: JSON login returning access/refresh tokens
    Appliance,
}

impl Dialect {
    pub fn for_version(version: &ApiVersion) -> Self {
        if version.is_version_3() {
            Dialect::Legacy
        } else {
            Dialect::Appliance
        }
    }
}

/// Interpret a gateway body that carries a single string.
///
/// The gateway JSON-quotes bare strings; unquoted text is accepted as-is.
pub(crate) fn body_string(body: &[u8]) -> String {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::String(s)) => s,
        _ => String::from_utf8_lossy(body).trim().to_string(),
    }
}

/// Parse a body for error context, keeping non-JSON text as a string
pub(crate) fn body_value(body: &[u8]) -> Option<Value> {
    if body.is_empty() {
        return None;
    }
    Some(
        serde_json::from_slice(body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned())),
    )
}

/// Performs the version query and the login/logout handshakes of both dialects
pub struct Authenticator {
    http: Client,
    configuration: Arc<Configuration>,
    token: Token,
    gateway_url: Url,
    refresh_token: Mutex<Option<String>>,
}

impl Authenticator {
    pub fn new(
        http: Client,
        configuration: Arc<Configuration>,
        token: Token,
        gateway_url: Url,
    ) -> Self {
        Self {
            http,
            configuration,
            token,
            gateway_url,
            refresh_token: Mutex::new(None),
        }
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    fn password_auth(&self) -> BasicAuth {
        BasicAuth::new(&self.configuration.username, &self.configuration.password)
    }

    fn token_auth(&self) -> BasicAuth {
        BasicAuth::new(&self.configuration.username, self.token.get())
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        headers: HeaderMap,
        body: Option<Value>,
    ) -> PowerFlexResult<(StatusCode, Bytes)> {
        let url = self.gateway_url.join(path)?;
        debug!("HTTP {} {}", method, url);

        let mut request = self
            .http
            .request(method, url)
            .headers(headers)
            .timeout(self.configuration.timeout);
        if let Some(body) = body {
            request = request.body(body.to_string());
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!("HTTP response {} for {}", status, path);

        Ok((status, body))
    }

    /// Query the gateway version with the configured credentials
    pub async fn get_api_version(&self) -> PowerFlexResult<ApiVersion> {
        let mut headers = HeaderMap::new();
        self.password_auth().apply_auth(&mut headers).await?;

        let (status, body) = self.send(Method::GET, "/api/version", headers, None).await?;
        if status != StatusCode::OK {
            let err = PowerFlexError::fail_querying("API version", None, body_value(&body));
            error!("{}", err);
            return Err(err);
        }

        let version = ApiVersion::parse(&body_string(&body)).inspect_err(|e| error!("{}", e))?;
        debug!("PowerFlex API version {}", version);
        Ok(version)
    }

    /// Query the version, then log in with the matching dialect.
    ///
    /// Returns the queried version so callers can pick headers without
    /// probing again.
    pub async fn login(&self) -> PowerFlexResult<ApiVersion> {
        let version = self.get_api_version().await?;
        match Dialect::for_version(&version) {
            Dialect::Legacy => self.legacy_login().await?,
            Dialect::Appliance => self.appliance_login().await?,
        }
        Ok(version)
    }

    /// Log out using the dialect of an already known version
    pub async fn logout(&self, version: &ApiVersion) -> PowerFlexResult<()> {
        match Dialect::for_version(version) {
            Dialect::Legacy => self.legacy_logout().await,
            Dialect::Appliance => self.appliance_logout().await,
        }
    }

    async fn legacy_login(&self) -> PowerFlexResult<()> {
        let mut headers = HeaderMap::new();
        self.password_auth().apply_auth(&mut headers).await?;

        let (status, body) = self.send(Method::GET, "/api/login", headers, None).await?;
        if status.as_u16() >= 400 {
            let err = PowerFlexError::fail_querying("token", None, body_value(&body));
            error!("{}", err);
            return Err(err);
        }

        self.token.set(body_string(&body));
        info!("Logged in to PowerFlex gateway {}", self.configuration.gateway_address);
        Ok(())
    }

    async fn legacy_logout(&self) -> PowerFlexResult<()> {
        if !self.token.is_set() {
            return Ok(());
        }

        let mut headers = HeaderMap::new();
        self.token_auth().apply_auth(&mut headers).await?;

        let (status, body) = self.send(Method::GET, "/api/logout", headers, None).await?;
        if status != StatusCode::OK {
            let err = PowerFlexError::client(
                "Failed to logout from PowerFlex gateway.",
                body_value(&body),
            );
            error!("{}", err);
            return Err(err);
        }

        self.token.clear();
        Ok(())
    }

    async fn appliance_login(&self) -> PowerFlexResult<()> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let payload = json!({
            "username": self.configuration.username,
            "password": self.configuration.password,
        });

        let (status, body) = self
            .send(Method::POST, "/rest/auth/login", headers, Some(payload))
            .await?;
        if status != StatusCode::OK {
            let err = PowerFlexError::fail_querying("token", None, body_value(&body));
            error!("{}", err);
            return Err(err);
        }

        let tokens: Value = serde_json::from_slice(&body)?;
        let access_token = tokens
            .get("access_token")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                PowerFlexError::InvalidResponse("login response has no access_token".to_string())
            })?;
        let refresh_token = tokens
            .get("refresh_token")
            .and_then(Value::as_str)
            .map(str::to_string);

        self.token.set(access_token);
        *self.refresh_token.lock().unwrap_or_else(|e| e.into_inner()) = refresh_token;
        info!("Logged in to PowerFlex appliance {}", self.configuration.gateway_address);
        Ok(())
    }

    async fn appliance_logout(&self) -> PowerFlexResult<()> {
        let refresh_token = self
            .refresh_token
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();

        let headers = self.get_auth_headers(&Method::POST).await?;
        let payload = json!({ "refresh_token": refresh_token });

        let (status, body) = self
            .send(Method::POST, "/rest/auth/logout", headers, Some(payload))
            .await?;
        if status != StatusCode::NO_CONTENT {
            let err = PowerFlexError::client(
                "Failed to logout from PowerFlex appliance.",
                body_value(&body),
            );
            error!("{}", err);
            return Err(err);
        }

        self.token.clear();
        *self.refresh_token.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }

    /// Appliance headers: bearer only for GET, bearer plus JSON content type otherwise
    pub async fn get_auth_headers(&self, method: &Method) -> PowerFlexResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        BearerAuth::new(self.token.get()).apply_auth(&mut headers).await?;
        if *method != Method::GET {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        Ok(headers)
    }

    /// Headers for a main request in the given dialect
    pub async fn request_headers(
        &self,
        dialect: Dialect,
        method: &Method,
    ) -> PowerFlexResult<HeaderMap> {
        match dialect {
            Dialect::Appliance => self.get_auth_headers(method).await,
            Dialect::Legacy => self.basic_token_headers(method).await,
        }
    }

    /// Basic (username, token) headers regardless of dialect
    pub async fn basic_token_headers(&self, method: &Method) -> PowerFlexResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        self.token_auth().apply_auth(&mut headers).await?;
        if *method != Method::GET {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        Ok(headers)
    }
}
