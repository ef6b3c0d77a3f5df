use crate::{
    apis::SystemApi,
    auth::body_value,
    client::{AuthScheme, PowerFlexClient, RequestBody},
    error::{PowerFlexError, PowerFlexResult},
    utils::format_url,
};
use log::{error, info, warn};
use quick_xml::{
    events::{BytesEnd, BytesStart, BytesText, Event},
    Writer,
};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE},
    Method, StatusCode,
};
use serde_json::Value;
use std::{fmt, str::FromStr};

/// Credential endpoint of the gateway (4.0+)
pub const CREDENTIAL_PATH: &str = "/api/Api/V1/Credential";
const CREDENTIAL_ID_PATH: &str = "/api/Api/V1/Credential/{id}";

fn credential_path(credential_id: &str) -> PowerFlexResult<String> {
    format_url(CREDENTIAL_ID_PATH, &[("id", credential_id)])
}

/// Kind of managed credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialKind {
    Server,
    Iom,
    VCenter,
    ElementManager,
    ScaleIo,
    PresentationServer,
    Os,
    OsUser,
}

impl CredentialKind {
    pub const ALL: [CredentialKind; 8] = [
        CredentialKind::Server,
        CredentialKind::Iom,
        CredentialKind::VCenter,
        CredentialKind::ElementManager,
        CredentialKind::ScaleIo,
        CredentialKind::PresentationServer,
        CredentialKind::Os,
        CredentialKind::OsUser,
    ];

    /// XML element and JSON key used by the gateway
    pub fn tag(self) -> &'static str {
        match self {
            CredentialKind::Server => "serverCredential",
            CredentialKind::Iom => "iomCredential",
            CredentialKind::VCenter => "vCenterCredential",
            CredentialKind::ElementManager => "emCredential",
            CredentialKind::ScaleIo => "scaleIOCredential",
            CredentialKind::PresentationServer => "psCredential",
            CredentialKind::Os => "osCredential",
            CredentialKind::OsUser => "osUserCredential",
        }
    }

    /// Whether the gateway accepts a `domain` for this kind
    pub fn supports_domain(self) -> bool {
        matches!(
            self,
            CredentialKind::VCenter
                | CredentialKind::ElementManager
                | CredentialKind::PresentationServer
                | CredentialKind::Os
                | CredentialKind::OsUser
        )
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

impl FromStr for CredentialKind {
    type Err = PowerFlexError;

    /// Accepts `server`, `vcenter`, `serverCredential`, ... in any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let short = lower.strip_suffix("credential").unwrap_or(&lower);
        Self::ALL
            .into_iter()
            .find(|kind| {
                let tag = kind.tag().to_ascii_lowercase();
                tag.strip_suffix("credential") == Some(short)
            })
            .ok_or_else(|| PowerFlexError::CredentialTypeError(Some(s.to_string())))
    }
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A credential as sent to the gateway
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub kind: CredentialKind,
    pub label: String,
    pub username: String,
    pub password: String,
    pub domain: Option<String>,
}

impl Credential {
    pub fn new(
        kind: CredentialKind,
        label: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            label: label.into(),
            username: username.into(),
            password: password.into(),
            domain: None,
        }
    }

    /// Set the domain; ignored for kinds that have none
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        if self.kind.supports_domain() {
            self.domain = Some(domain.into());
        }
        self
    }

    /// Build a credential from a type name such as `"vcenter"`
    pub fn create(
        credential_type: &str,
        label: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        domain: Option<&str>,
    ) -> PowerFlexResult<Self> {
        let kind: CredentialKind = credential_type.parse()?;
        let credential = Self::new(kind, label, username, password);
        Ok(match domain {
            Some(domain) => credential.with_domain(domain),
            None => credential,
        })
    }

    /// Render as `<asmCredential><{tag}>...</{tag}></asmCredential>`
    pub fn to_xml(&self) -> PowerFlexResult<String> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Start(BytesStart::new("asmCredential")))?;
        writer.write_event(Event::Start(BytesStart::new(self.kind.tag())))?;
        write_element(&mut writer, "label", &self.label)?;
        write_element(&mut writer, "username", &self.username)?;
        write_element(&mut writer, "password", &self.password)?;
        if let Some(domain) = self.domain.as_deref().filter(|_| self.kind.supports_domain()) {
            write_element(&mut writer, "domain", domain)?;
        }
        writer.write_event(Event::End(BytesEnd::new(self.kind.tag())))?;
        writer.write_event(Event::End(BytesEnd::new("asmCredential")))?;
        Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
    }
}

fn write_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> PowerFlexResult<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("kind", &self.kind)
            .field("label", &self.label)
            .field("username", &self.username)
            .field("password", &"***")
            .field("domain", &self.domain)
            .finish()
    }
}

/// Credential management, PowerFlex Gateway 4.0+
pub struct CredentialApi<'a> {
    client: &'a PowerFlexClient,
}

impl<'a> CredentialApi<'a> {
    pub fn new(client: &'a PowerFlexClient) -> Self {
        Self { client }
    }

    async fn check_gateway_version(&self) -> PowerFlexResult<()> {
        let version = SystemApi::new(self.client).api_version(true).await?;
        if version.major() < 4 {
            let err = PowerFlexError::CredentialNotSupported(version.to_string());
            error!("{}", err);
            return Err(err);
        }
        Ok(())
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        headers: HeaderMap,
    ) -> PowerFlexResult<(StatusCode, Option<Value>)> {
        let (status, raw) = self
            .client
            .send_raw(method, path, body, AuthScheme::Dialect, headers)
            .await?;
        Ok((status, body_value(&raw)))
    }

    fn xml_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/xml"));
        headers
    }

    /// Create a credential and return the gateway's record of it
    pub async fn create(&self, credential: &Credential) -> PowerFlexResult<Value> {
        self.check_gateway_version().await?;
        self.verify_credential(credential)?;
        info!("Creating PowerFlex {} '{}'", credential.kind, credential.label);

        let (status, body) = self
            .send(
                Method::POST,
                CREDENTIAL_PATH,
                RequestBody::Text(credential.to_xml()?),
                Self::xml_headers(),
            )
            .await?;
        if status != StatusCode::OK {
            let err = PowerFlexError::fail_creating("Credential", body);
            error!("{}", err);
            return Err(err);
        }
        Ok(body.unwrap_or(Value::Null))
    }

    /// Get one credential, or all of them
    pub async fn get(&self, credential_id: Option<&str>) -> PowerFlexResult<Value> {
        self.check_gateway_version().await?;
        let path = match credential_id {
            Some(id) => credential_path(id)?,
            None => CREDENTIAL_PATH.to_string(),
        };
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let (status, body) = self
            .send(Method::GET, &path, RequestBody::Empty, headers)
            .await?;
        if status != StatusCode::OK {
            let err = PowerFlexError::client("Failed to get PowerFlex credentials.", body);
            error!("{}", err);
            return Err(err);
        }
        Ok(body.unwrap_or(Value::Null))
    }

    /// Replace the credential stored under `credential_id`
    pub async fn update(&self, credential_id: &str, credential: &Credential) -> PowerFlexResult<Value> {
        self.check_gateway_version().await?;
        self.verify_credential(credential)?;
        info!("Updating PowerFlex credential {}", credential_id);

        let (status, body) = self
            .send(
                Method::PUT,
                &credential_path(credential_id)?,
                RequestBody::Text(credential.to_xml()?),
                Self::xml_headers(),
            )
            .await?;
        if status != StatusCode::OK {
            return Err(credential_failure(credential_id, "update", body));
        }
        Ok(body.unwrap_or(Value::Null))
    }

    pub async fn delete(&self, credential_id: &str) -> PowerFlexResult<Value> {
        self.check_gateway_version().await?;
        info!("Deleting PowerFlex credential {}", credential_id);

        let (status, body) = self
            .send(
                Method::DELETE,
                &credential_path(credential_id)?,
                RequestBody::Empty,
                HeaderMap::new(),
            )
            .await?;
        if status != StatusCode::OK {
            return Err(credential_failure(credential_id, "delete", body));
        }
        Ok(body.unwrap_or(Value::Null))
    }

    /// Check that the required fields are present.
    ///
    /// A domain on a kind without domain support only logs a warning.
    pub fn verify_credential(&self, credential: &Credential) -> PowerFlexResult<bool> {
        for (field, value) in [
            ("label", &credential.label),
            ("username", &credential.username),
            ("password", &credential.password),
        ] {
            if value.is_empty() {
                return Err(PowerFlexError::invalid_input(format!(
                    "Credential must have a {}",
                    field
                )));
            }
        }
        if credential.domain.is_some() && !credential.kind.supports_domain() {
            warn!(
                "Domain is not supported for {} and will be ignored",
                credential.kind
            );
        }
        Ok(true)
    }

    /// Kind of a credential as returned by the gateway, read from its key
    pub fn get_credential_type(&self, credential: &Value) -> PowerFlexResult<CredentialKind> {
        credential
            .as_object()
            .and_then(|object| object.keys().find_map(|key| CredentialKind::from_tag(key)))
            .ok_or_else(|| {
                PowerFlexError::client("Unable to determine credential type.", Some(credential.clone()))
            })
    }
}

fn credential_failure(credential_id: &str, operation: &str, body: Option<Value>) -> PowerFlexError {
    let err = PowerFlexError::FailCredentialOperation {
        credential_id: Some(credential_id.to_string()),
        operation: operation.to_string(),
        message: body.map(|b| b.to_string()).unwrap_or_default(),
    };
    error!("{}", err);
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_accepts_short_and_full_names() {
        assert_eq!("server".parse::<CredentialKind>().unwrap(), CredentialKind::Server);
        assert_eq!("vCenterCredential".parse::<CredentialKind>().unwrap(), CredentialKind::VCenter);
        assert_eq!("OSUSER".parse::<CredentialKind>().unwrap(), CredentialKind::OsUser);
        assert_eq!("scaleio".parse::<CredentialKind>().unwrap(), CredentialKind::ScaleIo);

        let err = Credential::create("invalid", "Invalid", "user", "pass", None).unwrap_err();
        assert!(err.to_string().contains("Invalid credential type"));
    }

    #[test]
    fn domain_dropped_for_unsupported_kinds() {
        let server = Credential::create("server", "s", "u", "p", Some("corp")).unwrap();
        assert_eq!(server.domain, None);

        let vcenter = Credential::create("vcenter", "v", "u", "p", Some("corp")).unwrap();
        assert_eq!(vcenter.domain.as_deref(), Some("corp"));
    }

    #[test]
    fn xml_layout() {
        let xml = Credential::new(CredentialKind::Server, "Test Server", "admin", "pass<word>")
            .to_xml()
            .unwrap();
        assert_eq!(
            xml,
            "<asmCredential><serverCredential><label>Test Server</label>\
             <username>admin</username><password>pass&lt;word&gt;</password>\
             </serverCredential></asmCredential>"
        );

        let xml = Credential::new(CredentialKind::Os, "os", "root", "pw")
            .with_domain("corp")
            .to_xml()
            .unwrap();
        assert!(xml.contains("<osCredential>"));
        assert!(xml.contains("<domain>corp</domain>"));
    }

    #[test]
    fn debug_hides_password() {
        let credential = Credential::new(CredentialKind::Server, "s", "admin", "secret");
        assert!(!format!("{:?}", credential).contains("secret"));
    }
}
