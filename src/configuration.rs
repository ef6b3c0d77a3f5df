use crate::error::{PowerFlexError, PowerFlexResult};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Default HTTPS port of the PowerFlex gateway
pub const DEFAULT_GATEWAY_PORT: u16 = 443;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Connection settings for a PowerFlex gateway.
///
/// Built once per client and never mutated afterwards.
#[derive(Clone)]
pub struct Configuration {
    pub gateway_address: String,
    pub gateway_port: u16,
    pub username: String,
    pub password: String,
    pub verify_certificate: bool,
    pub certificate_path: Option<PathBuf>,
    pub timeout: Duration,
    pub log_level: Option<log::LevelFilter>,
}

/// How the gateway's TLS certificate is checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TlsVerification {
    Disabled,
    SystemRoots,
    CaBundle(PathBuf),
}

impl Configuration {
    pub fn new(
        gateway_address: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            gateway_address: gateway_address.into(),
            gateway_port: DEFAULT_GATEWAY_PORT,
            username: username.into(),
            password: password.into(),
            verify_certificate: false,
            certificate_path: None,
            timeout: DEFAULT_TIMEOUT,
            log_level: None,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.gateway_port = port;
        self
    }

    pub fn with_verify_certificate(mut self, verify: bool) -> Self {
        self.verify_certificate = verify;
        self
    }

    /// CA bundle used when certificate verification is enabled
    pub fn with_certificate_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.certificate_path = Some(path.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_log_level(mut self, level: log::LevelFilter) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Check that every mandatory connection field is set
    pub fn validate(&self) -> PowerFlexResult<()> {
        if self.gateway_address.is_empty()
            || self.gateway_port == 0
            || self.username.is_empty()
            || self.password.is_empty()
        {
            return Err(PowerFlexError::InvalidConfiguration(
                "The following parameters must be set: \
                 gateway_address, gateway_port, username, password."
                    .to_string(),
            ));
        }
        Ok(())
    }

    pub fn tls_verification(&self) -> TlsVerification {
        match (self.verify_certificate, &self.certificate_path) {
            (false, _) => TlsVerification::Disabled,
            (true, Some(path)) => TlsVerification::CaBundle(path.clone()),
            (true, None) => TlsVerification::SystemRoots,
        }
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("gateway_address", &self.gateway_address)
            .field("gateway_port", &self.gateway_port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("verify_certificate", &self.verify_certificate)
            .field("certificate_path", &self.certificate_path)
            .field("timeout", &self.timeout)
            .field("log_level", &self.log_level)
            .finish()
    }
}
