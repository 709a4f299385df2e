use serde::Deserialize;

use crate::Error;

pub const DEFAULT_AUTHORIZATION_DOMAIN: &str = "https://oauth.ccbchurch.com";
pub const DEFAULT_API_DOMAIN: &str = "https://api.ccbchurch.com";

/// Client registration and endpoint domains for a [`Ccb`](crate::Ccb) client.
///
/// Domains are absolute URLs without a trailing slash; paths are appended
/// to them directly. Deserializable so a host can load it from its own
/// settings file, with both domains falling back to the production defaults.
///
/// ```rust
/// use ccb_oauth::ClientConfig;
///
/// let config = ClientConfig::new("client-id", "client-secret", "https://app.test/cb")
///     .with_api_domain("https://api.staging.example");
/// assert_eq!(config.authorization_domain, "https://oauth.ccbchurch.com");
/// assert_eq!(config.api_domain, "https://api.staging.example");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    #[serde(default = "default_authorization_domain")]
    pub authorization_domain: String,
    #[serde(default = "default_api_domain")]
    pub api_domain: String,
}

impl ClientConfig {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            authorization_domain: default_authorization_domain(),
            api_domain: default_api_domain(),
        }
    }

    pub fn with_authorization_domain(mut self, domain: impl Into<String>) -> Self {
        self.authorization_domain = domain.into();
        self
    }

    pub fn with_api_domain(mut self, domain: impl Into<String>) -> Self {
        self.api_domain = domain.into();
        self
    }

    /// Client id and redirect uri are needed for every exchange with the
    /// identity provider.
    pub(crate) fn require_client(&self) -> Result<(), Error> {
        if self.client_id.trim().is_empty() {
            return Err(Error::Configuration("client_id is required".into()));
        }
        if self.redirect_uri.trim().is_empty() {
            return Err(Error::Configuration("redirect_uri is required".into()));
        }
        Ok(())
    }
}

fn default_authorization_domain() -> String {
    DEFAULT_AUTHORIZATION_DOMAIN.to_string()
}

fn default_api_domain() -> String {
    DEFAULT_API_DOMAIN.to_string()
}
