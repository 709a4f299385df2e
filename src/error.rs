#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Required client configuration is missing or unusable
    /// (empty client id / redirect uri, unparseable domain).
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// A request body could not be encoded as JSON.
    #[error("Failed to serialize request body: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Network / transport error from the HTTP client.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] Box<dyn std::error::Error + Send + Sync>),

    /// The response body is not valid JSON.
    #[error("Response body is not valid JSON (HTTP {status})")]
    Decode { status: u16, body: String },

    /// The provider reported a failure through the `error` field of an
    /// otherwise well-formed JSON payload. `code` is always 0: the provider
    /// exposes no machine-readable code through this channel.
    #[error("Identity provider error: {message}")]
    IdentityProvider {
        message: String,
        code: u16,
        body: serde_json::Value,
    },

    /// A required field is missing from the token response JSON.
    #[error("Missing or invalid field: {field}")]
    MissingField { field: &'static str },
}

impl Error {
    /// Whether this error was reported by the identity provider itself,
    /// as opposed to a local or transport failure.
    pub fn is_identity_provider(&self) -> bool {
        matches!(self, Error::IdentityProvider { .. })
    }
}
