use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::Error;
use crate::http::{HttpClient, Method};
use crate::provider::OAuthProvider;
use crate::request::{
    bearer_authorization, create_json_request, create_token_request, resolve_url,
    send_json_request,
};
use crate::tokens::AccessToken;

const AUTHORIZATION_PATH: &str = "oauth/authorize";
// The token endpoint lives on the API domain, not the authorization domain.
const TOKEN_PATH: &str = "oauth/token";

const RESERVED_PARAMS: [&str; 5] = ["response_type", "client_id", "redirect_uri", "scope", "state"];

/// OAuth 2.0 client for the [Church Community Builder](https://www.ccbchurch.com) API.
///
/// CCB uses the standard authorization code flow without PKCE. Consent
/// happens on the authorization domain (`https://oauth.ccbchurch.com`),
/// while both the token endpoint and the resource API are served from the
/// API domain (`https://api.ccbchurch.com`).
///
/// The HTTP client is built once by the host and lent to `Ccb`; timeouts,
/// proxies and connection pooling are configured there.
///
/// # Scopes
///
/// Scopes are space-separated on the wire. No scopes are requested unless
/// the caller passes some.
///
/// # Example
///
/// ```rust
/// use ccb_oauth::{Ccb, ClientConfig, OAuthProvider, ReqwestClient, generate_state};
///
/// # async fn example() -> Result<(), ccb_oauth::Error> {
/// let http = ReqwestClient::new();
/// let ccb = Ccb::new(
///     ClientConfig::new("your-client-id", "your-client-secret", "https://example.com/callback"),
///     &http,
/// );
///
/// // Step 1: Generate CSRF state and redirect the user.
/// let state = generate_state();
/// let url = ccb.authorization_url(Some(&state), &["profile"], &[])?;
/// // Store `state` in the user's session, then redirect to `url`.
///
/// // Step 2: In your callback handler, exchange the authorization code.
/// let token = ccb.validate_authorization_code("authorization-code").await?;
///
/// // Step 3: Call the API with the bearer token.
/// let events = ccb.get("/events", token.access_token()).await?;
/// println!("{events}");
/// # Ok(())
/// # }
/// ```
pub struct Ccb<'a, H: HttpClient> {
    config: ClientConfig,
    http_client: &'a H,
}

impl<'a, H: HttpClient> Ccb<'a, H> {
    pub fn new(config: ClientConfig, http_client: &'a H) -> Self {
        Self {
            config,
            http_client,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Base URL of the resource API and the token endpoint.
    pub fn api_domain(&self) -> &str {
        &self.config.api_domain
    }

    /// Takes effect on the next call.
    pub fn set_api_domain(&mut self, domain: impl Into<String>) {
        self.config.api_domain = domain.into();
    }

    /// Base URL of the consent page.
    pub fn authorization_domain(&self) -> &str {
        &self.config.authorization_domain
    }

    /// Takes effect on the next call.
    pub fn set_authorization_domain(&mut self, domain: impl Into<String>) {
        self.config.authorization_domain = domain.into();
    }

    fn token_endpoint(&self) -> String {
        resolve_url(&self.config.api_domain, TOKEN_PATH)
    }

    async fn request_token(&self, grant: Vec<(String, String)>) -> Result<AccessToken, Error> {
        self.config.require_client()?;

        let mut body = grant;
        body.extend([
            ("client_id".to_string(), self.config.client_id.clone()),
            ("client_secret".to_string(), self.config.client_secret.clone()),
            ("redirect_uri".to_string(), self.config.redirect_uri.clone()),
        ]);

        let request = create_token_request(&self.token_endpoint(), &body);
        let json = send_json_request(self.http_client, request).await?;
        AccessToken::from_response(json)
    }

    async fn send_authenticated<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        access_token: &str,
    ) -> Result<Value, Error>
    where
        B: Serialize + Sync + ?Sized,
    {
        let url = resolve_url(&self.config.api_domain, path);
        let headers = vec![(
            "Authorization".to_string(),
            bearer_authorization(access_token),
        )];
        let request = create_json_request(method, &url, headers, body)?;
        send_json_request(self.http_client, request).await
    }
}

impl<H: HttpClient> OAuthProvider for Ccb<'_, H> {
    /// Returns the provider name (`"CCB"`).
    fn name(&self) -> &'static str {
        "CCB"
    }

    /// Builds the CCB authorization URL that the user should be redirected to.
    ///
    /// Values are percent-encoded with `%20` for spaces, so a scope list of
    /// `["profile", "events"]` is sent as `scope=profile%20events`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when the client id or redirect uri is
    /// empty, or the authorization domain is not an absolute URL.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ccb_oauth::{Ccb, ClientConfig, OAuthProvider, ReqwestClient};
    ///
    /// let http = ReqwestClient::new();
    /// let ccb = Ccb::new(ClientConfig::new("abc", "secret", "https://app.test/cb"), &http);
    ///
    /// let url = ccb
    ///     .authorization_url(Some("xyz"), &["profile", "events"], &[])
    ///     .unwrap();
    /// assert_eq!(
    ///     url.as_str(),
    ///     "https://oauth.ccbchurch.com/oauth/authorize?response_type=code&client_id=abc\
    ///      &redirect_uri=https%3A%2F%2Fapp.test%2Fcb&scope=profile%20events&state=xyz"
    /// );
    /// ```
    fn authorization_url(
        &self,
        state: Option<&str>,
        scopes: &[&str],
        extra_params: &[(&str, &str)],
    ) -> Result<url::Url, Error> {
        self.config.require_client()?;

        let endpoint = resolve_url(&self.config.authorization_domain, AUTHORIZATION_PATH);
        let mut url = url::Url::parse(&endpoint)
            .map_err(|e| Error::Configuration(format!("invalid authorization domain: {e}")))?;

        let scope = scopes.join(" ");
        let mut params: Vec<(&str, &str)> = vec![
            ("response_type", "code"),
            ("client_id", self.config.client_id.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ];
        if !scopes.is_empty() {
            params.push(("scope", scope.as_str()));
        }
        if let Some(state) = state.filter(|s| !s.is_empty()) {
            params.push(("state", state));
        }
        for &(key, value) in extra_params {
            if RESERVED_PARAMS.contains(&key) {
                tracing::debug!(param = key, "ignoring extra parameter that shadows a required one");
                continue;
            }
            params.push((key, value));
        }

        let query = params
            .iter()
            .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
            .collect::<Vec<_>>()
            .join("&");
        url.set_query(Some(query.as_str()));

        Ok(url)
    }

    /// Exchanges an authorization code for an access token.
    ///
    /// Call this in your redirect URI handler after CCB redirects back with a
    /// `code` query parameter. The code, client credentials and redirect uri
    /// are posted form-encoded to `{api_domain}/oauth/token`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IdentityProvider`] if CCB rejects the code,
    /// [`Error::Transport`] on network failure, or [`Error::Decode`] if the
    /// reply is not JSON.
    async fn validate_authorization_code(&self, code: &str) -> Result<AccessToken, Error> {
        self.request_token(vec![
            ("grant_type".to_string(), "authorization_code".to_string()),
            ("code".to_string(), code.to_string()),
        ])
        .await
    }

    /// Exchanges a refresh token for a new access token. Scheduling refreshes
    /// is left to the caller.
    async fn refresh_access_token(&self, refresh_token: &str) -> Result<AccessToken, Error> {
        self.request_token(vec![
            ("grant_type".to_string(), "refresh_token".to_string()),
            ("refresh_token".to_string(), refresh_token.to_string()),
        ])
        .await
    }

    /// `GET {api_domain}/{path}`. A leading `/` on `path` is optional.
    async fn get(&self, path: &str, access_token: &str) -> Result<Value, Error> {
        self.send_authenticated::<Value>(Method::Get, path, None, access_token)
            .await
    }

    /// `POST {api_domain}/{path}` with `body` encoded as JSON.
    async fn post<B>(&self, path: &str, body: &B, access_token: &str) -> Result<Value, Error>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.send_authenticated(Method::Post, path, Some(body), access_token)
            .await
    }

    /// `PUT {api_domain}/{path}` with `body` encoded as JSON.
    async fn put<B>(&self, path: &str, body: &B, access_token: &str) -> Result<Value, Error>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.send_authenticated(Method::Put, path, Some(body), access_token)
            .await
    }

    /// `DELETE {api_domain}/{path}`.
    async fn delete(&self, path: &str, access_token: &str) -> Result<Value, Error> {
        self.send_authenticated::<Value>(Method::Delete, path, None, access_token)
            .await
    }
}

// Form encoding with spaces as %20. A literal `+` is already escaped to %2B.
fn encode_component(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
