use std::future::Future;

use serde::Serialize;

use crate::error::Error;
use crate::tokens::AccessToken;

/// The authorization-code surface of a provider bound to one identity
/// provider and one resource API.
///
/// Every method performs at most one network round trip. Provider replies
/// whose JSON carries a non-empty `error` member fail with
/// [`Error::IdentityProvider`], whichever method produced them.
pub trait OAuthProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Build the URL the user is redirected to for consent.
    ///
    /// Parameters are appended in a fixed order: `response_type`,
    /// `client_id`, `redirect_uri`, `scope` (only when `scopes` is
    /// non-empty), `state` (only when given), then `extra_params`.
    /// Extra parameters never replace the required ones.
    fn authorization_url(
        &self,
        state: Option<&str>,
        scopes: &[&str],
        extra_params: &[(&str, &str)],
    ) -> Result<url::Url, Error>;

    /// Exchange an authorization code for an access token.
    fn validate_authorization_code(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<AccessToken, Error>> + Send;

    /// Exchange a refresh token for a new access token.
    fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> impl Future<Output = Result<AccessToken, Error>> + Send;

    fn get(
        &self,
        path: &str,
        access_token: &str,
    ) -> impl Future<Output = Result<serde_json::Value, Error>> + Send;

    fn post<B>(
        &self,
        path: &str,
        body: &B,
        access_token: &str,
    ) -> impl Future<Output = Result<serde_json::Value, Error>> + Send
    where
        B: Serialize + Sync + ?Sized;

    fn put<B>(
        &self,
        path: &str,
        body: &B,
        access_token: &str,
    ) -> impl Future<Output = Result<serde_json::Value, Error>> + Send
    where
        B: Serialize + Sync + ?Sized;

    /// A `204 No Content` reply resolves to `Value::Null`.
    fn delete(
        &self,
        path: &str,
        access_token: &str,
    ) -> impl Future<Output = Result<serde_json::Value, Error>> + Send;
}
