//! OAuth 2.0 authorization code client for the Church Community Builder API.
//!
//! [`Ccb`] builds the consent URL, exchanges the returned code for an
//! [`AccessToken`], and issues bearer-authenticated JSON calls against the
//! resource API. Any provider reply carrying a non-empty `error` member
//! becomes [`Error::IdentityProvider`].
//!
//! Transport is injected through [`HttpClient`]; enable the default
//! `reqwest-client` feature for a ready-made [`ReqwestClient`].

mod client;
mod config;
mod error;
mod http;
mod provider;
mod request;
mod response;
mod state;
mod tokens;

// Core
pub use client::Ccb;
pub use config::{ClientConfig, DEFAULT_API_DOMAIN, DEFAULT_AUTHORIZATION_DOMAIN};
pub use error::Error;
pub use http::{HttpClient, HttpRequest, HttpResponse, Method};
pub use provider::OAuthProvider;
pub use tokens::AccessToken;

// Request construction and response classification
pub use request::{bearer_authorization, create_json_request, create_token_request, resolve_url};
pub use response::{check_provider_error, parse_json_body, render_error_value};

// Utilities
pub use state::{generate_state, states_match};

// Default HTTP client (behind feature flag)
#[cfg(feature = "reqwest-client")]
pub use http::ReqwestClient;
