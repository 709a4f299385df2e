//! Anti-forgery `state` handling for the consent redirect.
//!
//! The host stores the value from [`generate_state`] before redirecting the
//! user and checks the value CCB echoes back on the callback with
//! [`states_match`].

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng;
use subtle::ConstantTimeEq;
use tracing::debug;

const STATE_BYTES: usize = 32;

/// Fresh random value for the `state` parameter of
/// [`OAuthProvider::authorization_url`](crate::OAuthProvider::authorization_url).
///
/// Base64url without padding, so it needs no escaping in the query string.
pub fn generate_state() -> String {
    let bytes: [u8; STATE_BYTES] = rand::rng().random();
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Whether the `state` returned on the redirect callback is the one that was
/// sent. A missing or empty value never matches.
///
/// Comparison time does not depend on where the values first differ.
pub fn states_match(expected: &str, returned: Option<&str>) -> bool {
    let Some(returned) = returned.filter(|s| !s.is_empty()) else {
        debug!("callback carried no state");
        return false;
    };
    if expected.is_empty() {
        return false;
    }

    let matched: bool = expected.as_bytes().ct_eq(returned.as_bytes()).into();
    if !matched {
        debug!("callback state mismatch");
    }
    matched
}
