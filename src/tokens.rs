use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde_json::{Map, Value};

use crate::Error;

// `expires` values above ten years' worth of seconds are absolute timestamps;
// anything smaller is a lifetime relative to the response.
const EXPIRES_TIMESTAMP_THRESHOLD: u64 = 10 * 365 * 24 * 60 * 60;

/// Access token issued by the token endpoint.
///
/// Immutable once built. `values` keeps every provider field that is not
/// modelled explicitly (`token_type`, `scope`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct AccessToken {
    token: String,
    refresh_token: Option<String>,
    expires_at: Option<SystemTime>,
    values: Map<String, Value>,
}

impl AccessToken {
    /// Build a token from a decoded token-endpoint response received now.
    pub fn from_response(data: Value) -> Result<Self, Error> {
        Self::from_response_at(data, SystemTime::now())
    }

    pub(crate) fn from_response_at(data: Value, received_at: SystemTime) -> Result<Self, Error> {
        let Value::Object(mut values) = data else {
            return Err(Error::MissingField {
                field: "access_token",
            });
        };

        let token = match values.remove("access_token") {
            Some(Value::String(token)) if !token.is_empty() => token,
            _ => {
                return Err(Error::MissingField {
                    field: "access_token",
                });
            }
        };

        let refresh_token = match values.remove("refresh_token") {
            None | Some(Value::Null) => None,
            Some(Value::String(token)) => Some(token),
            Some(_) => {
                return Err(Error::MissingField {
                    field: "refresh_token",
                });
            }
        };

        let expires_in = values
            .remove("expires_in")
            .map(|v| seconds(&v).ok_or(Error::MissingField { field: "expires_in" }))
            .transpose()?;
        let expires = values
            .remove("expires")
            .map(|v| seconds(&v).ok_or(Error::MissingField { field: "expires" }))
            .transpose()?;

        let expires_at = match (expires_in, expires) {
            (Some(lifetime), _) => Some(
                received_at
                    .checked_add(Duration::from_secs(lifetime))
                    .ok_or(Error::MissingField { field: "expires_in" })?,
            ),
            (None, Some(at)) => {
                let base = if at > EXPIRES_TIMESTAMP_THRESHOLD {
                    UNIX_EPOCH
                } else {
                    received_at
                };
                Some(
                    base.checked_add(Duration::from_secs(at))
                        .ok_or(Error::MissingField { field: "expires" })?,
                )
            }
            (None, None) => None,
        };

        values.remove("resource_owner_id");

        Ok(Self {
            token,
            refresh_token,
            expires_at,
            values,
        })
    }

    pub fn access_token(&self) -> &str {
        &self.token
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    pub fn expires_at(&self) -> Option<SystemTime> {
        self.expires_at
    }

    /// Whether the token's expiry lies in the past; `None` when the
    /// provider sent no expiry.
    pub fn has_expired(&self) -> Option<bool> {
        self.expires_at.map(|at| at <= SystemTime::now())
    }

    pub fn token_type(&self) -> Option<&str> {
        self.values.get("token_type").and_then(Value::as_str)
    }

    /// Provider fields not modelled explicitly.
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Serialize for host-side storage. `expires` is written as a unix
    /// timestamp, which [`AccessToken::from_response`] reads back.
    pub fn to_json(&self) -> Value {
        let mut data = self.values.clone();
        data.insert("access_token".into(), Value::String(self.token.clone()));
        if let Some(ref refresh_token) = self.refresh_token {
            data.insert("refresh_token".into(), Value::String(refresh_token.clone()));
        }
        if let Some(at) = self.expires_at.and_then(|at| at.duration_since(UNIX_EPOCH).ok()) {
            data.insert("expires".into(), Value::from(at.as_secs()));
        }
        Value::Object(data)
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token)
    }
}

fn seconds(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
