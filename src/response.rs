use serde_json::Value;

use crate::Error;
use crate::http::HttpResponse;

/// Decode a response body as JSON.
///
/// A `204 No Content` reply with an empty (or all-whitespace) body decodes
/// to `null`. An empty body under any other status is a decode error.
pub fn parse_json_body(response: &HttpResponse) -> Result<Value, Error> {
    if response.status == 204 && response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    serde_json::from_slice(&response.body).map_err(|_| Error::Decode {
        status: response.status,
        body: String::from_utf8_lossy(&response.body).into_owned(),
    })
}

/// Gate between a successful reply and a provider-reported failure.
///
/// If `body` is a JSON object whose `error` member is non-empty, the reply
/// becomes [`Error::IdentityProvider`] carrying the rendered error value, a
/// code of 0 and the full payload. Otherwise `body` is returned unchanged.
/// `response` is accepted so the status can be consulted later; today it is not.
pub fn check_provider_error(_response: &HttpResponse, body: Value) -> Result<Value, Error> {
    let message = body
        .get("error")
        .filter(|error| !is_empty_value(error))
        .map(render_error_value);

    match message {
        Some(message) => Err(Error::IdentityProvider {
            message,
            code: 0,
            body,
        }),
        None => Ok(body),
    }
}

/// Render an arbitrary JSON value as a stable diagnostic string:
/// strings as-is, everything else as compact JSON.
pub fn render_error_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// null, false, 0, "", [] and {} count as "no error"
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
