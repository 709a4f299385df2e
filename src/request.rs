use serde::Serialize;

use crate::Error;
use crate::http::{HttpClient, HttpRequest, HttpResponse, Method};
use crate::response::{check_provider_error, parse_json_body};

const USER_AGENT: &str = "ccb-oauth";

/// Build a form-encoded POST request for the token endpoint.
/// Sets Content-Type, Accept: application/json, User-Agent: ccb-oauth.
pub fn create_token_request(endpoint: &str, body: &[(String, String)]) -> HttpRequest {
    let encoded_body = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(body)
        .finish();

    HttpRequest {
        method: Method::Post,
        url: endpoint.to_string(),
        headers: vec![
            (
                "Content-Type".to_string(),
                "application/x-www-form-urlencoded".to_string(),
            ),
            ("Accept".to_string(), "application/json".to_string()),
            ("User-Agent".to_string(), USER_AGENT.to_string()),
        ],
        body: encoded_body.into_bytes(),
    }
}

/// Build a request against the resource API.
///
/// Caller headers are kept as given; `Accept` and `User-Agent` are added
/// when absent. For POST/PUT the body is encoded as JSON and
/// `Content-Type: application/json` is ensured. GET/DELETE never carry a
/// body, so `body` is ignored for them. The URL is passed through untouched.
pub fn create_json_request<B>(
    method: Method,
    url: &str,
    headers: Vec<(String, String)>,
    body: Option<&B>,
) -> Result<HttpRequest, Error>
where
    B: Serialize + ?Sized,
{
    let mut request = HttpRequest {
        method,
        url: url.to_string(),
        headers,
        body: Vec::new(),
    };

    set_default_header(&mut request, "Accept", "application/json");
    set_default_header(&mut request, "User-Agent", USER_AGENT);

    if method.carries_body() {
        set_default_header(&mut request, "Content-Type", "application/json");
        if let Some(body) = body {
            request.body = serde_json::to_vec(body).map_err(Error::Serialization)?;
        }
    }

    Ok(request)
}

/// Value of the `Authorization` header for a bearer credential.
pub fn bearer_authorization(access_token: &str) -> String {
    format!("Bearer {access_token}")
}

/// Join a base domain and a path with exactly one `/` between them.
/// A single leading `/` on `path` is stripped, so `"events"` and
/// `"/events"` resolve to the same URL.
pub fn resolve_url(domain: &str, path: &str) -> String {
    let path = path.strip_prefix('/').unwrap_or(path);
    format!("{}/{}", domain.trim_end_matches('/'), path)
}

/// Send a request and interpret the response.
/// - body is not JSON -> Err(Error::Decode { .. })
/// - body is a JSON object with a non-empty `error` -> Err(Error::IdentityProvider { .. })
/// - anything else -> Ok(decoded body)
///
/// The HTTP status is not consulted beyond being reported in errors.
pub async fn send_json_request(
    client: &(impl HttpClient + ?Sized),
    request: HttpRequest,
) -> Result<serde_json::Value, Error> {
    tracing::debug!(method = %request.method, url = %request.url, "sending request");

    let response: HttpResponse = client.send(request).await?;

    tracing::debug!(
        status = response.status,
        bytes = response.body.len(),
        "received response"
    );

    let json = parse_json_body(&response)?;
    check_provider_error(&response, json)
}

fn set_default_header(request: &mut HttpRequest, name: &str, value: &str) {
    if request.header(name).is_none() {
        request.headers.push((name.to_string(), value.to_string()));
    }
}
