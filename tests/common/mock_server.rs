use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// A mock CCB server built on `wiremock`. Serves both the token endpoint
/// and resource paths from one origin, standing in for the API domain.
pub struct MockCcbServer {
    server: MockServer,
}

impl MockCcbServer {
    /// Start a new mock server on a random available port.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL of the mock server (e.g. "http://127.0.0.1:PORT").
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Mount a handler that returns a successful token response (HTTP 200)
    /// with the given JSON body at `POST /oauth/token`.
    pub async fn mock_token_success(&self, response: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response))
            .mount(&self.server)
            .await;
    }

    /// Mount a handler that returns an error payload with the given status
    /// at `POST /oauth/token`.
    pub async fn mock_token_error(&self, status: u16, error: serde_json::Value) {
        let body = serde_json::json!({ "error": error });
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(status).set_body_json(&body))
            .mount(&self.server)
            .await;
    }

    /// Mount a JSON handler for `verb resource_path`.
    pub async fn mock_resource(
        &self,
        verb: &str,
        resource_path: &str,
        status: u16,
        body: serde_json::Value,
    ) {
        Mock::given(method(verb))
            .and(path(resource_path))
            .respond_with(ResponseTemplate::new(status).set_body_json(&body))
            .mount(&self.server)
            .await;
    }

    /// Mount a handler answering `verb resource_path` with a raw text body.
    pub async fn mock_raw(&self, verb: &str, resource_path: &str, status: u16, body: &str) {
        Mock::given(method(verb))
            .and(path(resource_path))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// The most recent request the server received.
    pub async fn last_request(&self) -> Request {
        let requests = self
            .server
            .received_requests()
            .await
            .expect("request recording enabled");
        requests
            .last()
            .cloned()
            .expect("expected at least one request")
    }

    /// Assert that the last request to the mock server contained
    /// the expected form-urlencoded parameters in its body.
    pub async fn verify_token_request(&self, expected_params: &[(&str, &str)]) {
        let last = self.last_request().await;
        let body_str = String::from_utf8(last.body.clone()).expect("body should be UTF-8");
        let parsed: Vec<(String, String)> = url::form_urlencoded::parse(body_str.as_bytes())
            .into_owned()
            .collect();

        for (key, value) in expected_params {
            let found = parsed.iter().any(|(k, v)| k == key && v == value);
            assert!(
                found,
                "expected form param {}={} in request body, got: {}",
                key, value, body_str
            );
        }
    }

    /// Assert that the last request carried the expected bearer token.
    pub async fn verify_bearer(&self, access_token: &str) {
        let last = self.last_request().await;
        let auth_header = last
            .headers
            .get("authorization")
            .expect("expected Authorization header");
        assert_eq!(
            auth_header.to_str().unwrap(),
            format!("Bearer {access_token}"),
            "bearer credential mismatch"
        );
    }
}
