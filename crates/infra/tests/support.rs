use std::time::Duration;

use serde_json::{json, Value};
use spgate_domain::{Credentials, Environment, PollingPolicy, Region, SpApiConfig};
use spgate_infra::SpApi;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const ACCESS_TOKEN: &str = "Atza|integration-token";
pub const MARKETPLACE: &str = "ATVPDKIKX0DER";
pub const TOKEN_PATH: &str = "/auth/o2/token";

/// Configuration pointing both the API and the token endpoint at `server`.
pub fn config(server: &MockServer, polling: PollingPolicy) -> SpApiConfig {
    let credentials = Credentials::new(
        "amzn1.application-oa2-client.integration",
        "integration-secret",
        "Atzr|integration-refresh",
        Region::NorthAmerica,
        Environment::Sandbox,
    )
    .expect("credentials should be valid");

    let mut config = SpApiConfig::new(credentials);
    config.endpoint_override = Some(server.uri());
    config.token_url_override = Some(format!("{}{TOKEN_PATH}", server.uri()));
    config.http.timeout_secs = 5;
    config.polling = polling;
    config
}

/// Fast polling so end-to-end tests finish in milliseconds.
pub fn fast_polling(max_attempts: u32) -> PollingPolicy {
    PollingPolicy::new(max_attempts, Duration::from_millis(10))
}

pub fn client(server: &MockServer) -> SpApi {
    SpApi::from_config(&config(server, fast_polling(5))).expect("client should build")
}

pub fn token_grant() -> Value {
    json!({
        "access_token": ACCESS_TOKEN,
        "token_type": "bearer",
        "expires_in": 3600
    })
}

/// Token endpoint that succeeds `expected` times.
pub async fn mount_token_endpoint(server: &MockServer, expected: u64) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_grant()))
        .expect(expected)
        .named("token exchange")
        .mount(server)
        .await;
}

/// Requests the server received on `request_path`.
pub async fn requests_to(server: &MockServer, request_path: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|request| request.url.path() == request_path)
        .collect()
}
