//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files and
//! building a client from it.

use std::io::Write;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use spgate_domain::{Environment, Region, SpApiError};
use spgate_infra::{config, SpApi};
use tempfile::NamedTempFile;

static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

const ENV_VARS: [&str; 5] = [
    "SPGATE_CLIENT_ID",
    "SPGATE_CLIENT_SECRET",
    "SPGATE_REFRESH_TOKEN",
    "SPGATE_REGION",
    "SPGATE_ENVIRONMENT",
];

fn clear_env() {
    for key in ENV_VARS {
        std::env::remove_var(key);
    }
}

fn write_temp(contents: &str, extension: &str) -> std::path::PathBuf {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(contents.as_bytes()).expect("Failed to write to temp file");

    let path = temp_file.path().with_extension(extension);
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");
    path
}

#[test]
fn test_load_config_from_json_file() {
    let path = write_temp(
        r#"{
        "credentials": {
            "client_id": "amzn1.application-oa2-client.json",
            "client_secret": "json-secret",
            "refresh_token": "Atzr|json",
            "region": "eu",
            "environment": "sandbox"
        },
        "endpoint_override": "http://127.0.0.1:9/",
        "http": { "timeout_secs": 7 },
        "polling": { "max_attempts": 12, "delay_ms": 1500 },
        "token": { "refresh_buffer_secs": 120 }
    }"#,
        "json",
    );

    let config = config::load_from_file(Some(path.clone())).expect("JSON config");

    assert_eq!(config.credentials.region, Region::Europe);
    assert_eq!(config.credentials.environment, Environment::Sandbox);
    assert_eq!(config.http.timeout_secs, 7);
    assert_eq!(config.polling.max_attempts, 12);
    assert_eq!(config.polling.delay_ms, 1500);
    assert_eq!(config.token.refresh_buffer_secs, 120);
    assert_eq!(config.resolve_endpoints().unwrap().api_base(), "http://127.0.0.1:9");

    // Building the client performs no network I/O.
    let api = SpApi::from_config(&config).expect("client");
    assert_eq!(api.client().endpoints().api_base(), "http://127.0.0.1:9");
    assert_eq!(api.token_exchanges(), 0);

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_from_toml_file() {
    let path = write_temp(
        r#"
[credentials]
client_id = "amzn1.application-oa2-client.toml"
client_secret = "toml-secret"
refresh_token = "Atzr|toml"
region = "na"
"#,
        "toml",
    );

    let config = config::load_from_file(Some(path.clone())).expect("TOML config");

    assert_eq!(config.credentials.region, Region::NorthAmerica);
    assert_eq!(config.credentials.environment, Environment::Production);
    assert_eq!(
        config.resolve_endpoints().unwrap().api_base(),
        "https://sellingpartnerapi-na.amazon.com"
    );

    std::fs::remove_file(path).ok();
}

#[test]
fn test_bad_override_url_is_rejected_on_load() {
    let path = write_temp(
        r#"{
        "credentials": {
            "client_id": "id", "client_secret": "s", "refresh_token": "t", "region": "fe"
        },
        "token_url_override": "ftp://example.com/token"
    }"#,
        "json",
    );

    let result = config::load_from_file(Some(path.clone()));
    assert!(result.is_err(), "ftp token URL must be rejected");

    std::fs::remove_file(path).ok();
}

#[test]
fn test_invalid_region_in_env_is_reported_not_masked() {
    let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
    clear_env();
    std::env::set_var("SPGATE_CLIENT_ID", "amzn1.application-oa2-client.env");
    std::env::set_var("SPGATE_CLIENT_SECRET", "env-secret");
    std::env::set_var("SPGATE_REFRESH_TOKEN", "Atzr|env");
    std::env::set_var("SPGATE_REGION", "us");

    let err = config::load().unwrap_err();

    clear_env();
    match err {
        SpApiError::Config(message) => {
            assert_eq!(message, "Invalid Region: us");
        }
        other => panic!("expected a config error, got {other:?}"),
    }
}
