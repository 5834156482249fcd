//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If a required variable is missing, falls back to loading from file;
//!    a present but invalid value is an error
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! Required:
//! - `SPGATE_CLIENT_ID`: LWA application client id
//! - `SPGATE_CLIENT_SECRET`: LWA application client secret
//! - `SPGATE_REFRESH_TOKEN`: seller authorization refresh token
//! - `SPGATE_REGION`: `na`, `eu` or `fe`
//!
//! Optional:
//! - `SPGATE_ENVIRONMENT`: `sandbox` or `production` (default)
//! - `SPGATE_ENDPOINT`: API base URL override
//! - `SPGATE_TOKEN_URL`: token endpoint override
//! - `SPGATE_HTTP_TIMEOUT_SECS`: per-request timeout
//! - `SPGATE_USER_AGENT`: user agent header
//! - `SPGATE_REPORT_MAX_ATTEMPTS`: report status polls before giving up
//! - `SPGATE_REPORT_POLL_INTERVAL_MS`: delay between report status polls
//! - `SPGATE_TOKEN_REFRESH_BUFFER_SECS`: refresh this long before expiry
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./spgate.{json,toml}` or `./config.{json,toml}` (current working directory)
//! 2. The same names in the parent and grandparent directories
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use spgate_domain::{Credentials, Environment, Region, Result, SpApiConfig, SpApiError};

const CONFIG_FILE_NAMES: [&str; 4] = ["spgate.json", "spgate.toml", "config.json", "config.toml"];

const REQUIRED_ENV_VARS: [&str; 4] =
    ["SPGATE_CLIENT_ID", "SPGATE_CLIENT_SECRET", "SPGATE_REFRESH_TOKEN", "SPGATE_REGION"];

/// Load configuration with automatic fallback strategy
///
/// Uses environment variables when every required one is set. Only when at
/// least one is missing does it fall back to a config file; an invalid value
/// in the environment is returned as-is.
///
/// # Errors
/// Returns `SpApiError::Config` if:
/// - An environment variable is present but invalid
/// - No complete environment and no usable config file exist
/// - File format is invalid
pub fn load() -> Result<SpApiConfig> {
    let missing: Vec<&str> =
        REQUIRED_ENV_VARS.iter().copied().filter(|key| env_opt(key).is_none()).collect();

    if missing.is_empty() {
        let config = load_from_env()?;
        tracing::info!("Configuration loaded from environment variables");
        return Ok(config);
    }

    tracing::debug!(missing = ?missing, "Environment incomplete, trying file");
    load_from_file(None)
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `SpApiError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<SpApiConfig> {
    let client_id = env_var("SPGATE_CLIENT_ID")?;
    let client_secret = env_var("SPGATE_CLIENT_SECRET")?;
    let refresh_token = env_var("SPGATE_REFRESH_TOKEN")?;
    let region: Region = env_var("SPGATE_REGION")?.parse().map_err(SpApiError::Config)?;
    let environment = match env_opt("SPGATE_ENVIRONMENT") {
        Some(raw) => raw.parse::<Environment>().map_err(SpApiError::Config)?,
        None => Environment::default(),
    };

    let credentials =
        Credentials::new(client_id, client_secret, refresh_token, region, environment)?;
    let mut config = SpApiConfig::new(credentials);

    config.endpoint_override = env_opt("SPGATE_ENDPOINT");
    config.token_url_override = env_opt("SPGATE_TOKEN_URL");

    if let Some(timeout) = env_parse::<u64>("SPGATE_HTTP_TIMEOUT_SECS")? {
        config.http.timeout_secs = timeout;
    }
    if let Some(agent) = env_opt("SPGATE_USER_AGENT") {
        config.http.user_agent = agent;
    }
    if let Some(attempts) = env_parse::<u32>("SPGATE_REPORT_MAX_ATTEMPTS")? {
        config.polling.max_attempts = attempts;
    }
    if let Some(delay) = env_parse::<u64>("SPGATE_REPORT_POLL_INTERVAL_MS")? {
        config.polling.delay_ms = delay;
    }
    if let Some(buffer) = env_parse::<u64>("SPGATE_TOKEN_REFRESH_BUFFER_SECS")? {
        config.token.refresh_buffer_secs = buffer;
    }

    // Surface malformed override URLs now rather than on first use.
    config.resolve_endpoints()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `SpApiError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Credentials are blank or an override URL is malformed
pub fn load_from_file(path: Option<PathBuf>) -> Result<SpApiConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(SpApiError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            SpApiError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| SpApiError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.resolve_endpoints()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<SpApiConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| SpApiError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| SpApiError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(SpApiError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.extend(cwd.ancestors().take(3).map(Path::to_path_buf));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    candidate_paths(&dirs).into_iter().find(|path| path.exists())
}

fn candidate_paths(dirs: &[PathBuf]) -> Vec<PathBuf> {
    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .collect()
}

/// Get required environment variable
///
/// # Errors
/// Returns `SpApiError::Config` if the variable is not set or blank.
fn env_var(key: &str) -> Result<String> {
    env_opt(key)
        .ok_or_else(|| SpApiError::Config(format!("Missing required environment variable: {key}")))
}

/// Optional variable; blank counts as unset.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key)
        .map(|raw| {
            raw.parse::<T>().map_err(|e| SpApiError::Config(format!("Invalid {key}: {e}")))
        })
        .transpose()
}
