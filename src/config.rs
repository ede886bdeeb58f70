use std::env;
use std::fs;

use anyhow::Context;

use crate::error::RelayError;

const DEFAULT_API_HOST: &str = "https://api.honeycomb.io";

#[derive(Debug)]
pub struct Settings {
    /// Sink API credential (team key)
    pub api_key: String,
    /// Sink dataset that receives the relayed events
    pub dataset: String,
    /// Base URL of the sink event API
    pub api_host: String,
    /// HTTP server port (OTLP logs + health)
    pub http_port: u16,
}

impl Settings {
    /// Validates the settings and returns an error if invalid.
    pub fn validate(&self) -> Result<(), RelayError> {
        validate_not_empty("API key", &self.api_key)?;
        validate_not_empty("Dataset", &self.dataset)?;
        validate_api_host(&self.api_host)?;
        validate_port(self.http_port)?;
        Ok(())
    }
}

/// Validates that a required value is not empty or whitespace-only.
fn validate_not_empty(name: &str, value: &str) -> Result<(), RelayError> {
    if value.trim().is_empty() {
        return Err(RelayError::Config(format!("{name} cannot be empty")));
    }
    Ok(())
}

/// Validates that the API host is a usable http(s) base URL.
fn validate_api_host(host: &str) -> Result<(), RelayError> {
    if host.trim().is_empty() {
        return Err(RelayError::Config("API host cannot be empty".into()));
    }
    if !host.starts_with("http://") && !host.starts_with("https://") {
        return Err(RelayError::Config(format!(
            "API host must start with http:// or https://: {host}"
        )));
    }
    Ok(())
}

/// Validates that the port is in valid range (1-65535).
fn validate_port(port: u16) -> Result<(), RelayError> {
    if port == 0 {
        return Err(RelayError::Config("Port cannot be 0".into()));
    }
    Ok(())
}

/// Read a value from environment variable, with support for _FILE suffix (Docker Secrets)
fn get_env_or_file(env_name: &str) -> anyhow::Result<String> {
    // First check for _FILE suffix (Docker Secrets support)
    let file_env = format!("{env_name}_FILE");
    if let Ok(file_path) = env::var(&file_env) {
        return fs::read_to_string(&file_path)
            .map(|content| content.trim().to_string())
            .with_context(|| format!("Failed to read {file_env}"));
    }

    // Fallback to standard environment variable
    env::var(env_name).with_context(|| {
        format!("Missing required environment variable: {env_name} or {file_env}")
    })
}

pub fn get_configuration() -> anyhow::Result<Settings> {
    let api_key = get_env_or_file("HONEYCOMB_API_KEY")?;
    let dataset = env::var("HONEYCOMB_DATASET")
        .context("Missing required environment variable: HONEYCOMB_DATASET")?;
    let api_host =
        env::var("HONEYCOMB_API_HOST").unwrap_or_else(|_| DEFAULT_API_HOST.to_string());

    let http_port = env::var("HTTP_PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()
        .context("HTTP_PORT must be a valid port number")?;

    let settings = Settings {
        api_key,
        dataset,
        api_host,
        http_port,
    };

    // Validate settings before returning
    settings.validate()?;

    Ok(settings)
}
