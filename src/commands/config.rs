//! Configuration commands for managing supportdesk settings.
//!
//! - `config show`: Display current configuration
//! - `config get`: Print a single value
//! - `config set`: Set a configuration value

use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, OutputOptions};
use crate::config::{Config, ENDPOINT_ENV};
use crate::error::{Result, SupportError};
use crate::submit::SuccessContract;

const VALID_KEYS: &[&str] = &[
    "endpoint.url",
    "order.prefix",
    "success.contract",
    "request.timeout",
    "attachment.max_bytes",
    "attachment.extensions",
    "accept.json",
];

fn unknown_key(key: &str) -> SupportError {
    SupportError::Config(format!(
        "unknown config key '{key}'. Valid keys: {}",
        VALID_KEYS.join(", ")
    ))
}

/// Validate a config key and suggest dot notation for underscore spellings
fn validate_config_key(key: &str) -> Result<&str> {
    if VALID_KEYS.contains(&key) {
        return Ok(key);
    }

    // endpoint_url -> endpoint.url
    if let Some(pos) = key.find('_') {
        let dot_version = format!("{}.{}", &key[..pos], &key[pos + 1..]);
        if VALID_KEYS.contains(&dot_version.as_str()) {
            return Err(SupportError::Config(format!(
                "invalid config key '{key}'. Use dot notation: '{dot_version}'"
            )));
        }
    }
    Err(unknown_key(key))
}

/// Keep scheme and host of an endpoint, hide the deployment path and query
fn redact_endpoint(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(parsed)
            if parsed.path().len() > 1
                || parsed.query().is_some()
                || parsed.fragment().is_some()
                || parsed.password().is_some() =>
        {
            format!(
                "{}://{}/...",
                parsed.scheme(),
                parsed.host_str().unwrap_or_default()
            )
        }
        Ok(parsed) => parsed.to_string(),
        Err(_) => "****".to_string(),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    value.parse::<bool>().map_err(|_| {
        SupportError::Config(format!(
            "invalid value '{value}' for {key}. Expected: true or false"
        ))
    })
}

fn parse_number(key: &str, value: &str) -> Result<u64> {
    value.trim().parse::<u64>().map_err(|_| {
        SupportError::Config(format!(
            "invalid value '{value}' for {key}. Expected a non-negative integer"
        ))
    })
}

/// Comma-separated list, lowercased, leading dots dropped
fn parse_extensions(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}

/// Show current configuration
pub fn cmd_config_show(output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    let endpoint = config.configured_endpoint();
    let endpoint_from_env = std::env::var(ENDPOINT_ENV).is_ok_and(|v| !v.trim().is_empty());

    let json_output = json!({
        "endpoint": {
            "configured": endpoint.is_some(),
            "url": endpoint.as_deref().map(redact_endpoint),
            "from_env": endpoint_from_env,
        },
        "order": {
            "prefix": config.order_prefix,
        },
        "success_contract": config.success_contract.to_string(),
        "request_timeout": config.request_timeout,
        "accept_json": config.accept_json,
        "attachment": {
            "max_bytes": config.attachment.max_bytes,
            "extensions": config.attachment.allowed_extensions,
        },
        "config_file": Config::config_path().to_string_lossy(),
    });

    let mut text_output = String::new();

    text_output.push_str(&format!("{}\n\n", "Configuration:".cyan().bold()));

    text_output.push_str(&format!("{}:\n", "endpoint".cyan()));
    match &endpoint {
        Some(url) => {
            let source = if endpoint_from_env {
                format!(" ({ENDPOINT_ENV})").dimmed().to_string()
            } else {
                String::new()
            };
            text_output.push_str(&format!("  url: {}{source}\n", redact_endpoint(url)));
        }
        None => text_output.push_str(&format!("  url: {}\n", "not configured".dimmed())),
    }
    text_output.push_str(&format!("  success.contract: {}\n", config.success_contract));
    text_output.push_str(&format!("  request.timeout: {}s\n", config.request_timeout));
    text_output.push_str(&format!("  accept.json: {}\n", config.accept_json));

    text_output.push('\n');

    text_output.push_str(&format!("{}:\n", "order".cyan()));
    text_output.push_str(&format!("  prefix: {}\n", config.order_prefix));

    text_output.push('\n');

    text_output.push_str(&format!("{}:\n", "attachment".cyan()));
    text_output.push_str(&format!("  max_bytes: {}\n", config.attachment.max_bytes));
    let extensions = if config.attachment.allowed_extensions.is_empty() {
        "any".dimmed().to_string()
    } else {
        config.attachment.allowed_extensions.join(", ")
    };
    text_output.push_str(&format!("  extensions: {extensions}\n"));

    text_output.push('\n');
    text_output.push_str(&format!(
        "{}",
        format!("Config file: {}", Config::config_path().display()).dimmed()
    ));

    CommandOutput::new(json_output)
        .with_text(text_output)
        .print(output)
}

/// Set a configuration value
pub fn cmd_config_set(key: &str, value: &str, output: OutputOptions) -> Result<()> {
    validate_config_key(key)?;

    let mut config = Config::load()?;

    let stored = match key {
        "endpoint.url" => {
            config.set_endpoint_url(value)?;
            json!(value.trim())
        }
        "order.prefix" => {
            if value.trim().is_empty() {
                return Err(SupportError::Config(
                    "order.prefix cannot be empty".to_string(),
                ));
            }
            config.order_prefix = value.trim().to_string();
            json!(config.order_prefix)
        }
        "success.contract" => {
            config.success_contract = value.parse::<SuccessContract>()?;
            json!(config.success_contract.to_string())
        }
        "request.timeout" => {
            config.request_timeout = parse_number(key, value)?;
            json!(config.request_timeout)
        }
        "attachment.max_bytes" => {
            config.attachment.max_bytes = parse_number(key, value)?;
            json!(config.attachment.max_bytes)
        }
        "attachment.extensions" => {
            config.attachment.allowed_extensions = parse_extensions(value);
            json!(config.attachment.allowed_extensions)
        }
        "accept.json" => {
            config.accept_json = parse_bool(key, value)?;
            json!(config.accept_json)
        }
        _ => return Err(unknown_key(key)),
    };

    config.save()?;
    tracing::debug!(key, "config updated");

    let text_output = format!("Set {} to {}", key.cyan(), display_value(&stored));
    CommandOutput::new(json!({
        "action": "config_set",
        "key": key,
        "value": stored,
        "success": true,
    }))
    .with_text(text_output)
    .print(output)
}

fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(items) if items.is_empty() => "any".to_string(),
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

/// Get a specific configuration value
pub fn cmd_config_get(key: &str, output: OutputOptions) -> Result<()> {
    validate_config_key(key)?;

    let config = Config::load()?;

    let value = match key {
        "endpoint.url" => match config.configured_endpoint() {
            Some(url) => json!(url),
            None => return Err(SupportError::Config("endpoint.url not set".to_string())),
        },
        "order.prefix" => json!(config.order_prefix),
        "success.contract" => json!(config.success_contract.to_string()),
        "request.timeout" => json!(config.request_timeout),
        "attachment.max_bytes" => json!(config.attachment.max_bytes),
        "attachment.extensions" => json!(config.attachment.allowed_extensions),
        "accept.json" => json!(config.accept_json),
        _ => return Err(unknown_key(key)),
    };

    let text_output = display_value(&value);
    CommandOutput::new(json!({
        "key": key,
        "value": value,
    }))
    .with_text(text_output)
    .print(output)
}
