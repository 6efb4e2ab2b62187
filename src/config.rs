//! Top-level application configuration.
//!
//! Configuration is stored in `.supportdesk/config.yaml` and includes:
//! - The submission endpoint URL
//! - The literal order-reference prefix
//! - The success contract agreed with the endpoint
//! - Request timeout and attachment limits

use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, SupportError};
use crate::submit::SuccessContract;
use crate::ticket::AttachmentPolicy;
use crate::types::{DEFAULT_ORDER_PREFIX, SUPPORT_DIR};

/// Environment variable that overrides the configured endpoint
pub const ENDPOINT_ENV: &str = "SUPPORTDESK_ENDPOINT_URL";

/// Environment variable that relocates the `.supportdesk` directory
pub const ROOT_ENV: &str = "SUPPORTDESK_ROOT";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where tickets are POSTed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,

    /// Literal text every order reference starts with
    #[serde(default = "default_order_prefix")]
    pub order_prefix: String,

    /// How responses are judged successful
    #[serde(default)]
    pub success_contract: SuccessContract,

    /// Request timeout in seconds (default: 30, 0 = client default)
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Send `Accept: application/json` with each submission
    #[serde(default = "default_accept_json")]
    pub accept_json: bool,

    /// Attachment limits
    #[serde(default, skip_serializing_if = "AttachmentPolicy::is_default")]
    pub attachment: AttachmentPolicy,
}

fn default_order_prefix() -> String {
    DEFAULT_ORDER_PREFIX.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_accept_json() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint_url: None,
            order_prefix: default_order_prefix(),
            success_contract: SuccessContract::default(),
            request_timeout: default_request_timeout(),
            accept_json: default_accept_json(),
            attachment: AttachmentPolicy::default(),
        }
    }
}

/// Returns the `.supportdesk` directory, honoring `SUPPORTDESK_ROOT`
pub fn support_root() -> PathBuf {
    match env::var(ROOT_ENV) {
        Ok(root) if !root.is_empty() => PathBuf::from(root),
        _ => PathBuf::from(SUPPORT_DIR),
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        support_root().join("config.yaml")
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            SupportError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SupportError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create directory for config at {}: {}",
                        parent.display(),
                        e
                    ),
                ))
            })?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content).map_err(|e| {
            SupportError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config at {}: {}", path.display(), e),
            ))
        })?;

        // Owner read/write only; the endpoint URL of an Apps Script deployment is a credential
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&path, permissions)?;
        }

        Ok(())
    }

    /// Raw endpoint from the environment or the config file
    pub fn configured_endpoint(&self) -> Option<String> {
        if let Ok(url) = env::var(ENDPOINT_ENV)
            && !url.trim().is_empty()
        {
            return Some(url.trim().to_string());
        }
        self.endpoint_url.clone()
    }

    /// Resolve the endpoint: `override_url`, then environment, then file
    pub fn endpoint_url(&self, override_url: Option<&str>) -> Result<Url> {
        let raw = override_url
            .map(str::to_string)
            .or_else(|| self.configured_endpoint())
            .ok_or_else(|| {
                SupportError::Config(format!(
                    "no submission endpoint configured. Set {ENDPOINT_ENV} or run: supportdesk config set endpoint.url <url>"
                ))
            })?;

        parse_endpoint(&raw)
    }

    pub fn set_endpoint_url(&mut self, url: &str) -> Result<()> {
        parse_endpoint(url)?;
        self.endpoint_url = Some(url.trim().to_string());
        Ok(())
    }

    /// Timeout for a submission request; `None` leaves the client default
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout > 0).then(|| Duration::from_secs(self.request_timeout))
    }
}

/// Parse and sanity-check an endpoint URL
pub fn parse_endpoint(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| SupportError::Config(format!("invalid endpoint URL '{raw}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(SupportError::Config(format!(
            "endpoint must be an http(s) URL, got '{raw}'"
        )));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.endpoint_url.is_none());
        assert_eq!(config.order_prefix, "#PM157");
        assert_eq!(config.success_contract, SuccessContract::Status);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
        assert!(config.accept_json);
        assert!(config.attachment.is_default());
    }

    #[test]
    fn test_config_missing_fields_use_defaults() {
        let yaml = r#"
endpoint_url: https://script.google.com/macros/s/abc/exec
success_contract: ok_flag
"#;
        let config: Config = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.order_prefix, "#PM157");
        assert_eq!(config.success_contract, SuccessContract::OkFlag);
        assert_eq!(config.request_timeout, 30);
        assert!(config.accept_json);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let mut config = Config::default();
        config
            .set_endpoint_url("https://support.example.com/api/tickets")
            .unwrap();
        config.order_prefix = "#AB".to_string();
        config.attachment.max_bytes = 2048;
        config.attachment.allowed_extensions = vec!["jpg".to_string()];

        let yaml = serde_yaml_ng::to_string(&config).unwrap();
        let parsed: Config = serde_yaml_ng::from_str(&yaml).unwrap();

        assert_eq!(
            parsed.endpoint_url.as_deref(),
            Some("https://support.example.com/api/tickets")
        );
        assert_eq!(parsed.order_prefix, "#AB");
        assert_eq!(parsed.attachment.max_bytes, 2048);
        assert_eq!(parsed.attachment.allowed_extensions, vec!["jpg"]);
    }

    #[test]
    fn test_zero_timeout_means_client_default() {
        let config = Config {
            request_timeout: 0,
            ..Default::default()
        };
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_set_endpoint_rejects_garbage() {
        let mut config = Config::default();
        assert!(config.set_endpoint_url("not a url").is_err());
        assert!(config.set_endpoint_url("mailto:help@example.com").is_err());
        assert!(config.endpoint_url.is_none());
    }

    #[test]
    #[serial]
    fn test_endpoint_precedence() {
        let mut config = Config::default();
        config.set_endpoint_url("https://file.example.com/").unwrap();

        unsafe { env::remove_var(ENDPOINT_ENV) };
        assert_eq!(
            config.endpoint_url(None).unwrap().as_str(),
            "https://file.example.com/"
        );

        unsafe { env::set_var(ENDPOINT_ENV, "https://env.example.com/") };
        assert_eq!(
            config.endpoint_url(None).unwrap().as_str(),
            "https://env.example.com/"
        );
        assert_eq!(
            config
                .endpoint_url(Some("https://flag.example.com/"))
                .unwrap()
                .as_str(),
            "https://flag.example.com/"
        );
        unsafe { env::remove_var(ENDPOINT_ENV) };
    }

    #[test]
    #[serial]
    fn test_missing_endpoint_is_config_error() {
        unsafe { env::remove_var(ENDPOINT_ENV) };
        let err = Config::default().endpoint_url(None).unwrap_err();
        assert!(matches!(err, SupportError::Config(_)));
        assert!(err.to_string().contains(ENDPOINT_ENV));
    }
}
