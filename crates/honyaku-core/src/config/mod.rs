mod defaults;


use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::HonyakuError;
use defaults::*;

/// Env var holding the LINE channel secret.
pub const ENV_CHANNEL_SECRET: &str = "CHANNELSECRET";
/// Env var holding the LINE channel access token.
pub const ENV_LINE_ACCESS_TOKEN: &str = "LINEACCESSTOKEN";
/// Env var holding the DeepL auth key.
pub const ENV_DEEPL_AUTH_KEY: &str = "ACCESSTOKEN";

/// Top-level honyaku configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub line: LineConfig,
    #[serde(default)]
    pub deepl: DeepLConfig,
    #[serde(default)]
    pub reply: ReplyConfig,
}

/// General service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_name")]
    pub name: String,
    /// Log filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            log_level: default_log_level(),
        }
    }
}

/// HTTP server that receives webhook callbacks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_host")]
    pub host: String,
    #[serde(default = "default_api_port")]
    pub port: u16,
    #[serde(default = "default_webhook_path")]
    pub webhook_path: String,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_api_host(),
            port: default_api_port(),
            webhook_path: default_webhook_path(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// LINE Messaging API channel config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineConfig {
    /// Secret used to sign webhook bodies (`X-Line-Signature`).
    #[serde(default)]
    pub channel_secret: String,
    /// Long-lived channel access token for the reply API.
    #[serde(default)]
    pub access_token: String,
    #[serde(default = "default_line_api_base_url")]
    pub api_base_url: String,
    /// Reject webhook calls whose signature does not match.
    #[serde(default = "default_true")]
    pub verify_signature: bool,
    /// Request timeout for reply API calls.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            channel_secret: String::new(),
            access_token: String::new(),
            api_base_url: default_line_api_base_url(),
            verify_signature: true,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// DeepL translation API config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeepLConfig {
    #[serde(default)]
    pub auth_key: String,
    /// API root, e.g. `https://api-free.deepl.com/v2` or `https://api.deepl.com/v2`.
    #[serde(default = "default_deepl_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for DeepLConfig {
    fn default() -> Self {
        Self {
            auth_key: String::new(),
            base_url: default_deepl_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Reply wording.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyConfig {
    /// Sent when a user posts anything other than text.
    #[serde(default = "default_fallback_text")]
    pub fallback_text: String,
    /// Placed between translated segments.
    #[serde(default = "default_segment_separator")]
    pub segment_separator: String,
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            fallback_text: default_fallback_text(),
            segment_separator: default_segment_separator(),
        }
    }
}

impl Config {
    /// Overlay credentials from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Overlay credentials from `lookup`. Empty values are ignored.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let targets: [(&str, &mut String); 3] = [
            (ENV_CHANNEL_SECRET, &mut self.line.channel_secret),
            (ENV_LINE_ACCESS_TOKEN, &mut self.line.access_token),
            (ENV_DEEPL_AUTH_KEY, &mut self.deepl.auth_key),
        ];
        for (key, slot) in targets {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                *slot = value;
            }
        }
    }

    /// Check that everything the webhook server needs is present.
    pub fn validate(&self) -> Result<(), HonyakuError> {
        if self.deepl.auth_key.is_empty() {
            return Err(HonyakuError::Config(format!(
                "deepl.auth_key is empty. Set it in the config file or the {ENV_DEEPL_AUTH_KEY} env var."
            )));
        }
        if self.line.access_token.is_empty() {
            return Err(HonyakuError::Config(format!(
                "line.access_token is empty. Set it in the config file or the {ENV_LINE_ACCESS_TOKEN} env var."
            )));
        }
        if self.line.verify_signature && self.line.channel_secret.is_empty() {
            return Err(HonyakuError::Config(format!(
                "line.verify_signature is on but line.channel_secret is empty. \
                 Set it in the config file or the {ENV_CHANNEL_SECRET} env var."
            )));
        }
        if !self.api.webhook_path.starts_with('/') {
            return Err(HonyakuError::Config(format!(
                "api.webhook_path must start with '/', got '{}'",
                self.api.webhook_path
            )));
        }
        Ok(())
    }
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, HonyakuError> {
    let path = Path::new(path);
    if !path.exists() {
        info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| HonyakuError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    parse(&content)
}

/// Parse configuration from TOML text.
pub fn parse(content: &str) -> Result<Config, HonyakuError> {
    toml::from_str(content)
        .map_err(|e| HonyakuError::Config(format!("failed to parse config: {e}")))
}
