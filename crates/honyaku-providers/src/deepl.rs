//! DeepL translation API provider.
//!
//! Sends form-encoded `POST /translate` requests and turns non-2xx answers
//! into typed rejections using DeepL's documented status codes.
//! Docs: <https://developers.deepl.com/docs/api-reference/translate>

mod known_errors;


pub use known_errors::explain;

use async_trait::async_trait;
use honyaku_core::{
    config::DeepLConfig,
    error::{HonyakuError, ProviderRejection},
    message::Translation,
    routing::LanguagePair,
    traits::Translator,
};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::debug;

/// DeepL provider.
pub struct DeepLTranslator {
    client: reqwest::Client,
    base_url: String,
    auth_key: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeepLResponse {
    #[serde(default)]
    pub translations: Vec<DeepLTranslation>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeepLTranslation {
    pub detected_source_language: Option<String>,
    pub text: String,
}

/// Character usage for the current billing period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Usage {
    pub character_count: u64,
    pub character_limit: u64,
}

impl DeepLTranslator {
    /// Create from config values.
    pub fn from_config(config: &DeepLConfig) -> Result<Self, HonyakuError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| HonyakuError::Provider(format!("deepl client build failed: {e}")))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_key: config.auth_key.clone(),
        })
    }

    fn auth_header(&self) -> String {
        format!("DeepL-Auth-Key {}", self.auth_key)
    }

    /// Query character usage (`GET /usage`).
    pub async fn usage(&self) -> Result<Usage, HonyakuError> {
        let url = format!("{}/usage", self.base_url);
        debug!("deepl: GET {url}");

        let resp = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(|e| HonyakuError::Provider(format!("deepl usage request failed: {e}")))?;

        let status = resp.status();
        let body = resp.bytes().await.map_err(parse_context)?;
        validate_response(status, &body)?;
        serde_json::from_slice(&body).map_err(parse_context)
    }
}

/// Form fields for a translate call.
pub(crate) fn form_params<'a>(text: &'a str, pair: LanguagePair) -> [(&'static str, &'a str); 3] {
    [
        ("text", text),
        ("source_lang", pair.source),
        ("target_lang", pair.target),
    ]
}

/// Reject any status outside `[200, 300)`.
///
/// The error carries the known DeepL explanation for the status and, when the
/// body is a JSON object with a `message` field, that message. A body that is
/// not JSON only drops the message; it never produces a second error.
pub fn validate_response(status: StatusCode, body: &[u8]) -> Result<(), HonyakuError> {
    if status.is_success() {
        return Ok(());
    }

    let message = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| match v.get("message") {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(serde_json::Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        });

    Err(HonyakuError::Rejected(ProviderRejection {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_string(),
        explanation: explain(status.as_u16()),
        message,
    }))
}

/// Decode a successful translate body.
pub(crate) fn parse_response(body: &[u8]) -> Result<Translation, HonyakuError> {
    let parsed: DeepLResponse = serde_json::from_slice(body).map_err(parse_context)?;

    let detected_source = parsed
        .translations
        .first()
        .and_then(|t| t.detected_source_language.clone());

    Ok(Translation {
        segments: parsed.translations.into_iter().map(|t| t.text).collect(),
        detected_source,
    })
}

fn parse_context(e: impl std::fmt::Display) -> HonyakuError {
    HonyakuError::Provider(format!("{e} (occurred while parsing response)"))
}

#[async_trait]
impl Translator for DeepLTranslator {
    fn name(&self) -> &str {
        "deepl"
    }

    async fn translate(
        &self,
        text: &str,
        pair: LanguagePair,
    ) -> Result<Translation, HonyakuError> {
        let url = format!("{}/translate", self.base_url);
        let start = Instant::now();
        debug!("deepl: POST {url} {pair}");

        let resp = self
            .client
            .post(&url)
            .header("Authorization", self.auth_header())
            .form(&form_params(text, pair))
            .send()
            .await
            .map_err(|e| HonyakuError::Provider(format!("deepl request failed: {e}")))?;

        let status = resp.status();
        let body = resp.bytes().await.map_err(parse_context)?;
        validate_response(status, &body)?;
        let translation = parse_response(&body)?;

        debug!(
            "deepl: {} segment(s) in {}ms",
            translation.segments.len(),
            start.elapsed().as_millis()
        );
        Ok(translation)
    }
}
