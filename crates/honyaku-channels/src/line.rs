//! LINE Messaging API channel.
//!
//! Inbound events arrive as webhook POSTs (decoded by [`decode_webhook`]);
//! responses go out through the reply API using each event's reply token.
//! Docs: <https://developers.line.biz/en/reference/messaging-api/>

pub mod signature;
pub mod types;

#[cfg(test)]
mod tests;

use crate::utils::split_message;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use honyaku_core::{
    config::LineConfig,
    error::HonyakuError,
    message::{IncomingMessage, MessageContent, OutgoingMessage},
    traits::Channel,
};
use std::time::Duration;
use tracing::{debug, warn};
use types::{LineEvent, LineWebhook, ReplyRequest, TextMessage};

/// Longest text a single LINE text message may carry.
pub const MAX_TEXT_CHARS: usize = 5000;
/// Most messages one reply token can deliver.
pub const MAX_REPLY_MESSAGES: usize = 5;

/// LINE channel backed by the reply API.
pub struct LineChannel {
    client: reqwest::Client,
    api_base_url: String,
    access_token: String,
}

impl LineChannel {
    /// Create a new LINE channel from config.
    pub fn new(config: &LineConfig) -> Result<Self, HonyakuError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| HonyakuError::Channel(format!("failed to build line client: {e}")))?;

        Ok(Self {
            client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
        })
    }

    /// Reply to the event identified by `reply_token`.
    ///
    /// Text longer than one message is split; anything past the reply
    /// message limit is dropped with a warning.
    pub async fn reply(&self, reply_token: &str, text: &str) -> Result<(), HonyakuError> {
        let body = build_reply(reply_token, text);
        let url = format!("{}/v2/bot/message/reply", self.api_base_url);
        debug!("line: POST {url} ({} message(s))", body.messages.len());

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| HonyakuError::Channel(format!("line reply failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            return Err(HonyakuError::Channel(format!(
                "line reply failed ({status}): {error_text}"
            )));
        }

        Ok(())
    }
}

pub(crate) fn build_reply<'a>(reply_token: &'a str, text: &'a str) -> ReplyRequest<'a> {
    let chunks = split_message(text, MAX_TEXT_CHARS);
    if chunks.len() > MAX_REPLY_MESSAGES {
        warn!(
            "line reply needs {} messages, sending the first {MAX_REPLY_MESSAGES}",
            chunks.len()
        );
    }
    ReplyRequest {
        reply_token,
        messages: chunks
            .into_iter()
            .take(MAX_REPLY_MESSAGES)
            .map(TextMessage::new)
            .collect(),
    }
}

/// Decode a webhook body into the message events it carries, in order.
///
/// Non-message events (follow, join, postback, ...) are skipped. A message
/// event without a reply token or message object makes the whole payload
/// invalid.
pub fn decode_webhook(body: &[u8]) -> Result<Vec<IncomingMessage>, HonyakuError> {
    let webhook: LineWebhook = serde_json::from_slice(body)
        .map_err(|e| HonyakuError::Payload(format!("invalid LINE webhook body: {e}")))?;

    debug!(
        "line: webhook for {} with {} event(s)",
        webhook.destination,
        webhook.events.len()
    );

    webhook
        .events
        .into_iter()
        .filter(|event| event.event_type == "message")
        .map(to_incoming)
        .collect()
}

fn to_incoming(event: LineEvent) -> Result<IncomingMessage, HonyakuError> {
    let reply_target = event
        .reply_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| HonyakuError::Payload("message event without replyToken".to_string()))?;
    let message = event
        .message
        .ok_or_else(|| HonyakuError::Payload("message event without message".to_string()))?;

    let content = match (message.message_type.as_str(), message.text) {
        ("text", Some(text)) => MessageContent::Text(text),
        ("text", None) => {
            return Err(HonyakuError::Payload(
                "text message without text".to_string(),
            ))
        }
        (other, _) => MessageContent::Unsupported(other.to_string()),
    };

    Ok(IncomingMessage {
        id: message.id,
        channel: "line".to_string(),
        sender_id: event.source.and_then(|s| s.user_id),
        reply_target,
        content,
        timestamp: DateTime::<Utc>::from_timestamp_millis(event.timestamp)
            .unwrap_or_else(Utc::now),
    })
}

#[async_trait]
impl Channel for LineChannel {
    fn name(&self) -> &str {
        "line"
    }

    async fn send(&self, message: OutgoingMessage) -> Result<(), HonyakuError> {
        self.reply(&message.reply_target, &message.text).await
    }
}
