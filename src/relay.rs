//! Message relay: classify → route → translate → reply, one event at a time.

use honyaku_core::{
    config::ReplyConfig,
    error::HonyakuError,
    message::{IncomingMessage, MessageContent, OutgoingMessage},
    routing::LanguagePair,
    traits::{Channel, Translator},
};
use std::sync::Arc;
use tracing::{info, warn};

/// What happened to one inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Text was translated and the result delivered.
    Translated { pair: LanguagePair, text: String },
    /// A non-text message got the fallback prompt.
    Fallback { delivered: bool },
}

/// Wires a translation provider to a reply channel.
pub struct Relay {
    translator: Arc<dyn Translator>,
    channel: Arc<dyn Channel>,
    reply: ReplyConfig,
}

impl Relay {
    pub fn new(
        translator: Arc<dyn Translator>,
        channel: Arc<dyn Channel>,
        reply: ReplyConfig,
    ) -> Self {
        Self {
            translator,
            channel,
            reply,
        }
    }

    /// Choose a direction for `text` and translate it into a single reply string.
    pub async fn translate_text(&self, text: &str) -> Result<(LanguagePair, String), HonyakuError> {
        let pair = LanguagePair::for_text(text);
        let translation = self.translator.translate(text, pair).await?;
        Ok((pair, translation.joined(&self.reply.segment_separator)))
    }

    /// Process events in arrival order. The first failure aborts the rest.
    pub async fn handle_batch(
        &self,
        events: Vec<IncomingMessage>,
    ) -> Result<Vec<Outcome>, HonyakuError> {
        let mut outcomes = Vec::with_capacity(events.len());
        for event in events {
            outcomes.push(self.handle_message(event).await?);
        }
        Ok(outcomes)
    }

    /// Process a single message event.
    pub async fn handle_message(&self, incoming: IncomingMessage) -> Result<Outcome, HonyakuError> {
        let sender = incoming.sender_id.as_deref().unwrap_or("unknown");

        match incoming.content {
            MessageContent::Text(ref text) => {
                let (pair, translated) = self.translate_text(text).await?;
                info!(
                    "[{}] {} message {}: {pair} via {}",
                    incoming.channel,
                    sender,
                    incoming.id,
                    self.translator.name()
                );

                self.channel
                    .send(OutgoingMessage {
                        text: translated.clone(),
                        reply_target: incoming.reply_target.clone(),
                    })
                    .await?;

                Ok(Outcome::Translated {
                    pair,
                    text: translated,
                })
            }
            MessageContent::Unsupported(ref kind) => {
                info!(
                    "[{}] {} sent a {kind} message, replying with fallback prompt",
                    incoming.channel, sender
                );

                let delivered = match self
                    .channel
                    .send(OutgoingMessage {
                        text: self.reply.fallback_text.clone(),
                        reply_target: incoming.reply_target.clone(),
                    })
                    .await
                {
                    Ok(()) => true,
                    Err(e) => {
                        warn!("fallback reply to {} failed: {e}", self.channel.name());
                        false
                    }
                };

                Ok(Outcome::Fallback { delivered })
            }
        }
    }
}
