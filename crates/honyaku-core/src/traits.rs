use crate::{
    error::HonyakuError,
    message::{OutgoingMessage, Translation},
    routing::LanguagePair,
};
use async_trait::async_trait;

/// Translation provider trait.
///
/// Every translation backend implements this trait so the relay can stay
/// agnostic of the HTTP API behind it.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Translate `text` in the direction given by `pair`.
    async fn translate(&self, text: &str, pair: LanguagePair)
        -> Result<Translation, HonyakuError>;
}

/// Messaging channel trait.
///
/// Delivers replies back to the conversation an inbound event came from.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name.
    fn name(&self) -> &str;

    /// Send a reply back through this channel.
    async fn send(&self, message: OutgoingMessage) -> Result<(), HonyakuError>;
}
