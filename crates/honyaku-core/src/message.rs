use chrono::{DateTime, Utc};

/// An incoming message event decoded from a channel webhook.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    /// Platform message ID.
    pub id: String,
    /// Channel name (e.g. "line").
    pub channel: String,
    /// Platform-specific user ID, when the platform discloses it.
    pub sender_id: Option<String>,
    /// Platform-specific target for routing the response (e.g. a LINE reply token).
    pub reply_target: String,
    pub content: MessageContent,
    pub timestamp: DateTime<Utc>,
}

/// What the user sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageContent {
    Text(String),
    /// Any non-text message; holds the platform's type name ("image", "sticker", ...).
    Unsupported(String),
}

impl MessageContent {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Unsupported(_) => None,
        }
    }
}

/// An outgoing message to send back through a channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub text: String,
    /// Platform-specific target for routing (e.g. a LINE reply token).
    pub reply_target: String,
}

/// Ordered text segments returned by a translation provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translation {
    pub segments: Vec<String>,
    /// Source language reported by the provider, if any.
    pub detected_source: Option<String>,
}

impl Translation {
    /// Concatenate all segments with `separator` between them.
    pub fn joined(&self, separator: &str) -> String {
        self.segments.join(separator)
    }
}
