use std::fmt;
use thiserror::Error;

/// Top-level error type for honyaku.
#[derive(Debug, Error)]
pub enum HonyakuError {
    /// The inbound webhook payload could not be decoded.
    #[error("payload error: {0}")]
    Payload(String),

    /// The webhook signature was missing or did not match.
    #[error("signature error: {0}")]
    Signature(String),

    /// Transport or decoding failure while talking to a translation provider.
    #[error("provider error: {0}")]
    Provider(String),

    /// The translation provider answered with a non-2xx status.
    #[error("provider rejected request: {0}")]
    Rejected(ProviderRejection),

    /// Error from a messaging channel.
    #[error("channel error: {0}")]
    Channel(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),
}

/// A non-2xx answer from a translation provider.
///
/// Renders as `Invalid response [<code> <status text>] <explanation>, <message>`,
/// with each optional part left out when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRejection {
    pub status: u16,
    /// Standard reason phrase for `status`, empty when the code has none.
    pub status_text: String,
    /// Provider-specific explanation from the known-error table.
    pub explanation: Option<&'static str>,
    /// The `message` field of a JSON error body.
    pub message: Option<String>,
}

impl fmt::Display for ProviderRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.status_text.is_empty() {
            write!(f, "Invalid response [{}]", self.status)?;
        } else {
            write!(f, "Invalid response [{} {}]", self.status, self.status_text)?;
        }
        if let Some(explanation) = self.explanation {
            write!(f, " {explanation}")?;
        }
        if let Some(ref message) = self.message {
            write!(f, ", {message}")?;
        }
        Ok(())
    }
}
