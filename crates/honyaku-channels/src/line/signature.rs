//! `X-Line-Signature` verification: base64(HMAC-SHA256(channel secret, raw body)).

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hmac::{Hmac, Mac};
use honyaku_core::error::HonyakuError;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the webhook signature.
pub const SIGNATURE_HEADER: &str = "x-line-signature";

fn mac_for(secret: &str) -> Result<HmacSha256, HonyakuError> {
    HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| HonyakuError::Signature(format!("invalid channel secret: {e}")))
}

/// Compute the signature LINE would send for `body`.
pub fn sign(secret: &str, body: &[u8]) -> Result<String, HonyakuError> {
    let mut mac = mac_for(secret)?;
    mac.update(body);
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

/// Check `signature` against `body`. Comparison is constant-time.
pub fn verify(secret: &str, body: &[u8], signature: &str) -> Result<(), HonyakuError> {
    let expected = BASE64
        .decode(signature.trim())
        .map_err(|_| HonyakuError::Signature("signature is not valid base64".to_string()))?;

    let mut mac = mac_for(secret)?;
    mac.update(body);
    mac.verify_slice(&expected)
        .map_err(|_| HonyakuError::Signature("signature mismatch".to_string()))
}
