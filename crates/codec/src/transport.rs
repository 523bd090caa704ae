//! XOR-under-Base64 transport layer.
//!
//! Each line's key and value text travels as
//! `base64(utf8(plaintext XOR cycled_key))`. The XOR runs over *character
//! codes* (Unicode scalar values), not bytes — the external implementation
//! works on JS string code units, and byte-level XOR would diverge as soon
//! as a multi-byte character appears. Encode and decode are exact mirrors;
//! decoding with the wrong key produces garbage or a hard UTF-8 failure,
//! never a silent success.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use crate::keymap::EffectiveKey;

/// Errors produced by the transport layer.
///
/// `InvalidBase64` and `InvalidUtf8` are distinct so document-level errors
/// can name which stage of a line actually broke.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The ciphertext is not valid Base64.
    #[error("invalid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// The Base64 payload did not decode to valid UTF-8 (strict, not lossy).
    #[error("ciphertext is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// XORing a character against the key left the Unicode scalar range.
    #[error("XOR result U+{0:X} is not a valid character")]
    Unrepresentable(u32),
}

/// XOR `text` against the cycled key, character by character.
fn xor_chars(text: &str, key: &EffectiveKey) -> Result<String, TransportError> {
    text.chars()
        .zip(key.cycled())
        .map(|(c, k)| {
            let x = c as u32 ^ k as u32;
            char::from_u32(x).ok_or(TransportError::Unrepresentable(x))
        })
        .collect()
}

/// Cipher `plain` with `key` and wrap it for text transport.
///
/// # Errors
///
/// Returns [`TransportError::Unrepresentable`] if an XOR result has no
/// character representation. This cannot happen for the ASCII plaintext and
/// keys the format actually carries, but the guard keeps the failure loud
/// instead of corrupting output.
pub fn encode(plain: &str, key: &EffectiveKey) -> Result<String, TransportError> {
    let ciphered = xor_chars(plain, key)?;
    Ok(STANDARD.encode(ciphered.as_bytes()))
}

/// Unwrap one Base64 transport string and XOR it back to plaintext.
///
/// # Errors
///
/// Returns [`TransportError::InvalidBase64`] or [`TransportError::InvalidUtf8`]
/// depending on which stage rejected the input. A wrong key typically
/// surfaces here as `InvalidUtf8`.
pub fn decode(b64: &str, key: &EffectiveKey) -> Result<String, TransportError> {
    let bytes = STANDARD.decode(b64)?;
    let ciphered = String::from_utf8(bytes)?;
    xor_chars(&ciphered, key)
}
