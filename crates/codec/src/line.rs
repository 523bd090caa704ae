//! Per-line encode/decode: transport unwrapping plus value classification.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use crate::envelope::EnvelopeCodec;
use crate::keymap::EffectiveKey;
use crate::transport::{self, TransportError};
use crate::value::Value;

/// How much of an offending line error messages carry.
const DISPLAY_LINE_LEN: usize = 30;

/// Errors that abort a document decode.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The line has no `key:value` separator, or the value segment is empty.
    #[error("malformed line (missing or empty value): {0}")]
    MalformedLine(String),

    /// The transport layer rejected the line's key or value text.
    #[error("failed to decode line {line:?}: {source}")]
    Line {
        /// Offending line, truncated for display.
        line: String,
        source: TransportError,
    },
}

/// Truncate a raw line for inclusion in an error message.
fn display_line(line: &str) -> String {
    if line.chars().count() <= DISPLAY_LINE_LEN {
        line.to_owned()
    } else {
        let head: String = line.chars().take(DISPLAY_LINE_LEN).collect();
        format!("{head}...")
    }
}

/// Codec for a single `cipheredKey:cipheredValue` line.
#[derive(Debug, Clone, Default)]
pub struct LineCodec {
    envelope: EnvelopeCodec,
}

impl LineCodec {
    pub fn new() -> Self {
        Self {
            envelope: EnvelopeCodec::new(),
        }
    }

    /// Decode one line into its plaintext name and classified value.
    ///
    /// The line is split at the *first* colon only; the value half is kept
    /// whole even when it contains further colons.
    ///
    /// Classification order is fixed: boolean equality, then int32
    /// envelope, then opaque fallback. Failing both recognizers is not an
    /// error; the inner text is preserved verbatim for round-trip fidelity.
    ///
    /// # Errors
    ///
    /// [`DecodeError::MalformedLine`] if no colon is present or the value
    /// segment is empty; [`DecodeError::Line`] if the transport layer
    /// rejects either half.
    pub fn decode(&self, line: &str, key: &EffectiveKey) -> Result<(String, Value), DecodeError> {
        let (ciphered_name, ciphered_value) = line
            .split_once(':')
            .filter(|(_, value)| !value.trim().is_empty())
            .ok_or_else(|| DecodeError::MalformedLine(display_line(line)))?;

        let wrap = |source| DecodeError::Line {
            line: display_line(line),
            source,
        };
        let name = transport::decode(ciphered_name.trim(), key).map_err(wrap)?;
        let inner = transport::decode(ciphered_value.trim(), key).map_err(wrap)?;

        let value = if let Some(b) = self.envelope.decode_bool(&inner) {
            Value::Bool(b)
        } else if let Some(v) = self.envelope.decode_int32(&inner) {
            Value::Int(v)
        } else {
            Value::Opaque(inner)
        };
        Ok((name, value))
    }

    /// Encode one name/value pair back to its ciphered line, without a
    /// trailing newline.
    ///
    /// Opaque values that already carry a serializer payload header pass
    /// through untouched; any other opaque string is wrapped as plain UTF-8
    /// Base64 content.
    ///
    /// # Errors
    ///
    /// Only [`TransportError::Unrepresentable`], which indicates an internal
    /// invariant violation rather than bad user data.
    pub fn encode(
        &self,
        name: &str,
        value: &Value,
        key: &EffectiveKey,
    ) -> Result<String, TransportError> {
        let inner = match value {
            Value::Bool(b) => self.envelope.encode_bool(*b),
            Value::Int(v) => self.envelope.encode_int32(*v),
            Value::Opaque(s) if self.envelope.is_foreign(s) => s.clone(),
            Value::Opaque(s) => STANDARD.encode(s.as_bytes()),
        };
        let ciphered_name = transport::encode(name, key)?;
        let ciphered_value = transport::encode(&inner, key)?;
        Ok(format!("{ciphered_name}:{ciphered_value}"))
    }
}
