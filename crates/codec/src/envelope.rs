//! Fixed-shape binary envelopes written by the external .NET serializer.
//!
//! Underneath the transport layer, every value is the Base64 rendering of a
//! `BinaryFormatter` payload. Only two shapes are ever produced for
//! primitives:
//!
//! - `System.Boolean` — three known Base64 spellings, matched by exact
//!   string equality and never parsed byte-by-byte.
//! - `System.Int32` — a 49-byte constant header, four little-endian value
//!   bytes, and a single trailer byte (0x0B).
//!
//! Anything else is opaque and must survive a round trip verbatim: one
//! wrong byte and the external reader rejects the whole file.

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Base64 `BinaryFormatter` payload for `System.Boolean` = true.
pub const BOOL_TRUE_STANDARD: &str =
    "AAEAAAD/////AQAAAAAAAAAEAQAAAA5TeXN0ZW0uQm9vbGVhbgEAAAAHbV92YWx1ZQABAQs=";

/// Alternate true spelling seen in files from older app builds. Accepted on
/// decode, never produced on encode.
pub const BOOL_TRUE_VARIANT: &str =
    "AAEAAAD/////AQAAAAAAAAAEAQAAAA5TeXN0ZW0uQm9vbGVhbgEAAAAHbV92YWx1ZQABAAs=";

/// Base64 `BinaryFormatter` payload for `System.Boolean` = false.
pub const BOOL_FALSE_STANDARD: &str =
    "AAEAAAD/////AQAAAAAAAAAEAQAAAA5TeXN0ZW0uQm9vbGVhbgEAAAAHbV92YWx1ZQABAAw=";

/// Header bytes of a serialized `System.Int32`, up to the value itself.
const INT32_PREFIX: &[u8] = &[
    0, 1, 0, 0, 0, 255, 255, 255, 255, 1, 0, 0, 0, 0, 0, 0, 0, 4, 1, 0, 0, 0, 12, 83, 121, 115,
    116, 101, 109, 46, 73, 110, 116, 51, 50, 1, 0, 0, 0, 7, 109, 95, 118, 97, 108, 117, 101, 0, 8,
];

/// Trailer byte closing a serialized `System.Int32`.
const INT32_SUFFIX: &[u8] = &[11];

/// Base64 text shared by every `BinaryFormatter` payload header. An opaque
/// value starting with this is already serializer output and must be passed
/// through unmodified on encode.
const FOREIGN_HEADER: &str = "AAEAAAD";

/// Encoder/decoder for the two known primitive envelope shapes.
///
/// The byte constants are immutable configuration owned by the value; there
/// is no process-wide mutable state.
#[derive(Debug, Clone)]
pub struct EnvelopeCodec {
    prefix: &'static [u8],
    suffix: &'static [u8],
}

impl EnvelopeCodec {
    pub fn new() -> Self {
        Self {
            prefix: INT32_PREFIX,
            suffix: INT32_SUFFIX,
        }
    }

    /// Total decoded byte length of a valid int32 envelope.
    fn int32_total_len(&self) -> usize {
        self.prefix.len() + 4 + self.suffix.len()
    }

    /// Inner Base64 text for a boolean. Always the standard spellings.
    pub fn encode_bool(&self, value: bool) -> String {
        if value {
            BOOL_TRUE_STANDARD.to_owned()
        } else {
            BOOL_FALSE_STANDARD.to_owned()
        }
    }

    /// Recognize a boolean payload by exact string equality.
    ///
    /// Returns `None` for anything that is not one of the three known
    /// spellings — that is classification, not an error.
    pub fn decode_bool(&self, inner: &str) -> Option<bool> {
        match inner {
            BOOL_TRUE_STANDARD | BOOL_TRUE_VARIANT => Some(true),
            BOOL_FALSE_STANDARD => Some(false),
            _ => None,
        }
    }

    /// Build the Base64 int32 envelope: prefix ++ little-endian value ++ suffix.
    pub fn encode_int32(&self, value: i32) -> String {
        let mut bytes = Vec::with_capacity(self.int32_total_len());
        bytes.extend_from_slice(self.prefix);
        bytes.extend_from_slice(&value.to_le_bytes());
        bytes.extend_from_slice(self.suffix);
        STANDARD.encode(&bytes)
    }

    /// Recognize and read an int32 envelope.
    ///
    /// Returns `None` when `inner` is not Base64, has the wrong total
    /// length, or mismatches the prefix or suffix — any of which simply
    /// means "not an int32".
    pub fn decode_int32(&self, inner: &str) -> Option<i32> {
        let bytes = STANDARD.decode(inner).ok()?;
        if bytes.len() != self.int32_total_len() {
            return None;
        }
        let (head, rest) = bytes.split_at(self.prefix.len());
        if head != self.prefix || bytes[bytes.len() - 1] != self.suffix[0] {
            return None;
        }
        let value_bytes: [u8; 4] = rest[..4].try_into().ok()?;
        Some(i32::from_le_bytes(value_bytes))
    }

    /// Whether `inner` already carries a serializer payload header and must
    /// be passed through untouched instead of re-wrapped as plain text.
    pub fn is_foreign(&self, inner: &str) -> bool {
        inner.starts_with(FOREIGN_HEADER)
    }
}

impl Default for EnvelopeCodec {
    fn default() -> Self {
        Self::new()
    }
}
