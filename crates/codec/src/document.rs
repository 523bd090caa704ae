//! Whole-document decode/encode.

use tracing::debug;

use crate::keymap::{EffectiveKey, KeyDeriver};
use crate::line::{DecodeError, LineCodec};
use crate::transport::TransportError;
use crate::value::ValueMap;

/// Passphrase baked into the app; used whenever the caller supplies none.
pub const DEFAULT_PASSPHRASE: &str = "com.wtfapps.apollo16";

/// Document-level codec: applies [`LineCodec`] across every line of a file.
///
/// Stateless between calls — each operation derives its key fresh and
/// returns an owned result, so one value can be shared across call sites
/// without locking.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    deriver: KeyDeriver,
    line: LineCodec,
}

impl Codec {
    pub fn new() -> Self {
        Self {
            deriver: KeyDeriver::new(),
            line: LineCodec::new(),
        }
    }

    /// Resolve the passphrase (falling back to the built-in default when
    /// blank) and derive the effective key once for the whole operation.
    fn effective_key(&self, passphrase: &str) -> EffectiveKey {
        let passphrase = match passphrase.trim() {
            "" => DEFAULT_PASSPHRASE,
            other => other,
        };
        self.deriver.derive(passphrase)
    }

    /// Decode a full document into its variable map.
    ///
    /// Blank and whitespace-only lines are skipped; duplicate names resolve
    /// last-wins. Decoding is all-or-nothing: the first line that fails
    /// aborts the call, and no partial map is returned.
    ///
    /// # Errors
    ///
    /// Any [`DecodeError`] from the first offending line.
    pub fn decode(&self, text: &str, passphrase: &str) -> Result<ValueMap, DecodeError> {
        let key = self.effective_key(passphrase);
        let mut map = ValueMap::new();
        let mut lines = 0usize;
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            let (name, value) = self.line.decode(line, &key)?;
            map.insert(name, value);
            lines += 1;
        }
        debug!(lines, entries = map.len(), "document decoded");
        Ok(map)
    }

    /// Encode a variable map back to file text: one line per entry in map
    /// iteration order, `\n`-joined, no trailing newline.
    ///
    /// # Errors
    ///
    /// Only internal transport invariant violations; see
    /// [`TransportError::Unrepresentable`].
    pub fn encode(&self, map: &ValueMap, passphrase: &str) -> Result<String, TransportError> {
        let key = self.effective_key(passphrase);
        let lines: Vec<String> = map
            .iter()
            .map(|(name, value)| self.line.encode(name, value, &key))
            .collect::<Result<_, _>>()?;
        debug!(entries = lines.len(), "document encoded");
        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::BOOL_TRUE_STANDARD;
    use crate::value::Value;

    fn sample_map() -> ValueMap {
        let mut map = ValueMap::new();
        map.insert("HasGoldenPets".into(), Value::Bool(true));
        map.insert("IsRefundEligible".into(), Value::Bool(false));
        map.insert("TokenBalance".into(), Value::Int(-42));
        // A serializer payload the classifier does not recognize (a
        // System.String envelope) — carried opaque, byte for byte.
        map.insert(
            "ReceiptBlob".into(),
            Value::Opaque("AAEAAAD/////AQAAAAAAAAAGAQAAAAVoZWxsbws=".into()),
        );
        map
    }

    #[test]
    fn round_trip_with_default_passphrase() {
        let codec = Codec::new();
        let text = codec.encode(&sample_map(), "").unwrap();
        let decoded = codec.decode(&text, "").unwrap();
        assert_eq!(decoded, sample_map());
    }

    #[test]
    fn round_trip_with_custom_passphrase() {
        let codec = Codec::new();
        let text = codec.encode(&sample_map(), "my.custom.key").unwrap();
        let decoded = codec.decode(&text, "my.custom.key").unwrap();
        assert_eq!(decoded, sample_map());
    }

    #[test]
    fn blank_passphrase_matches_default() {
        let codec = Codec::new();
        let text = codec.encode(&sample_map(), DEFAULT_PASSPHRASE).unwrap();
        assert_eq!(codec.encode(&sample_map(), "  ").unwrap(), text);
    }

    #[test]
    fn output_has_no_trailing_newline() {
        let codec = Codec::new();
        let text = codec.encode(&sample_map(), "").unwrap();
        assert!(!text.ends_with('\n'));
        assert_eq!(text.lines().count(), sample_map().len());
    }

    #[test]
    fn blank_lines_are_skipped() {
        let codec = Codec::new();
        let text = codec.encode(&sample_map(), "").unwrap();
        let padded = format!("\n{}\n\n   \n", text.replace('\n', "\n\n"));
        let decoded = codec.decode(&padded, "").unwrap();
        assert_eq!(decoded, sample_map());
    }

    #[test]
    fn duplicate_names_last_wins() {
        let codec = Codec::new();
        let mut first = ValueMap::new();
        first.insert("Counter".into(), Value::Int(1));
        let mut second = ValueMap::new();
        second.insert("Counter".into(), Value::Int(2));
        let text = format!(
            "{}\n{}",
            codec.encode(&first, "").unwrap(),
            codec.encode(&second, "").unwrap()
        );
        let decoded = codec.decode(&text, "").unwrap();
        assert_eq!(decoded["Counter"], Value::Int(2));
        assert_eq!(decoded.len(), 1);
    }

    #[test]
    fn malformed_line_aborts_document() {
        let codec = Codec::new();
        let mut text = codec.encode(&sample_map(), "").unwrap();
        text.push_str("\nnovaluehere");
        assert!(codec.decode(&text, "").is_err());
    }

    #[test]
    fn wrong_key_never_reproduces_original() {
        let codec = Codec::new();
        let text = codec.encode(&sample_map(), "keyA").unwrap();
        match codec.decode(&text, "keyB") {
            Ok(map) => assert_ne!(map, sample_map()),
            Err(_) => {} // hard transport failure is the other allowed outcome
        }
    }

    #[test]
    fn foreign_envelope_passthrough_decodes_as_bool() {
        let codec = Codec::new();
        let mut map = ValueMap::new();
        map.insert("Flag".into(), Value::Opaque(BOOL_TRUE_STANDARD.into()));
        let text = codec.encode(&map, "").unwrap();
        let decoded = codec.decode(&text, "").unwrap();
        assert_eq!(decoded["Flag"], Value::Bool(true));
    }
}
