//! Reversible codec for the `MonetizationVars` encrypted save-data format.
//!
//! The file is line-oriented text; every record is
//!
//! ```text
//! cipheredKey:cipheredValue
//! ```
//!
//! where both halves are Base64 over a repeating-key XOR of the plaintext
//! character codes. The XOR key is not the user passphrase itself but a
//! fixed per-character substitution of it ([`keymap`]). Underneath the
//! transport, values are the external .NET serializer's fixed-shape binary
//! envelopes ([`envelope`]): booleans and little-endian int32s, with
//! everything else carried opaque so re-encoded files stay byte-compatible
//! with the reader on the device.
//!
//! The codec is purely synchronous and retains nothing between calls; see
//! [`Codec`] for the document-level entry points.
//!
//! # Example
//!
//! ```
//! use mvars_codec::{Codec, Value, ValueMap};
//!
//! let mut vars = ValueMap::new();
//! vars.insert("HasGoldenHeirlooms".into(), Value::Bool(true));
//! vars.insert("MysteryTokens".into(), Value::Int(42));
//!
//! let codec = Codec::new();
//! let text = codec.encode(&vars, "").unwrap();
//! assert_eq!(codec.decode(&text, "").unwrap(), vars);
//! ```

pub mod document;
pub mod envelope;
pub mod keymap;
pub mod line;
pub mod transport;
pub mod value;

pub use document::{Codec, DEFAULT_PASSPHRASE};
pub use line::DecodeError;
pub use transport::TransportError;
pub use value::{Value, ValueMap};
