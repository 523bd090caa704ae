//! Decoded variable values and the document-level map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One decoded save-file variable.
///
/// Serde is untagged so a whole document serializes to the flat JSON object
/// users actually edit: `{"HasUnlockedX": true, "TokenCount": 42, ...}`.
/// Booleans and integers map to their JSON counterparts; anything the
/// decoder could not classify stays an opaque string and must survive
/// re-encoding verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i32),
    /// Inner Base64 text that matched neither known envelope shape.
    Opaque(String),
}

/// All variables of one decoded document, keyed by plaintext name.
///
/// A sorted map keeps re-encoded output deterministic; the external reader
/// does not care about line order. Duplicate names resolve last-wins during
/// decode.
pub type ValueMap = BTreeMap<String, Value>;
