//! Passphrase-to-cipher-key derivation.
//!
//! The external serializer never XORs with the user passphrase directly: it
//! first lowercases it and maps every ASCII letter through a fixed
//! substitution alphabet. Digits, punctuation, and anything outside `a`–`z`
//! pass through lowercased but otherwise untouched. The same derived key is
//! used for both directions — XOR is symmetric, so matching the serializer's
//! derivation exactly is what makes round trips possible.

/// Substitution alphabet indexed by `letter - b'a'`.
///
/// Injective but deliberately not self-inverse; it exists to obfuscate the
/// bundled default passphrase, not to add cryptographic strength.
const SUBSTITUTION: &[u8; 26] = b"zmylxkwjviuhtgsfreqdpcobna";

/// The XOR key actually applied to line text, after substitution.
///
/// Always non-empty; constructing one from an empty passphrase is a caller
/// bug, not a data error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveKey(Vec<char>);

impl EffectiveKey {
    fn new(chars: Vec<char>) -> Self {
        assert!(!chars.is_empty(), "cipher key must be non-empty");
        Self(chars)
    }

    /// Endless iterator over the key characters, cycled by position.
    pub(crate) fn cycled(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().copied().cycle()
    }
}

/// Derives the effective XOR key from a user-facing passphrase.
///
/// The substitution table is fixed configuration owned by the deriver; it is
/// never mutated at runtime.
#[derive(Debug, Clone)]
pub struct KeyDeriver {
    table: &'static [u8; 26],
}

impl KeyDeriver {
    pub fn new() -> Self {
        Self {
            table: SUBSTITUTION,
        }
    }

    /// Map `passphrase` to the key the transport layer XORs with.
    ///
    /// Pure and total for any non-empty input. The caller is responsible for
    /// substituting the built-in default before calling with user input that
    /// may be blank.
    pub fn derive(&self, passphrase: &str) -> EffectiveKey {
        let chars = passphrase
            .chars()
            .flat_map(|c| c.to_lowercase())
            .map(|c| match c {
                'a'..='z' => self.table[(c as u8 - b'a') as usize] as char,
                other => other,
            })
            .collect();
        EffectiveKey::new(chars)
    }
}

impl Default for KeyDeriver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitution_is_injective() {
        let mut seen = [false; 26];
        for &b in SUBSTITUTION {
            let idx = (b - b'a') as usize;
            assert!(!seen[idx], "duplicate target letter {}", b as char);
            seen[idx] = true;
        }
    }

    #[test]
    fn derives_default_passphrase() {
        let key = KeyDeriver::new().derive("com.wtfapps.apollo16");
        let derived: String = key.0.iter().collect();
        assert_eq!(derived, "yst.odkzffq.zfshhs16");
    }

    #[test]
    fn uppercase_input_is_lowercased_first() {
        let deriver = KeyDeriver::new();
        assert_eq!(deriver.derive("ABC"), deriver.derive("abc"));
    }

    #[test]
    fn non_letters_pass_through() {
        let key = KeyDeriver::new().derive("1.2-3_");
        let derived: String = key.0.iter().collect();
        assert_eq!(derived, "1.2-3_");
    }

    #[test]
    fn cycled_repeats_key() {
        let key = KeyDeriver::new().derive("no");
        let first4: Vec<char> = key.cycled().take(4).collect();
        assert_eq!(first4, vec!['g', 's', 'g', 's']);
    }

    #[test]
    #[should_panic(expected = "cipher key must be non-empty")]
    fn empty_passphrase_panics() {
        KeyDeriver::new().derive("");
    }
}
