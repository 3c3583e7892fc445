//! # Reference Grammar
//!
//! Classifies a scalar string as a secret reference or a literal.
//!
//! | Value                     | Reference                 |
//! |---------------------------|---------------------------|
//! | `$$`                      | `SelfKey` (enclosing key) |
//! | `$SECRET`                 | `SelfKey` (enclosing key) |
//! | `$SECRET:<path>`          | `ExplicitPath(<path>)`    |
//! | anything else             | `Plain`                   |
//!
//! Matching is exact and case-sensitive; surrounding whitespace is not trimmed.

use crate::constants::{SECRET_MARKER, SECRET_PATH_PREFIX, SELF_KEY_MARKER};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretReference<'a> {
    /// Lookup key is the enclosing map key
    SelfKey(&'a str),
    /// Lookup key is the text after `$SECRET:`, verbatim
    ExplicitPath(&'a str),
    /// Not a reference
    Plain(&'a str),
}

impl<'a> SecretReference<'a> {
    /// Classify `raw`, found under map key `current_key`
    #[must_use]
    pub fn classify(raw: &'a str, current_key: &'a str) -> Self {
        if raw == SELF_KEY_MARKER || raw == SECRET_MARKER {
            SecretReference::SelfKey(current_key)
        } else if let Some(path) = raw.strip_prefix(SECRET_PATH_PREFIX) {
            SecretReference::ExplicitPath(path)
        } else {
            SecretReference::Plain(raw)
        }
    }

    /// Key to hand to the resolver, `None` for plain values
    #[must_use]
    pub fn lookup_key(&self) -> Option<&'a str> {
        match *self {
            SecretReference::SelfKey(key) | SecretReference::ExplicitPath(key) => Some(key),
            SecretReference::Plain(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_key_markers() {
        assert_eq!(
            SecretReference::classify("$$", "db_passwd"),
            SecretReference::SelfKey("db_passwd")
        );
        assert_eq!(
            SecretReference::classify("$SECRET", "db_pwd"),
            SecretReference::SelfKey("db_pwd")
        );
        assert_eq!(
            SecretReference::classify("$$", "db_passwd").lookup_key(),
            Some("db_passwd")
        );
    }

    #[test]
    fn test_explicit_path() {
        assert_eq!(
            SecretReference::classify("$SECRET:/custom/parameter/path", "db_password"),
            SecretReference::ExplicitPath("/custom/parameter/path")
        );
        assert_eq!(
            SecretReference::classify("$SECRET:relative/key", "k"),
            SecretReference::ExplicitPath("relative/key")
        );
    }

    #[test]
    fn test_empty_explicit_path_is_still_a_reference() {
        let reference = SecretReference::classify("$SECRET:", "k");
        assert_eq!(reference, SecretReference::ExplicitPath(""));
        assert_eq!(reference.lookup_key(), Some(""));
    }

    #[test]
    fn test_plain_values() {
        for raw in ["", "plain", "$", "$$$", "$secret", " $$", "$SECRETS", "x$SECRET:/a"] {
            let reference = SecretReference::classify(raw, "k");
            assert_eq!(reference, SecretReference::Plain(raw), "value {raw:?}");
            assert_eq!(reference.lookup_key(), None);
        }
    }

    #[test]
    fn test_classification_ignores_key_for_explicit_and_plain() {
        assert_eq!(
            SecretReference::classify("$SECRET:/a", "one"),
            SecretReference::classify("$SECRET:/a", "two")
        );
        assert_eq!(
            SecretReference::classify("value", "one"),
            SecretReference::classify("value", "two")
        );
    }
}
