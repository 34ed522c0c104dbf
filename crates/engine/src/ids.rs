//! Record identifiers.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::EngineError;

/// Opaque storage identifier: 24 lowercase hexadecimal characters encoding
/// 12 bytes (4 bytes of unix seconds followed by 8 random bytes).
///
/// Assigned by the store exactly once on create and immutable afterwards.
/// Parsing accepts either case and normalizes to lowercase, so lookups are
/// insensitive to how the caller spells the hex digits.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Generates a fresh identifier.
    pub fn generate() -> Self {
        let seconds = Utc::now().timestamp() as u32;
        let entropy = Uuid::new_v4();
        let mut encoded = format!("{seconds:08x}");
        for byte in &entropy.as_bytes()[..8] {
            encoded.push_str(&format!("{byte:02x}"));
        }
        RecordId(encoded)
    }

    /// Parses an identifier, rejecting anything that is not exactly 24
    /// hexadecimal characters.
    pub fn parse(value: &str) -> Result<Self, EngineError> {
        if value.len() == 24 && value.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            Ok(RecordId(value.to_ascii_lowercase()))
        } else {
            Err(EngineError::InvalidId(value.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RecordId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RecordId {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_24_hex_characters() {
        let id = RecordId::parse("5dcaad2526235a471cfcccaf").unwrap();
        assert_eq!(id.as_str(), "5dcaad2526235a471cfcccaf");
    }

    #[test]
    fn normalizes_uppercase_digits() {
        let id = RecordId::parse("5DCAAD2526235A471CFCCCAF").unwrap();
        assert_eq!(id.as_str(), "5dcaad2526235a471cfcccaf");
    }

    #[test]
    fn rejects_malformed_values() {
        for value in ["", "123456", "5dcaad2526235a471cfcccar"] {
            assert!(matches!(
                RecordId::parse(value),
                Err(EngineError::InvalidId(_))
            ));
        }
    }

    #[test]
    fn generated_ids_are_valid_and_distinct() {
        let a = RecordId::generate();
        let b = RecordId::generate();
        assert_eq!(a.as_str().len(), 24);
        assert!(RecordId::parse(a.as_str()).is_ok());
        assert_ne!(a, b);
    }
}
