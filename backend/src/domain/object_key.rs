//! Opaque 12-byte document keys.
//!
//! Keys are rendered as 24 lowercase hexadecimal characters. Parsing accepts
//! either letter case so historical documents written with upper-case hex
//! still resolve to the same key.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

/// Number of raw bytes in an [`ObjectKey`].
pub const OBJECT_KEY_LEN: usize = 12;
/// Length of the hexadecimal text form of an [`ObjectKey`].
pub const OBJECT_KEY_HEX_LEN: usize = OBJECT_KEY_LEN * 2;

/// Errors raised while parsing an [`ObjectKey`] from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ObjectKeyError {
    /// Input was empty.
    #[error("object key must not be empty")]
    Empty,
    /// Input carried leading or trailing whitespace.
    #[error("object key must not contain surrounding whitespace")]
    Whitespace,
    /// Input had the wrong number of characters.
    #[error("object key must be {expected} hex characters (got {actual})")]
    Length { expected: usize, actual: usize },
    /// Input contained non-hexadecimal characters.
    #[error("object key must contain only hexadecimal characters")]
    NotHex,
}

/// Opaque 12-byte key identifying a stored document.
///
/// # Examples
/// ```
/// use mealbook::domain::ObjectKey;
///
/// let key: ObjectKey = "65A1F0C2B3D4E5F60718293A".parse().expect("valid key");
/// assert_eq!(key.to_string(), "65a1f0c2b3d4e5f60718293a");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectKey([u8; OBJECT_KEY_LEN]);

impl ObjectKey {
    /// Generate a fresh key: big-endian seconds since the epoch followed by
    /// eight random bytes.
    pub fn generate(now: DateTime<Utc>) -> Self {
        let seconds = u32::try_from(now.timestamp().max(0)).unwrap_or(u32::MAX);
        let tail: [u8; 8] = rand::random();
        let mut bytes = [0_u8; OBJECT_KEY_LEN];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..].copy_from_slice(&tail);
        Self(bytes)
    }

    /// Parse the hexadecimal text form.
    pub fn parse(raw: &str) -> Result<Self, ObjectKeyError> {
        if raw.is_empty() {
            return Err(ObjectKeyError::Empty);
        }
        if raw.trim() != raw {
            return Err(ObjectKeyError::Whitespace);
        }
        if raw.len() != OBJECT_KEY_HEX_LEN {
            return Err(ObjectKeyError::Length {
                expected: OBJECT_KEY_HEX_LEN,
                actual: raw.chars().count(),
            });
        }
        let mut bytes = [0_u8; OBJECT_KEY_LEN];
        hex::decode_to_slice(raw, &mut bytes).map_err(|_| ObjectKeyError::NotHex)?;
        Ok(Self(bytes))
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; OBJECT_KEY_LEN] {
        &self.0
    }

    /// Canonical lowercase hexadecimal form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ObjectKey {
    type Err = ObjectKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}
