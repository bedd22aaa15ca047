//! Meal ownership resolution.
//!
//! Meal documents written by older revisions stored the owning user either
//! as a typed reference (`{"$oid": "<hex>"}`) or as a plain hex string. This
//! module is the single authority that maps either encoding onto a canonical
//! [`UserId`]. Query and access-control code must go through [`normalize`]
//! and [`is_owner`] rather than comparing raw stored values.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::object_key::{ObjectKey, ObjectKeyError};
use super::{Meal, UserId};

/// Storage encoding of an [`OwnerRef`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerRefEncoding {
    /// `{"$oid": "<hex>"}`.
    Typed,
    /// `"<hex>"`.
    Text,
}

impl fmt::Display for OwnerRefEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Typed => f.write_str("typed"),
            Self::Text => f.write_str("text"),
        }
    }
}

/// Owner reference exactly as found in storage. Not validated.
///
/// # Examples
/// ```
/// use mealbook::domain::OwnerRef;
///
/// let typed: OwnerRef = serde_json::from_str(r#"{"$oid":"65a1f0c2b3d4e5f60718293a"}"#)
///     .expect("typed reference");
/// let text: OwnerRef = serde_json::from_str(r#""65a1f0c2b3d4e5f60718293a""#)
///     .expect("text reference");
/// assert_eq!(typed.raw(), text.raw());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OwnerRef {
    /// Typed key reference.
    Typed {
        #[serde(rename = "$oid")]
        oid: String,
    },
    /// Plain string reference.
    Text(String),
}

impl OwnerRef {
    /// Typed reference wrapping `oid`.
    pub fn typed(oid: impl Into<String>) -> Self {
        Self::Typed { oid: oid.into() }
    }

    /// Plain string reference.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Raw key text regardless of encoding.
    pub fn raw(&self) -> &str {
        match self {
            Self::Typed { oid } => oid.as_str(),
            Self::Text(value) => value.as_str(),
        }
    }

    /// Encoding this reference was stored with.
    pub fn encoding(&self) -> OwnerRefEncoding {
        match self {
            Self::Typed { .. } => OwnerRefEncoding::Typed,
            Self::Text(_) => OwnerRefEncoding::Text,
        }
    }

    /// Whether this reference is already in canonical storage form: typed,
    /// lowercase, and well formed.
    pub fn is_canonical(&self) -> bool {
        match self {
            Self::Typed { oid } => normalize(self).is_ok_and(|id| id.to_string() == *oid),
            Self::Text(_) => false,
        }
    }
}

impl From<UserId> for OwnerRef {
    fn from(value: UserId) -> Self {
        Self::Typed {
            oid: value.to_string(),
        }
    }
}

impl From<&UserId> for OwnerRef {
    fn from(value: &UserId) -> Self {
        Self::from(*value)
    }
}

/// Raised when an owner reference is not a well-formed key in either encoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {encoding} owner reference '{value}': {source}")]
pub struct InvalidReferenceError {
    /// Encoding of the rejected reference.
    pub encoding: OwnerRefEncoding,
    /// Raw rejected value.
    pub value: String,
    /// Underlying key parse failure.
    #[source]
    pub source: ObjectKeyError,
}

/// Convert any accepted owner reference encoding into the canonical user id.
///
/// # Examples
/// ```
/// use mealbook::domain::{OwnerRef, normalize};
///
/// let a = normalize(&OwnerRef::typed("65A1F0C2B3D4E5F60718293A")).expect("typed");
/// let b = normalize(&OwnerRef::text("65a1f0c2b3d4e5f60718293a")).expect("text");
/// assert_eq!(a, b);
/// ```
pub fn normalize(reference: &OwnerRef) -> Result<UserId, InvalidReferenceError> {
    ObjectKey::parse(reference.raw())
        .map(UserId::from)
        .map_err(|source| InvalidReferenceError {
            encoding: reference.encoding(),
            value: reference.raw().to_owned(),
            source,
        })
}

/// Whether `requester` owns `meal`, whatever encoding the meal was stored in.
///
/// A meal whose stored reference is malformed is owned by nobody.
pub fn is_owner(meal: &Meal, requester: &UserId) -> bool {
    match normalize(meal.owner()) {
        Ok(owner) => owner == *requester,
        Err(error) => {
            warn!(meal_id = %meal.id(), %error, "meal has malformed owner reference");
            false
        }
    }
}

/// Select the meals owned by `user`, preserving input order.
///
/// Unlike an equality query on the raw stored field, this matches both
/// encodings. Meals with malformed references are skipped.
pub fn find_by_owner(meals: impl IntoIterator<Item = Meal>, user: &UserId) -> Vec<Meal> {
    meals
        .into_iter()
        .filter(|meal| is_owner(meal, user))
        .collect()
}

#[cfg(test)]
#[path = "ownership_tests.rs"]
mod tests;
