//! Meal records and their validated inputs.
//!
//! A [`Meal`] mirrors what the meal store holds, including historical data:
//! the owner reference is kept raw, captions may be empty, and `created_at`
//! may be missing. Commands build meals from validated [`Caption`],
//! [`MealType`], and date inputs.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::object_key::{ObjectKey, ObjectKeyError};
use super::{OwnerRef, UserId};


/// Maximum caption length in characters.
pub const CAPTION_MAX: usize = 500;
/// Accepted `meal_date` text format.
pub const MEAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Validation errors raised by meal constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MealValidationError {
    /// The identifier is not a well-formed object key.
    InvalidId(ObjectKeyError),
    /// The caption is blank once trimmed.
    EmptyCaption,
    /// The trimmed caption exceeds `max` characters.
    CaptionTooLong { max: usize },
    /// The meal type is not one of the known names.
    InvalidMealType { value: String },
    /// The date is not `YYYY-MM-DD`.
    InvalidMealDate { value: String },
    /// An edit that sets no field.
    NoChanges,
}

impl fmt::Display for MealValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId(err) => write!(f, "meal id is invalid: {err}"),
            Self::EmptyCaption => write!(f, "caption must not be empty"),
            Self::CaptionTooLong { max } => {
                write!(f, "caption must be at most {max} characters")
            }
            Self::InvalidMealType { value } => write!(
                f,
                "meal type '{value}' must be one of breakfast, lunch, dinner, snack, other"
            ),
            Self::InvalidMealDate { value } => {
                write!(f, "meal date '{value}' must use YYYY-MM-DD")
            }
            Self::NoChanges => write!(f, "meal edit must change at least one field"),
        }
    }
}

impl std::error::Error for MealValidationError {}

/// Stable meal identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MealId(ObjectKey);

impl MealId {
    /// Validate and construct a [`MealId`] from its hexadecimal form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, MealValidationError> {
        ObjectKey::parse(id.as_ref())
            .map(Self)
            .map_err(MealValidationError::InvalidId)
    }

    /// Generate a new identifier stamped with `now`.
    pub fn generate(now: DateTime<Utc>) -> Self {
        Self(ObjectKey::generate(now))
    }
}

impl fmt::Display for MealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<MealId> for String {
    fn from(value: MealId) -> Self {
        value.0.to_hex()
    }
}

impl TryFrom<String> for MealId {
    type Error = MealValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Meal categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Other,
}

impl MealType {
    /// Every meal type in presentation order.
    pub const ALL: [Self; 5] = [
        Self::Breakfast,
        Self::Lunch,
        Self::Dinner,
        Self::Snack,
        Self::Other,
    ];

    /// Lowercase name used on the wire and in storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = MealValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lowered = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lowered)
            .ok_or_else(|| MealValidationError::InvalidMealType {
                value: value.to_owned(),
            })
    }
}

/// Validated caption for new or edited meals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption(String);

impl Caption {
    /// Trim and validate a caption.
    pub fn new(value: impl AsRef<str>) -> Result<Self, MealValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(MealValidationError::EmptyCaption);
        }
        if trimmed.chars().count() > CAPTION_MAX {
            return Err(MealValidationError::CaptionTooLong { max: CAPTION_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Caption {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Caption> for String {
    fn from(value: Caption) -> Self {
        value.0
    }
}

/// Parse a user-supplied `YYYY-MM-DD` meal date.
///
/// # Examples
/// ```
/// use mealbook::domain::parse_meal_date;
///
/// let date = parse_meal_date("2024-01-01").expect("valid date");
/// assert_eq!(date.to_string(), "2024-01-01");
/// assert!(parse_meal_date("01/01/2024").is_err());
/// ```
pub fn parse_meal_date(value: &str) -> Result<NaiveDate, MealValidationError> {
    NaiveDate::parse_from_str(value.trim(), MEAL_DATE_FORMAT).map_err(|_| {
        MealValidationError::InvalidMealDate {
            value: value.to_owned(),
        }
    })
}

/// Comment left on a meal. Carried through storage; not otherwise processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub author: OwnerRef,
    pub text: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Input payload for [`Meal::new`].
#[derive(Debug, Clone)]
pub struct MealDraft {
    pub id: MealId,
    pub owner: OwnerRef,
    pub caption: String,
    pub meal_type: MealType,
    pub meal_date: Option<NaiveDate>,
    pub created_at: Option<DateTime<Utc>>,
    pub likes: Vec<OwnerRef>,
    pub comments: Vec<Comment>,
}

/// Field changes permitted by a meal edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealChanges {
    pub caption: Option<Caption>,
    pub meal_type: Option<MealType>,
    pub meal_date: Option<NaiveDate>,
}

impl MealChanges {
    /// Reject edits that would change nothing.
    pub fn validate(self) -> Result<Self, MealValidationError> {
        if self.caption.is_none() && self.meal_type.is_none() && self.meal_date.is_none() {
            return Err(MealValidationError::NoChanges);
        }
        Ok(self)
    }
}

/// A stored meal.
///
/// ## Invariants
/// - `owner` is kept exactly as stored; resolve it with
///   [`crate::domain::normalize`] before comparing against a user.
/// - Only `caption`, `meal_type`, and `meal_date` change after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meal {
    id: MealId,
    owner: OwnerRef,
    caption: String,
    meal_type: MealType,
    meal_date: Option<NaiveDate>,
    created_at: Option<DateTime<Utc>>,
    likes: Vec<OwnerRef>,
    comments: Vec<Comment>,
}

impl Meal {
    /// Build a meal from its stored or freshly validated parts.
    pub fn new(draft: MealDraft) -> Self {
        let MealDraft {
            id,
            owner,
            caption,
            meal_type,
            meal_date,
            created_at,
            likes,
            comments,
        } = draft;
        Self {
            id,
            owner,
            caption,
            meal_type,
            meal_date,
            created_at,
            likes,
            comments,
        }
    }

    /// Create a brand-new meal owned by `owner`, stored in canonical form.
    pub fn create(
        id: MealId,
        owner: &UserId,
        caption: Caption,
        meal_type: MealType,
        meal_date: Option<NaiveDate>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self::new(MealDraft {
            id,
            owner: OwnerRef::from(owner),
            caption: caption.into(),
            meal_type,
            meal_date,
            created_at: Some(created_at),
            likes: Vec::new(),
            comments: Vec::new(),
        })
    }

    /// Stable meal identifier.
    pub fn id(&self) -> MealId {
        self.id
    }

    /// Raw owner reference as stored.
    pub fn owner(&self) -> &OwnerRef {
        &self.owner
    }

    /// Caption as stored; may be blank on historical records.
    pub fn caption(&self) -> &str {
        self.caption.as_str()
    }

    /// Breakfast, lunch, dinner, snack, or other.
    pub fn meal_type(&self) -> MealType {
        self.meal_type
    }

    /// Calendar date chosen by the user.
    pub fn meal_date(&self) -> Option<NaiveDate> {
        self.meal_date
    }

    /// Server-assigned creation time. Missing on some historical records.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Raw references of users who liked the meal.
    pub fn likes(&self) -> &[OwnerRef] {
        &self.likes
    }

    /// Comments in posting order.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Apply an edit. Fields left as `None` keep their current value.
    pub fn apply(&mut self, changes: MealChanges) {
        let MealChanges {
            caption,
            meal_type,
            meal_date,
        } = changes;
        if let Some(caption) = caption {
            self.caption = caption.into();
        }
        if let Some(meal_type) = meal_type {
            self.meal_type = meal_type;
        }
        if let Some(meal_date) = meal_date {
            self.meal_date = Some(meal_date);
        }
    }

    /// Return a copy with the owner reference replaced.
    #[cfg(test)]
    pub(crate) fn with_owner(mut self, owner: OwnerRef) -> Self {
        self.owner = owner;
        self
    }
}
