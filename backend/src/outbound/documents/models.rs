//! Internal document structs for the meal and user collections.
//!
//! These types mirror the stored JSON shape and never leave the persistence
//! layer. Reads tolerate historical quirks (either owner encoding, missing
//! `created_at`, unknown meal types); writes always emit the current shape.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{
    AvatarRef, Comment, EmailAddress, MEAL_DATE_FORMAT, Meal, MealDraft, MealId, MealType,
    OwnerRef, PasswordDigest, User, UserDraft, UserId, Username,
};

/// Stored user document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct UserDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    /// Encoded password digest.
    pub password: String,
    #[serde(default)]
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Stored meal document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct MealDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: OwnerRef,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub meal_type: Option<String>,
    #[serde(default)]
    pub meal_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub likes: Vec<OwnerRef>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl From<&User> for UserDocument {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
            email: user.email().to_string(),
            password: user.password_hash().as_str().to_owned(),
            avatar: Some(user.avatar().as_ref().to_owned()),
            created_at: user.created_at(),
        }
    }
}

impl TryFrom<UserDocument> for User {
    type Error = String;

    fn try_from(doc: UserDocument) -> Result<Self, Self::Error> {
        let id = UserId::new(&doc.id).map_err(|err| format!("user {}: {err}", doc.id))?;
        let username =
            Username::new(&doc.username).map_err(|err| format!("user {}: {err}", doc.id))?;
        let email = EmailAddress::new(&doc.email).map_err(|err| format!("user {}: {err}", doc.id))?;
        let avatar = match doc.avatar.filter(|avatar| !avatar.trim().is_empty()) {
            Some(avatar) => {
                AvatarRef::new(avatar).map_err(|err| format!("user {}: {err}", doc.id))?
            }
            None => AvatarRef::default_avatar(),
        };
        Ok(User::new(UserDraft {
            id,
            username,
            email,
            password_hash: PasswordDigest::new(doc.password),
            avatar,
            created_at: doc.created_at,
        }))
    }
}

impl From<&Meal> for MealDocument {
    fn from(meal: &Meal) -> Self {
        Self {
            id: meal.id().to_string(),
            user_id: meal.owner().clone(),
            caption: meal.caption().to_owned(),
            meal_type: Some(meal.meal_type().as_str().to_owned()),
            meal_date: meal
                .meal_date()
                .map(|date| date.format(MEAL_DATE_FORMAT).to_string()),
            created_at: meal.created_at(),
            likes: meal.likes().to_vec(),
            comments: meal.comments().to_vec(),
        }
    }
}

fn stored_meal_type(id: &str, raw: Option<&str>) -> MealType {
    match raw {
        None => MealType::Other,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(meal_id = id, meal_type = raw, "unknown stored meal type; reading as other");
            MealType::Other
        }),
    }
}

fn stored_meal_date(id: &str, raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw.filter(|raw| !raw.trim().is_empty())?;
    match NaiveDate::parse_from_str(raw.trim(), MEAL_DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(err) => {
            warn!(meal_id = id, meal_date = raw, error = %err, "unparseable stored meal date; ignoring");
            None
        }
    }
}

impl TryFrom<MealDocument> for Meal {
    type Error = String;

    fn try_from(doc: MealDocument) -> Result<Self, Self::Error> {
        let id = MealId::new(&doc.id).map_err(|err| format!("meal {}: {err}", doc.id))?;
        let meal_type = stored_meal_type(&doc.id, doc.meal_type.as_deref());
        let meal_date = stored_meal_date(&doc.id, doc.meal_date.as_deref());
        Ok(Meal::new(MealDraft {
            id,
            owner: doc.user_id,
            caption: doc.caption,
            meal_type,
            meal_date,
            created_at: doc.created_at,
            likes: doc.likes,
            comments: doc.comments,
        }))
    }
}
