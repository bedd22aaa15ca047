//! Feed composition: meals joined with their poster's profile, newest first.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};

use super::{Meal, MealId, MealType, User, UserId, normalize};
use super::user::DEFAULT_AVATAR;

/// Username shown when a meal's owner cannot be resolved.
pub const UNKNOWN_USERNAME: &str = "Unknown User";

/// A meal prepared for feed display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub meal_id: MealId,
    /// Resolved owner, when the stored reference is well formed.
    pub owner_id: Option<UserId>,
    /// Poster's username, or [`UNKNOWN_USERNAME`].
    pub username: String,
    /// Poster's avatar reference, or the default avatar.
    pub avatar: String,
    pub caption: String,
    pub meal_type: MealType,
    /// User-chosen calendar date.
    pub meal_date: Option<NaiveDate>,
    /// Ordering key; `None` sorts last.
    pub created_at: Option<DateTime<Utc>>,
    /// Number of likes on the meal.
    pub like_count: usize,
    /// Number of comments on the meal.
    pub comment_count: usize,
}

/// Join `meals` with `users` and order them newest first.
///
/// Ordering is by `created_at` descending. The sort is stable, so meals with
/// equal timestamps keep their storage order; meals without `created_at`
/// sort after all dated meals. Meals whose owner is unknown or malformed are
/// kept and shown as [`UNKNOWN_USERNAME`] with the default avatar.
pub fn compose_feed(meals: Vec<Meal>, users: &[User]) -> Vec<FeedItem> {
    let by_id: HashMap<&UserId, &User> = users.iter().map(|user| (user.id(), user)).collect();

    let mut items: Vec<FeedItem> = meals
        .into_iter()
        .map(|meal| {
            let owner_id = normalize(meal.owner()).ok();
            let poster = owner_id.as_ref().and_then(|id| by_id.get(id).copied());
            let (username, avatar) = match poster {
                Some(user) => (
                    user.username().to_string(),
                    user.avatar().as_ref().to_owned(),
                ),
                None => (UNKNOWN_USERNAME.to_owned(), DEFAULT_AVATAR.to_owned()),
            };
            FeedItem {
                meal_id: meal.id(),
                owner_id,
                username,
                avatar,
                caption: meal.caption().to_owned(),
                meal_type: meal.meal_type(),
                meal_date: meal.meal_date(),
                created_at: meal.created_at(),
                like_count: meal.likes().len(),
                comment_count: meal.comments().len(),
            }
        })
        .collect();

    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    items
}
