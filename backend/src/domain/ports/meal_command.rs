//! Driving port for meal mutations.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{Caption, Error, Meal, MealChanges, MealId, MealType, UserId};

/// Request to log a new meal for the session user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMealRequest {
    pub owner: UserId,
    pub caption: Caption,
    pub meal_type: MealType,
    pub meal_date: Option<NaiveDate>,
}

/// Request to edit a meal's caption, type, or date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateMealRequest {
    pub requester: UserId,
    pub meal_id: MealId,
    pub changes: MealChanges,
}

/// Request to delete a meal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteMealRequest {
    pub requester: UserId,
    pub meal_id: MealId,
}

/// Driving port for meal write operations.
///
/// Edit and delete are owner only: callers receive
/// [`crate::domain::ErrorCode::Forbidden`] when the requester does not own
/// the meal and [`crate::domain::ErrorCode::NotFound`] when it is missing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MealCommand: Send + Sync {
    /// Store a new meal owned by `request.owner`.
    async fn create_meal(&self, request: CreateMealRequest) -> Result<Meal, Error>;

    /// Apply an edit and return the updated meal.
    async fn update_meal(&self, request: UpdateMealRequest) -> Result<Meal, Error>;

    async fn delete_meal(&self, request: DeleteMealRequest) -> Result<(), Error>;
}
