//! Driving port for meal reads and derived views.

use async_trait::async_trait;

use crate::domain::{CalendarEvent, Error, FeedItem, Meal, MealId, MealStats, UserId};

/// Driving port for meal read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MealQuery: Send + Sync {
    /// One meal by id, visible to any authenticated user.
    async fn get_meal(&self, meal_id: &MealId) -> Result<Meal, Error>;

    /// Meals owned by `user`, newest first, whatever owner encoding they use.
    async fn list_meals(&self, user: &UserId) -> Result<Vec<Meal>, Error>;

    /// Calendar events for `user`'s dated meals.
    async fn calendar_events(&self, user: &UserId) -> Result<Vec<CalendarEvent>, Error>;

    /// Aggregate statistics for `user`'s meals.
    async fn insights(&self, user: &UserId) -> Result<MealStats, Error>;

    /// Meals of all users joined with poster profiles, newest first.
    async fn feed(&self) -> Result<Vec<FeedItem>, Error>;
}
