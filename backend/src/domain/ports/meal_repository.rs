//! Port for the meal store.
//!
//! Every method works on whole meal documents; each mutation touches exactly
//! one record and concurrent writers to the same meal are last-write-wins.

use async_trait::async_trait;

use crate::domain::{Meal, MealId, OwnerRef};

use super::define_port_error;

define_port_error! {
    /// Errors raised by meal repository adapters.
    pub enum MealRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "meal repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "meal repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MealRepository: Send + Sync {
    /// Store a new meal.
    async fn insert(&self, meal: &Meal) -> Result<(), MealRepositoryError>;

    /// Find a meal by id.
    async fn find_by_id(&self, id: &MealId) -> Result<Option<Meal>, MealRepositoryError>;

    /// Overwrite the editable fields of an existing meal.
    ///
    /// Returns `false` when no meal with that id exists.
    async fn update_fields(&self, meal: &Meal) -> Result<bool, MealRepositoryError>;

    /// Delete a meal. Returns `false` when it did not exist.
    async fn delete_by_id(&self, id: &MealId) -> Result<bool, MealRepositoryError>;

    /// Every meal, in storage order.
    async fn find_all(&self) -> Result<Vec<Meal>, MealRepositoryError>;

    /// Raw equality query on the stored owner reference.
    ///
    /// This is encoding sensitive: a typed reference never matches a plain
    /// string one. Use [`crate::domain::find_by_owner`] to select a user's
    /// meals.
    async fn find_by_owner_raw(&self, owner: &OwnerRef) -> Result<Vec<Meal>, MealRepositoryError>;

    /// Rewrite a meal's stored owner reference.
    async fn replace_owner(
        &self,
        id: &MealId,
        owner: &OwnerRef,
    ) -> Result<bool, MealRepositoryError>;
}
