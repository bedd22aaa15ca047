//! Meal domain services.
//!
//! [`MealCommandService`] implements the write port and enforces ownership
//! on edit and delete. [`MealQueryService`] implements the read port and the
//! derived views. Both select a user's meals through the ownership resolver,
//! never through the raw owner query.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    CreateMealRequest, DeleteMealRequest, MealCommand, MealQuery, MealRepository,
    MealRepositoryError, UpdateMealRequest, UserPersistenceError, UserRepository,
};
use crate::domain::{
    CalendarEvent, Error, FeedItem, Meal, MealId, MealStats, UserId, compose_feed, find_by_owner,
    normalize, project_calendar, summarize,
};

pub(super) fn map_repository_error(error: MealRepositoryError) -> Error {
    match error {
        MealRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("meal repository unavailable: {message}"))
        }
        MealRepositoryError::Query { message } => {
            Error::internal(format!("meal repository error: {message}"))
        }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Duplicate { .. } | UserPersistenceError::DuplicateUsername { .. } => {
            Error::internal(format!("unexpected duplicate user on read: {error}"))
        }
    }
}

fn meal_not_found(id: &MealId) -> Error {
    Error::not_found(format!("meal {id} not found"))
}

/// Newest first by `created_at`; stable, undated meals last.
fn newest_first(mut meals: Vec<Meal>) -> Vec<Meal> {
    meals.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    meals
}

/// Load a meal and confirm `requester` owns it.
async fn load_owned<R>(repo: &R, requester: &UserId, meal_id: &MealId) -> Result<Meal, Error>
where
    R: MealRepository + ?Sized,
{
    let meal = repo
        .find_by_id(meal_id)
        .await
        .map_err(map_repository_error)?
        .ok_or_else(|| meal_not_found(meal_id))?;

    match normalize(meal.owner()) {
        Ok(owner) if owner == *requester => Ok(meal),
        Ok(_) => Err(Error::forbidden("you do not own this meal")),
        Err(err) => {
            warn!(meal_id = %meal_id, error = %err, "refusing mutation of meal with malformed owner");
            Err(err.into())
        }
    }
}

/// Meal service implementing the command driving port.
#[derive(Clone)]
pub struct MealCommandService<R> {
    meal_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> MealCommandService<R> {
    /// Create a command service over `meal_repo`, stamping new meals from
    /// `clock`.
    pub fn new(meal_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { meal_repo, clock }
    }
}

#[async_trait]
impl<R> MealCommand for MealCommandService<R>
where
    R: MealRepository,
{
    async fn create_meal(&self, request: CreateMealRequest) -> Result<Meal, Error> {
        let now = self.clock.utc();
        let meal = Meal::create(
            MealId::generate(now),
            &request.owner,
            request.caption,
            request.meal_type,
            request.meal_date,
            now,
        );

        self.meal_repo
            .insert(&meal)
            .await
            .map_err(map_repository_error)?;

        info!(meal_id = %meal.id(), owner = %request.owner, "meal created");
        Ok(meal)
    }

    async fn update_meal(&self, request: UpdateMealRequest) -> Result<Meal, Error> {
        let mut meal =
            load_owned(self.meal_repo.as_ref(), &request.requester, &request.meal_id).await?;
        meal.apply(request.changes);

        let updated = self
            .meal_repo
            .update_fields(&meal)
            .await
            .map_err(map_repository_error)?;
        if !updated {
            // Deleted between the read and the write.
            return Err(meal_not_found(&request.meal_id));
        }

        debug!(meal_id = %request.meal_id, "meal updated");
        Ok(meal)
    }

    async fn delete_meal(&self, request: DeleteMealRequest) -> Result<(), Error> {
        load_owned(self.meal_repo.as_ref(), &request.requester, &request.meal_id).await?;

        let deleted = self
            .meal_repo
            .delete_by_id(&request.meal_id)
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(meal_not_found(&request.meal_id));
        }

        info!(meal_id = %request.meal_id, "meal deleted");
        Ok(())
    }
}

/// Meal service implementing the query driving port.
#[derive(Clone)]
pub struct MealQueryService<R, U> {
    meal_repo: Arc<R>,
    user_repo: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<R, U> MealQueryService<R, U> {
    /// Create a query service. `clock` stands in for missing `created_at`
    /// values when computing insights.
    pub fn new(meal_repo: Arc<R>, user_repo: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            meal_repo,
            user_repo,
            clock,
        }
    }
}

impl<R, U> MealQueryService<R, U>
where
    R: MealRepository,
{
    /// Meals owned by `user` in storage order, whatever their owner encoding.
    async fn owned_meals(&self, user: &UserId) -> Result<Vec<Meal>, Error> {
        let meals = self
            .meal_repo
            .find_all()
            .await
            .map_err(map_repository_error)?;
        Ok(find_by_owner(meals, user))
    }
}

#[async_trait]
impl<R, U> MealQuery for MealQueryService<R, U>
where
    R: MealRepository,
    U: UserRepository,
{
    async fn get_meal(&self, meal_id: &MealId) -> Result<Meal, Error> {
        self.meal_repo
            .find_by_id(meal_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| meal_not_found(meal_id))
    }

    async fn list_meals(&self, user: &UserId) -> Result<Vec<Meal>, Error> {
        self.owned_meals(user).await.map(newest_first)
    }

    async fn calendar_events(&self, user: &UserId) -> Result<Vec<CalendarEvent>, Error> {
        let meals = self.owned_meals(user).await?;
        Ok(project_calendar(&meals))
    }

    async fn insights(&self, user: &UserId) -> Result<MealStats, Error> {
        let meals = newest_first(self.owned_meals(user).await?);
        Ok(summarize(&meals, self.clock.utc()))
    }

    async fn feed(&self) -> Result<Vec<FeedItem>, Error> {
        let meals = self
            .meal_repo
            .find_all()
            .await
            .map_err(map_repository_error)?;
        let users = self
            .user_repo
            .list_all()
            .await
            .map_err(map_user_error)?;
        Ok(compose_feed(meals, &users))
    }
}

#[cfg(test)]
#[path = "meal_service_tests.rs"]
mod tests;
