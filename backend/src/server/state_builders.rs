//! Wires domain services over the document store into [`HttpState`].

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use mealbook::domain::{
    AccountService, MealCommandService, MealQueryService, OwnerRefRepairService,
};
use mealbook::inbound::http::state::HttpState;
use mealbook::outbound::documents::MemoryDocumentStore;
use mealbook::outbound::password::Argon2PasswordHasher;

/// Build the handler state. One store instance backs both repositories.
pub(super) fn build_http_state(store: Arc<MemoryDocumentStore>) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let hasher = Arc::new(Argon2PasswordHasher::default());

    let accounts = AccountService::new(store.clone(), hasher, clock.clone());
    let meals = MealCommandService::new(store.clone(), clock.clone());
    let meals_query = MealQueryService::new(store.clone(), store.clone(), clock);
    let repair = OwnerRefRepairService::new(store);

    web::Data::new(HttpState::new(
        Arc::new(accounts),
        Arc::new(meals),
        Arc::new(meals_query),
        Arc::new(repair),
    ))
}
