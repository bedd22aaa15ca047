//! Shared HTTP adapter state.
//!
//! Handlers accept this via `actix_web::web::Data` so they depend only on
//! domain ports and stay testable without storage.

use std::sync::Arc;

use crate::domain::ports::{Accounts, MealCommand, MealQuery, OwnerRefRepair};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn Accounts>,
    pub meals: Arc<dyn MealCommand>,
    pub meals_query: Arc<dyn MealQuery>,
    pub repair: Arc<dyn OwnerRefRepair>,
}

impl HttpState {
    pub fn new(
        accounts: Arc<dyn Accounts>,
        meals: Arc<dyn MealCommand>,
        meals_query: Arc<dyn MealQuery>,
        repair: Arc<dyn OwnerRefRepair>,
    ) -> Self {
        Self {
            accounts,
            meals,
            meals_query,
            repair,
        }
    }
}
