//! HTTP inbound adapter exposing the `/api/v1` REST endpoints.

pub mod admin;
pub mod calendar;
pub mod error;
pub mod feed;
pub mod health;
pub mod insights;
pub mod meals;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use crate::domain::ApiResult;
pub use error::json_config;

/// Register every `/api/v1` handler on `cfg`.
///
/// The caller supplies the scope, session middleware, and [`state::HttpState`].
pub fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(users::register)
        .service(users::login)
        .service(users::logout)
        .service(users::current_user)
        .service(meals::create_meal)
        .service(meals::list_meals)
        .service(meals::get_meal)
        .service(meals::update_meal)
        .service(meals::delete_meal)
        .service(calendar::calendar_events)
        .service(insights::insights)
        .service(feed::feed)
        .service(admin::repair_owner_refs);
}
