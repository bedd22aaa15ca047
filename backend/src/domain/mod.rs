//! Domain primitives, pure meal logic, and the services behind each port.
//!
//! Purpose: keep ownership resolution, aggregation, feed composition, and
//! calendar projection free of transport and storage concerns. Adapters in
//! `inbound` and `outbound` depend on this module, never the other way round.
//!
//! Public surface:
//! - [`normalize`], [`is_owner`], [`find_by_owner`]: the ownership resolver.
//! - [`summarize`]: per-user statistics.
//! - [`compose_feed`]: feed items joined with poster profiles.
//! - [`project_calendar`]: calendar events for dated meals.
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failures.

pub mod auth;
pub mod calendar;
pub mod error;
pub mod feed;
pub mod insights;
pub mod meal;
pub mod object_key;
pub mod ownership;
pub mod ports;
pub mod trace_id;
pub mod user;

mod account_service;
mod meal_service;
mod owner_ref_repair_service;

pub use self::account_service::AccountService;
pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MIN, Registration,
    RegistrationValidationError,
};
pub use self::calendar::{CalendarEvent, project_calendar};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::feed::{FeedItem, UNKNOWN_USERNAME, compose_feed};
pub use self::insights::{LabelCount, MealStats, NOT_AVAILABLE, RECENT_MEALS_LIMIT, summarize};
pub use self::meal::{
    CAPTION_MAX, Caption, Comment, MEAL_DATE_FORMAT, Meal, MealChanges, MealDraft, MealId,
    MealType, MealValidationError, parse_meal_date,
};
pub use self::meal_service::{MealCommandService, MealQueryService};
pub use self::object_key::{ObjectKey, ObjectKeyError};
pub use self::owner_ref_repair_service::OwnerRefRepairService;
pub use self::ownership::{
    InvalidReferenceError, OwnerRef, OwnerRefEncoding, find_by_owner, is_owner, normalize,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    AvatarRef, DEFAULT_AVATAR, EmailAddress, PasswordDigest, User, UserDraft, UserId,
    UserValidationError, Username,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use mealbook::domain::{ApiResult, Error};
///
/// fn check() -> ApiResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// assert!(check().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
