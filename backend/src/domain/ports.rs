//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`UserRepository`], [`MealRepository`], [`PasswordHasher`])
//! are implemented by outbound adapters. Driving ports ([`Accounts`],
//! [`MealCommand`], [`MealQuery`], [`OwnerRefRepair`]) are implemented by
//! domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod accounts;
mod meal_command;
mod meal_query;
mod meal_repository;
mod owner_ref_repair;
mod password_hasher;
mod user_repository;

pub use accounts::Accounts;
#[cfg(test)]
pub use accounts::MockAccounts;
pub use meal_command::{CreateMealRequest, DeleteMealRequest, MealCommand, UpdateMealRequest};
#[cfg(test)]
pub use meal_command::MockMealCommand;
#[cfg(test)]
pub use meal_query::MockMealQuery;
pub use meal_query::MealQuery;
#[cfg(test)]
pub use meal_repository::MockMealRepository;
pub use meal_repository::{MealRepository, MealRepositoryError};
#[cfg(test)]
pub use owner_ref_repair::MockOwnerRefRepair;
pub use owner_ref_repair::{OwnerRefRepair, RepairReport};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
