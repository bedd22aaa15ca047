//! Driving port for registration, login, and profile reads.
//!
//! Inbound adapters call this without knowing the backing identity store or
//! hashing scheme, so handler tests can substitute a mock.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Registration, User, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Accounts: Send + Sync {
    /// Create an account. A taken email yields
    /// [`crate::domain::ErrorCode::Conflict`].
    async fn register(&self, registration: Registration) -> Result<User, Error>;

    /// Validate credentials and return the authenticated user id.
    ///
    /// Unknown emails and wrong passwords fail identically with
    /// [`crate::domain::ErrorCode::Unauthorized`].
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;

    /// Profile of an existing user.
    async fn profile(&self, user: &UserId) -> Result<User, Error>;
}
