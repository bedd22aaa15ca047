//! Port abstraction for the identity store and its errors.

use async_trait::async_trait;

use crate::domain::{EmailAddress, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A user with this email already exists.
        Duplicate { email: String } => "a user with email {email} already exists",
        /// A user with this username already exists.
        DuplicateUsername { username: String } => "a user named {username} already exists",
    }
}

/// Read/insert access to registered users.
///
/// Email and username uniqueness are the adapter's responsibility:
/// [`UserRepository::insert`] must fail with [`UserPersistenceError::Duplicate`]
/// or [`UserPersistenceError::DuplicateUsername`] rather than store a second
/// account for the same address or display name.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by normalised email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Every user, in storage order.
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError>;
}
