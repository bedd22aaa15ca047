//! Account domain service: registration, login, and profile reads.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{
    Accounts, PasswordHashError, PasswordHasher, UserPersistenceError, UserRepository,
};
use crate::domain::{
    AvatarRef, EmailAddress, Error, LoginCredentials, Registration, User, UserDraft, UserId,
};

const INVALID_CREDENTIALS: &str = "invalid credentials";
const EMAIL_TAKEN: &str = "an account with this email already exists";
const USERNAME_TAKEN: &str = "this username is already taken";

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Duplicate { .. } => Error::conflict(EMAIL_TAKEN),
        UserPersistenceError::DuplicateUsername { .. } => Error::conflict(USERNAME_TAKEN),
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

/// Implements [`Accounts`] over a user repository and a password hasher.
#[derive(Clone)]
pub struct AccountService<U, H> {
    user_repo: Arc<U>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
}

impl<U, H> AccountService<U, H> {
    pub fn new(user_repo: Arc<U>, hasher: Arc<H>, clock: Arc<dyn Clock>) -> Self {
        Self {
            user_repo,
            hasher,
            clock,
        }
    }
}

#[async_trait]
impl<U, H> Accounts for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        let existing = self
            .user_repo
            .find_by_email(registration.email())
            .await
            .map_err(map_user_error)?;
        if existing.is_some() {
            return Err(Error::conflict(EMAIL_TAKEN));
        }

        let password_hash = self
            .hasher
            .hash(registration.password())
            .map_err(map_hash_error)?;
        let now = self.clock.utc();
        let user = User::new(UserDraft {
            id: UserId::generate(now),
            username: registration.username().clone(),
            email: registration.email().clone(),
            password_hash,
            avatar: AvatarRef::default_avatar(),
            created_at: now,
        });

        // The store re-checks uniqueness, so a concurrent sign-up still
        // surfaces as a conflict.
        self.user_repo
            .insert(&user)
            .await
            .map_err(map_user_error)?;

        info!(user_id = %user.id(), "account registered");
        Ok(user)
    }

    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        // Malformed addresses cannot belong to an account.
        let Ok(email) = EmailAddress::new(credentials.email()) else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let Some(user) = self
            .user_repo
            .find_by_email(&email)
            .await
            .map_err(map_user_error)?
        else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let verified = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .map_err(|err| {
                warn!(user_id = %user.id(), error = %err, "stored password digest rejected");
                map_hash_error(err)
            })?;
        if !verified {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        Ok(*user.id())
    }

    async fn profile(&self, user: &UserId) -> Result<User, Error> {
        self.user_repo
            .find_by_id(user)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found(format!("user {user} not found")))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use chrono::{DateTime, TimeZone, Utc};
    use mockable::MockClock;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ports::{MockPasswordHasher, MockUserRepository};
    use crate::domain::{DEFAULT_AVATAR, ErrorCode, PasswordDigest, Username};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn clock() -> Arc<dyn Clock> {
        let mut clock = MockClock::new();
        clock.expect_utc().return_const(now());
        Arc::new(clock)
    }

    #[fixture]
    fn stored_user() -> User {
        User::new(UserDraft {
            id: UserId::new("65a1f0c2b3d4e5f60718293a").expect("valid id"),
            username: Username::new("alice").expect("valid username"),
            email: EmailAddress::new("alice@example.com").expect("valid email"),
            password_hash: PasswordDigest::new("$argon2id$stored"),
            avatar: AvatarRef::default_avatar(),
            created_at: now(),
        })
    }

    fn service(
        users: MockUserRepository,
        hasher: MockPasswordHasher,
    ) -> AccountService<MockUserRepository, MockPasswordHasher> {
        AccountService::new(Arc::new(users), Arc::new(hasher), clock())
    }

    fn registration() -> Registration {
        Registration::try_from_parts("alice", "Alice@Example.com", "correct horse")
            .expect("valid registration")
    }

    #[rstest]
    #[tokio::test]
    async fn register_hashes_password_and_assigns_default_avatar() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().return_once(|_| Ok(None));
        users
            .expect_insert()
            .withf(|user| user.password_hash().as_str() == "$argon2id$new")
            .times(1)
            .return_once(|_| Ok(()));
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .withf(|password| password == "correct horse")
            .return_once(|_| Ok(PasswordDigest::new("$argon2id$new")));

        let user = service(users, hasher)
            .register(registration())
            .await
            .expect("registration succeeds");

        assert_eq!(user.email().as_ref(), "alice@example.com");
        assert_eq!(user.avatar().as_ref(), DEFAULT_AVATAR);
        assert_eq!(user.created_at(), now());
    }

    #[rstest]
    #[tokio::test]
    async fn register_rejects_taken_email(stored_user: User) {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .return_once(move |_| Ok(Some(stored_user)));
        users.expect_insert().times(0);
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_hash().times(0);

        let err = service(users, hasher)
            .register(registration())
            .await
            .expect_err("email taken");

        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn register_maps_racing_duplicate_to_conflict() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().return_once(|_| Ok(None));
        users
            .expect_insert()
            .return_once(|_| Err(UserPersistenceError::duplicate("alice@example.com")));
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .return_once(|_| Ok(PasswordDigest::new("$argon2id$new")));

        let err = service(users, hasher)
            .register(registration())
            .await
            .expect_err("duplicate on insert");

        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn register_maps_taken_username_to_conflict() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().return_once(|_| Ok(None));
        users
            .expect_insert()
            .return_once(|_| Err(UserPersistenceError::duplicate_username("alice")));
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .return_once(|_| Ok(PasswordDigest::new("$argon2id$new")));

        let err = service(users, hasher)
            .register(registration())
            .await
            .expect_err("username taken");

        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(err.message(), USERNAME_TAKEN);
    }

    #[rstest]
    #[tokio::test]
    async fn authenticate_returns_user_id(stored_user: User) {
        let expected = *stored_user.id();
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .withf(|email| email.as_ref() == "alice@example.com")
            .return_once(move |_| Ok(Some(stored_user)));
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_verify().return_once(|_, _| Ok(true));

        let creds = LoginCredentials::try_from_parts("ALICE@example.com", "pw").expect("creds");
        let id = service(users, hasher)
            .authenticate(&creds)
            .await
            .expect("login succeeds");

        assert_eq!(id, expected);
    }

    #[rstest]
    #[case(false, true)]
    #[case(true, false)]
    #[tokio::test]
    async fn authenticate_failures_are_uniform(
        #[case] user_exists: bool,
        #[case] password_matches: bool,
        stored_user: User,
    ) {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .return_once(move |_| Ok(user_exists.then_some(stored_user)));
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_verify()
            .returning(move |_, _| Ok(password_matches));

        let creds = LoginCredentials::try_from_parts("alice@example.com", "pw").expect("creds");
        let err = service(users, hasher)
            .authenticate(&creds)
            .await
            .expect_err("login fails");

        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), INVALID_CREDENTIALS);
    }

    #[rstest]
    #[tokio::test]
    async fn authenticate_rejects_malformed_email_without_lookup() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().times(0);

        let creds = LoginCredentials::try_from_parts("not-an-email", "pw").expect("creds");
        let err = service(users, MockPasswordHasher::new())
            .authenticate(&creds)
            .await
            .expect_err("malformed email");

        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[tokio::test]
    async fn profile_of_missing_user_is_not_found(stored_user: User) {
        let id = *stored_user.id();
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().return_once(|_| Ok(None));

        let err = service(users, MockPasswordHasher::new())
            .profile(&id)
            .await
            .expect_err("missing user");

        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
