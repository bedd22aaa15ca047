//! User data model.
//!
//! Users are owned by the identity store. They are created at registration
//! and only the avatar may change afterwards.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::object_key::{ObjectKey, ObjectKeyError};

/// Avatar shown when a user has none, or when a meal's owner cannot be found.
pub const DEFAULT_AVATAR: &str = "default-avatar.png";

/// Validation errors returned by user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    InvalidId(ObjectKeyError),
    EmptyUsername,
    UsernameTooShort { min: usize },
    UsernameTooLong { max: usize },
    UsernameInvalidCharacters,
    InvalidEmail,
    EmptyAvatar,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId(err) => write!(f, "user id is invalid: {err}"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooShort { min } => {
                write!(f, "username must be at least {min} characters")
            }
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::UsernameInvalidCharacters => write!(
                f,
                "username may only contain letters, numbers, spaces, or underscores",
            ),
            Self::InvalidEmail => write!(f, "email must look like name@domain"),
            Self::EmptyAvatar => write!(f, "avatar reference must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Canonical user identifier.
///
/// This is the single form the ownership resolver compares against; raw
/// owner references stored on meals are normalized into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(ObjectKey);

impl UserId {
    /// Validate and construct a [`UserId`] from its hexadecimal form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        ObjectKey::parse(id.as_ref())
            .map(Self)
            .map_err(UserValidationError::InvalidId)
    }

    /// Generate a new identifier stamped with `now`.
    pub fn generate(now: DateTime<Utc>) -> Self {
        Self(ObjectKey::generate(now))
    }

    /// Access the underlying key.
    pub fn as_key(&self) -> &ObjectKey {
        &self.0
    }
}

impl From<ObjectKey> for UserId {
    fn from(value: ObjectKey) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for UserId {
    type Err = UserValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_hex()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unique display name chosen at registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 3;
/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 32;

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        Regex::new("^[A-Za-z0-9_ ]+$")
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

impl Username {
    /// Validate and construct a [`Username`]. Surrounding whitespace is trimmed.
    pub fn new(username: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let username = username.as_ref().trim();
        if username.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }

        let length = username.chars().count();
        if length < USERNAME_MIN {
            return Err(UserValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        if length > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if !username_regex().is_match(username) {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }

        Ok(Self(username.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Normalized (trimmed, lower-cased) email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and normalize an email address.
    ///
    /// Only the overall `local@domain` shape is checked; deliverability is
    /// not this type's concern.
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalized = email.as_ref().trim().to_lowercase();
        let mut parts = normalized.split('@');
        let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(UserValidationError::InvalidEmail);
        };
        if local.is_empty() || domain.is_empty() || normalized.chars().any(char::is_whitespace) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(normalized))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Reference to an avatar image managed outside this service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarRef(String);

impl AvatarRef {
    /// Validate and construct an avatar reference.
    pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(UserValidationError::EmptyAvatar);
        }
        Ok(Self(value))
    }

    /// The shared default avatar.
    pub fn default_avatar() -> Self {
        Self(DEFAULT_AVATAR.to_owned())
    }
}

impl AsRef<str> for AvatarRef {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Encoded password hash as produced by a [`crate::domain::ports::PasswordHasher`].
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap an encoded hash string.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded hash string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(<redacted>)")
    }
}

/// Input payload for [`User::new`].
#[derive(Debug, Clone)]
pub struct UserDraft {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: PasswordDigest,
    pub avatar: AvatarRef,
    pub created_at: DateTime<Utc>,
}

/// Registered application user.
///
/// ## Invariants
/// - `email` is unique across users (enforced by the identity store).
/// - Only `avatar` changes after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    email: EmailAddress,
    password_hash: PasswordDigest,
    avatar: AvatarRef,
    created_at: DateTime<Utc>,
}

impl User {
    /// Build a user from validated components.
    pub fn new(draft: UserDraft) -> Self {
        let UserDraft {
            id,
            username,
            email,
            password_hash,
            avatar,
            created_at,
        } = draft;
        Self {
            id,
            username,
            email,
            password_hash,
            avatar,
            created_at,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Unique display name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Normalized email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Stored password hash.
    pub fn password_hash(&self) -> &PasswordDigest {
        &self.password_hash
    }

    /// Avatar reference.
    pub fn avatar(&self) -> &AvatarRef {
        &self.avatar
    }

    /// Registration timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replace the avatar, the only mutable profile field.
    pub fn with_avatar(mut self, avatar: AvatarRef) -> Self {
        self.avatar = avatar;
        self
    }
}
