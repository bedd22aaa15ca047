//! In-process document store backing both the identity and meal ports.
//!
//! Collections keep insertion order, which is the "storage order" the feed
//! and aggregation tie-breaks rely on. Every mutation rewrites at most one
//! document under a single write lock, so concurrent edits of one meal are
//! last-write-wins.

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::ports::{
    MealRepository, MealRepositoryError, UserPersistenceError, UserRepository,
};
use crate::domain::{EmailAddress, Meal, MealId, OwnerRef, User, UserId};

use super::models::{MealDocument, UserDocument};

/// Failure while loading a snapshot file.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse snapshot {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("snapshot contains an invalid document: {0}")]
    InvalidDocument(String),
    #[error("snapshot contains duplicate email {0}")]
    DuplicateEmail(String),
    #[error("snapshot contains duplicate username {0}")]
    DuplicateUsername(String),
}

/// Serialised form of the whole store: `{"users": [...], "meals": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    users: Vec<serde_json::Value>,
    #[serde(default)]
    meals: Vec<serde_json::Value>,
}

#[derive(Debug, Default)]
struct Collections {
    users: Vec<UserDocument>,
    meals: Vec<MealDocument>,
}

/// Document store holding user and meal collections in memory.
///
/// # Examples
/// ```
/// use mealbook::outbound::documents::MemoryDocumentStore;
///
/// let store = MemoryDocumentStore::default();
/// # let _ = store;
/// ```
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<Collections>,
}

fn decode<T: for<'de> Deserialize<'de>>(
    kind: &str,
    index: usize,
    value: serde_json::Value,
) -> Result<T, SnapshotError> {
    serde_json::from_value(value)
        .map_err(|err| SnapshotError::InvalidDocument(format!("{kind} #{index}: {err}")))
}

impl MemoryDocumentStore {
    /// Build a store from an in-memory snapshot.
    ///
    /// Every document is validated up front so later reads cannot fail on
    /// malformed ids or emails. Owner references are kept raw: malformed ones
    /// are the resolver's concern.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, SnapshotError> {
        let mut collections = Collections::default();

        for (index, value) in snapshot.users.into_iter().enumerate() {
            let doc: UserDocument = decode("user", index, value)?;
            let user = User::try_from(doc).map_err(SnapshotError::InvalidDocument)?;
            let doc = UserDocument::from(&user);
            if collections.users.iter().any(|existing| existing.email == doc.email) {
                return Err(SnapshotError::DuplicateEmail(doc.email));
            }
            if collections.users.iter().any(|existing| existing.username == doc.username) {
                return Err(SnapshotError::DuplicateUsername(doc.username));
            }
            collections.users.push(doc);
        }

        for (index, value) in snapshot.meals.into_iter().enumerate() {
            let doc: MealDocument = decode("meal", index, value)?;
            Meal::try_from(doc.clone()).map_err(SnapshotError::InvalidDocument)?;
            collections.meals.push(doc);
        }

        info!(
            users = collections.users.len(),
            meals = collections.meals.len(),
            "document store seeded"
        );
        Ok(Self {
            collections: RwLock::new(collections),
        })
    }

    /// Read and load a JSON snapshot file.
    pub fn from_snapshot_file(path: &Path) -> Result<Self, SnapshotError> {
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: display.clone(),
            source,
        })?;
        let snapshot: Snapshot = serde_json::from_str(&raw).map_err(|source| {
            SnapshotError::Parse {
                path: display,
                source,
            }
        })?;
        Self::from_snapshot(snapshot)
    }
}

fn to_meal(doc: MealDocument) -> Result<Meal, MealRepositoryError> {
    Meal::try_from(doc).map_err(MealRepositoryError::query)
}

fn to_user(doc: UserDocument) -> Result<User, UserPersistenceError> {
    User::try_from(doc).map_err(UserPersistenceError::query)
}

#[async_trait]
impl UserRepository for MemoryDocumentStore {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let doc = UserDocument::from(user);
        let mut collections = self.collections.write().await;
        if collections.users.iter().any(|existing| existing.email == doc.email) {
            return Err(UserPersistenceError::duplicate(doc.email));
        }
        if collections.users.iter().any(|existing| existing.username == doc.username) {
            return Err(UserPersistenceError::duplicate_username(doc.username));
        }
        collections.users.push(doc);
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let wanted = id.to_string();
        let collections = self.collections.read().await;
        collections
            .users
            .iter()
            .find(|doc| doc.id == wanted)
            .cloned()
            .map(to_user)
            .transpose()
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let collections = self.collections.read().await;
        collections
            .users
            .iter()
            .find(|doc| doc.email == email.as_ref())
            .cloned()
            .map(to_user)
            .transpose()
    }

    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let collections = self.collections.read().await;
        collections.users.iter().cloned().map(to_user).collect()
    }
}

#[async_trait]
impl MealRepository for MemoryDocumentStore {
    async fn insert(&self, meal: &Meal) -> Result<(), MealRepositoryError> {
        let doc = MealDocument::from(meal);
        let mut collections = self.collections.write().await;
        if collections.meals.iter().any(|existing| existing.id == doc.id) {
            return Err(MealRepositoryError::query(format!(
                "meal {} already exists",
                doc.id
            )));
        }
        collections.meals.push(doc);
        Ok(())
    }

    async fn find_by_id(&self, id: &MealId) -> Result<Option<Meal>, MealRepositoryError> {
        let wanted = id.to_string();
        let collections = self.collections.read().await;
        collections
            .meals
            .iter()
            .find(|doc| doc.id == wanted)
            .cloned()
            .map(to_meal)
            .transpose()
    }

    async fn update_fields(&self, meal: &Meal) -> Result<bool, MealRepositoryError> {
        let incoming = MealDocument::from(meal);
        let mut collections = self.collections.write().await;
        let Some(doc) = collections.meals.iter_mut().find(|doc| doc.id == incoming.id) else {
            return Ok(false);
        };
        doc.caption = incoming.caption;
        doc.meal_type = incoming.meal_type;
        doc.meal_date = incoming.meal_date;
        debug!(meal_id = %doc.id, "meal document updated");
        Ok(true)
    }

    async fn delete_by_id(&self, id: &MealId) -> Result<bool, MealRepositoryError> {
        let wanted = id.to_string();
        let mut collections = self.collections.write().await;
        let before = collections.meals.len();
        collections.meals.retain(|doc| doc.id != wanted);
        Ok(collections.meals.len() != before)
    }

    async fn find_all(&self) -> Result<Vec<Meal>, MealRepositoryError> {
        let collections = self.collections.read().await;
        collections.meals.iter().cloned().map(to_meal).collect()
    }

    async fn find_by_owner_raw(&self, owner: &OwnerRef) -> Result<Vec<Meal>, MealRepositoryError> {
        let collections = self.collections.read().await;
        collections
            .meals
            .iter()
            .filter(|doc| doc.user_id == *owner)
            .cloned()
            .map(to_meal)
            .collect()
    }

    async fn replace_owner(
        &self,
        id: &MealId,
        owner: &OwnerRef,
    ) -> Result<bool, MealRepositoryError> {
        let wanted = id.to_string();
        let mut collections = self.collections.write().await;
        let Some(doc) = collections.meals.iter_mut().find(|doc| doc.id == wanted) else {
            return Ok(false);
        };
        doc.user_id = owner.clone();
        Ok(true)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
