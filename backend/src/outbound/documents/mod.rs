//! Document-shaped persistence for users and meals.

mod models;
mod store;

pub use store::{MemoryDocumentStore, Snapshot, SnapshotError};
