//! Outbound adapters implementing domain ports.
//!
//! - **documents**: in-memory user and meal collections with snapshot seeding.
//! - **password**: argon2id password hashing.
//!
//! Adapters translate between domain types and storage shapes. They contain
//! no business logic.

pub mod documents;
pub mod password;
