//! Meal logging backend.
//!
//! Hexagonal layout: [`domain`] holds meal types, the ownership resolver,
//! aggregation, and port traits; [`inbound`] adapts HTTP onto the driving
//! ports; [`outbound`] implements the driven ports over an in-memory document
//! store and argon2 password hashing.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI.
pub use doc::ApiDoc;
pub use middleware::Trace;
