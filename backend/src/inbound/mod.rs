//! Inbound adapters translating external requests into domain port calls.
//!
//! Only HTTP exists today; framework details stay under [`http`].

pub mod http;
