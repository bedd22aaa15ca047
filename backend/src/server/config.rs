//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use mealbook::inbound::http::session_config::SessionSettings;
use mealbook::outbound::documents::MemoryDocumentStore;

/// Everything [`super::create_server`] needs beyond the health state.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) store: Arc<MemoryDocumentStore>,
}

impl ServerConfig {
    /// Construct a configuration backed by an empty document store.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            store: Arc::new(MemoryDocumentStore::default()),
        }
    }

    /// Serve from `store` instead of an empty one.
    #[must_use]
    pub fn with_store(mut self, store: Arc<MemoryDocumentStore>) -> Self {
        self.store = store;
        self
    }
}
