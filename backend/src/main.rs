//! Service entry point: loads settings, seeds the store, and runs the server.

mod server;

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use mealbook::config::AppSettings;
use ortho_config::OrthoConfig;
use mealbook::inbound::http::health::HealthState;
use mealbook::inbound::http::session_config::{BuildMode, session_settings};
use mealbook::outbound::documents::MemoryDocumentStore;
use server::{ServerConfig, create_server};

fn load_store(settings: &AppSettings) -> std::io::Result<MemoryDocumentStore> {
    let Some(path) = settings.seed_file.as_deref() else {
        return Ok(MemoryDocumentStore::default());
    };
    let store = MemoryDocumentStore::from_snapshot_file(path).map_err(std::io::Error::other)?;
    info!(path = %path.display(), "loaded document snapshot");
    Ok(store)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let session = session_settings(&settings, BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| std::io::Error::other(format!("invalid bind address: {err}")))?;
    let store = load_store(&settings)?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(session, bind_addr).with_store(Arc::new(store));
    create_server(health_state, config)?.await
}
