//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `MEALBOOK_*` environment variables, and
//! configuration files, in OrthoConfig's usual precedence. Settings are
//! passed explicitly into the server and adapters; nothing reads the
//! environment after startup.

use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Runtime settings for the meal logging service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MEALBOOK")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// File holding the session signing key.
    pub session_key_file: Option<PathBuf>,
    /// Mark session cookies `Secure`. Defaults to `true` when unset.
    pub cookie_secure: Option<bool>,
    /// Permit a generated session key when the key file is unreadable.
    pub allow_ephemeral_session_key: Option<bool>,
    /// Optional JSON snapshot of user and meal documents to load at startup.
    pub seed_file: Option<PathBuf>,
}

impl AppSettings {
    /// Parsed bind address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// Returns the parse error for a malformed configured address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }

    /// Configured key file, or the conventional secrets mount.
    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }

    /// Whether session cookies carry the `Secure` attribute.
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }

    /// Whether a missing key file may be replaced by a generated key.
    pub fn allow_ephemeral_session_key(&self) -> bool {
        self.allow_ephemeral_session_key.unwrap_or(false)
    }
}
