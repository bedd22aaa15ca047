//! Session cookie settings derived from [`AppSettings`].
//!
//! Release builds insist on a real signing key of at least
//! [`SESSION_KEY_MIN_LEN`] bytes unless an ephemeral key is explicitly
//! allowed. Debug builds fall back to a generated key with a warning when
//! the file is missing or shorter than [`KEY_DERIVE_MIN_LEN`].

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use tracing::warn;
use zeroize::Zeroize;

use crate::config::AppSettings;

/// Minimum key file length accepted in release builds.
pub const SESSION_KEY_MIN_LEN: usize = 64;
/// Shortest master key [`Key::derive_from`] accepts.
pub const KEY_DERIVE_MIN_LEN: usize = 32;

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Resolved session middleware settings.
pub struct SessionSettings {
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

/// Errors raised while preparing session settings.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
}

/// Resolve session settings for `mode`.
///
/// # Errors
/// Fails when the key file is unreadable and no ephemeral fallback is
/// permitted, or when a release build is given a short key.
pub fn session_settings(
    settings: &AppSettings,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let same_site = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };
    Ok(SessionSettings {
        key: session_key(settings, mode)?,
        cookie_secure: settings.cookie_secure(),
        same_site,
    })
}

fn session_key(settings: &AppSettings, mode: BuildMode) -> Result<Key, SessionConfigError> {
    let path = settings.session_key_file();
    match std::fs::read(&path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            let min_len = match mode {
                BuildMode::Release => SESSION_KEY_MIN_LEN,
                BuildMode::Debug => KEY_DERIVE_MIN_LEN,
            };
            if length < min_len {
                bytes.zeroize();
                if mode.is_debug() {
                    warn!(
                        path = %path.display(),
                        length,
                        "session key too short; using temporary key"
                    );
                    return Ok(Key::generate());
                }
                return Err(SessionConfigError::KeyTooShort {
                    path,
                    length,
                    min_len,
                });
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(error) if mode.is_debug() || settings.allow_ephemeral_session_key() => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary session key; sessions will not survive a restart"
            );
            Ok(Key::generate())
        }
        Err(source) => Err(SessionConfigError::KeyRead { path, source }),
    }
}
