//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use actix_web::cookie::{Key, SameSite};
use foodapp::outbound::persistence::DbPool;
use tracing::warn;

use super::settings::{AppSettings, SettingsError};

const SESSION_KEY_MIN_LEN: usize = 64;

/// Errors raised while turning settings into a server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ServerConfigError {
    /// A setting failed to parse.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// Reading the session key file failed and no fallback is allowed.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The session key file is too short for release builds.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration from explicit values.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
        }
    }

    /// Derive the configuration from loaded settings.
    ///
    /// # Errors
    /// Returns [`ServerConfigError`] when the bind address does not parse or
    /// the session key cannot be loaded.
    pub fn from_settings(settings: &AppSettings) -> Result<Self, ServerConfigError> {
        let key = load_session_key(
            &settings.session_key_file(),
            cfg!(debug_assertions),
            settings.session_allow_ephemeral,
        )?;
        Ok(Self::new(
            key,
            settings.cookie_secure(),
            SameSite::Lax,
            settings.bind_addr()?,
        ))
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// Without a pool the server runs on the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

/// Read the session signing key from `path`.
///
/// Debug builds, or `allow_ephemeral`, fall back to a generated key when the
/// file is unreadable. Release builds reject keys shorter than 64 bytes.
fn load_session_key(
    path: &Path,
    debug: bool,
    allow_ephemeral: bool,
) -> Result<Key, ServerConfigError> {
    match std::fs::read(path) {
        Ok(bytes) => {
            let length = bytes.len();
            if !debug && length < SESSION_KEY_MIN_LEN {
                return Err(ServerConfigError::KeyTooShort {
                    path: path.to_path_buf(),
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            Ok(Key::derive_from(&bytes))
        }
        Err(error) if debug || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary session key (dev only)"
            );
            Ok(Key::generate())
        }
        Err(source) => Err(ServerConfigError::KeyRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn key_dir() -> TempDir {
        tempfile::tempdir().expect("tempdir")
    }

    fn key_file(dir: &TempDir, len: usize) -> PathBuf {
        let path = dir.path().join("session_key");
        std::fs::write(&path, vec![b'k'; len]).expect("write key file");
        path
    }

    #[rstest]
    fn release_rejects_short_key(key_dir: TempDir) {
        let path = key_file(&key_dir, 16);
        assert!(matches!(
            load_session_key(&path, false, false),
            Err(ServerConfigError::KeyTooShort { length: 16, .. })
        ));
    }

    #[rstest]
    fn release_accepts_long_key(key_dir: TempDir) {
        let path = key_file(&key_dir, SESSION_KEY_MIN_LEN);
        assert!(load_session_key(&path, false, false).is_ok());
    }

    #[rstest]
    #[case(true, false)]
    #[case(false, true)]
    fn missing_key_falls_back_when_permitted(
        key_dir: TempDir,
        #[case] debug: bool,
        #[case] ephemeral: bool,
    ) {
        let path = key_dir.path().join("absent");
        assert!(load_session_key(&path, debug, ephemeral).is_ok());
    }

    #[rstest]
    fn missing_key_fails_in_release(key_dir: TempDir) {
        let path = key_dir.path().join("absent");
        assert!(matches!(
            load_session_key(&path, false, false),
            Err(ServerConfigError::KeyRead { .. })
        ));
    }
}
