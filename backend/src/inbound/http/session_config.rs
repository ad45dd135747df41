//! Cookie session settings.
//!
//! The key comes from a file so that a primary and its replica can share
//! it and a session survives a client switching nodes. Variables are read
//! through [`mockable::Env`].

use std::io;
use std::path::{Path, PathBuf};

use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::time::Duration;
use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use zeroize::Zeroizing;

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "session";

const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
const DEFAULT_KEY_FILE: &str = "/var/run/secrets/session_key";
const SESSION_KEY_MIN_LEN: usize = 64;
const SESSION_TTL: Duration = Duration::hours(8);
const BOOL_SPELLINGS: &str = "1|0|true|false|yes|no|y|n";

/// Whether the binary was compiled with debug assertions.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Missing key files are tolerated.
    Debug,
    /// Key files must exist and hold at least 64 bytes.
    Release,
}

impl BuildMode {
    /// Mode of the running binary.
    #[must_use]
    pub const fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Key and cookie flags for [`SessionSettings::middleware`].
#[derive(Clone)]
pub struct SessionSettings {
    /// Signs and encrypts the cookie.
    pub key: Key,
    /// Sets the `Secure` attribute.
    pub cookie_secure: bool,
}

impl SessionSettings {
    /// Private (encrypted) cookie store, `HttpOnly`, `SameSite=Lax`, eight
    /// hour lifetime.
    pub fn middleware(&self) -> SessionMiddleware<CookieSessionStore> {
        let lifecycle = PersistentSession::default().session_ttl(SESSION_TTL);
        SessionMiddleware::builder(CookieSessionStore::default(), self.key.clone())
            .cookie_name(SESSION_COOKIE_NAME.to_owned())
            .cookie_path("/".to_owned())
            .cookie_http_only(true)
            .cookie_secure(self.cookie_secure)
            .cookie_same_site(SameSite::Lax)
            .cookie_content_security(CookieContentSecurity::Private)
            .session_lifecycle(lifecycle)
            .build()
    }
}

/// Rejected session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// A flag variable holds something other than a boolean spelling.
    #[error("{name}='{value}' is not one of {expected}")]
    InvalidEnv {
        /// Offending variable.
        name: &'static str,
        /// Its value.
        value: String,
        /// What would have been accepted.
        expected: &'static str,
    },
    /// The key file could not be read and no fallback is allowed.
    #[error("cannot read session key file {path}: {source}")]
    KeyRead {
        /// Path taken from `SESSION_KEY_FILE`.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: io::Error,
    },
    /// Release builds refuse short keys.
    #[error("session key file {path} holds {length} bytes, {min_len} required")]
    KeyTooShort {
        /// Path taken from `SESSION_KEY_FILE`.
        path: PathBuf,
        /// Bytes read.
        length: usize,
        /// Minimum accepted.
        min_len: usize,
    },
}

/// Read `SESSION_KEY_FILE`, `SESSION_COOKIE_SECURE` and
/// `SESSION_ALLOW_EPHEMERAL`.
///
/// A missing key file falls back to a random key in debug builds, or in
/// release builds when `SESSION_ALLOW_EPHEMERAL` is true. Sessions signed
/// with such a key die with the process.
///
/// ```rust
/// use gradebook::inbound::http::session_config::{BuildMode, session_settings_from_env};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "SESSION_KEY_FILE" => Some("/nonexistent/session_key".to_owned()),
///     "SESSION_COOKIE_SECURE" => Some("0".to_owned()),
///     _ => None,
/// });
///
/// let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug falls back");
/// assert!(!settings.cookie_secure);
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = flag(env, COOKIE_SECURE_ENV, true)?;
    let allow_ephemeral = flag(env, ALLOW_EPHEMERAL_ENV, false)?;
    let may_generate = allow_ephemeral || mode == BuildMode::Debug;
    let path = env
        .string(KEY_FILE_ENV)
        .map_or_else(|| PathBuf::from(DEFAULT_KEY_FILE), PathBuf::from);

    let key = match load_key(&path, mode) {
        Ok(key) => key,
        Err(SessionConfigError::KeyRead { source, .. }) if may_generate => {
            warn!(path = %path.display(), error = %source, "session key file unreadable; generated a process-local key");
            Key::generate()
        }
        Err(err) => return Err(err),
    };
    if !cookie_secure {
        warn!("session cookie sent without the Secure attribute");
    }
    Ok(SessionSettings { key, cookie_secure })
}

fn load_key(path: &Path, mode: BuildMode) -> Result<Key, SessionConfigError> {
    let bytes = std::fs::read(path)
        .map(Zeroizing::new)
        .map_err(|source| SessionConfigError::KeyRead {
            path: path.to_owned(),
            source,
        })?;
    if mode == BuildMode::Release && bytes.len() < SESSION_KEY_MIN_LEN {
        return Err(SessionConfigError::KeyTooShort {
            path: path.to_owned(),
            length: bytes.len(),
            min_len: SESSION_KEY_MIN_LEN,
        });
    }
    info!(path = %path.display(), fingerprint = %fingerprint(&bytes), "session key loaded");
    Ok(Key::derive_from(&bytes))
}

/// Short digest for comparing keys across nodes without logging them.
fn fingerprint(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    hex::encode(digest.get(..8).unwrap_or_default())
}

fn flag<E: Env>(env: &E, name: &'static str, default: bool) -> Result<bool, SessionConfigError> {
    env.string(name).map_or(Ok(default), |value| {
        parse_bool(&value).ok_or(SessionConfigError::InvalidEnv {
            name,
            value,
            expected: BOOL_SPELLINGS,
        })
    })
}

/// Accepted boolean spellings, case-insensitive and trimmed.
pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
