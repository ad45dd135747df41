//! Process configuration: node role, database settings and listen address.
//!
//! Values come from the process environment first and from an optional
//! `.env` file second. The file never overrides a variable the process
//! already carries.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;

use mockable::Env;
use tracing::warn;

use gradebook::domain::{NodeRole, NodeRoleParseError};
use gradebook::inbound::http::session_config::SessionConfigError;
use gradebook::outbound::persistence::{ConnectError, DbSettings, MysqlConnector};

const ROLE_ENV: &str = "ROLE";
const DB_HOST_ENV: &str = "DB_HOST";
const DB_PORT_ENV: &str = "DB_PORT";
const DB_USER_ENV: &str = "DB_USER";
const DB_PASS_ENV: &str = "DB_PASS";
const ROOT_PASSWORD_ENV: &str = "MYSQL_ROOT_PASSWORD";
const DB_NAME_ENV: &str = "DB_NAME";
const BIND_ADDR_ENV: &str = "BIND_ADDR";

const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 3306;
const DEFAULT_DB_USER: &str = "root";
const DEFAULT_DB_NAME: &str = "distributed_db";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:7860";

/// Startup configuration failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `ROLE` is neither `primary` nor `replica`.
    #[error(transparent)]
    InvalidRole(#[from] NodeRoleParseError),
    /// `DB_PORT` is not a valid TCP port.
    #[error("invalid DB_PORT '{value}': expected an integer between 1 and 65535")]
    InvalidPort { value: String },
    /// `BIND_ADDR` is not a socket address.
    #[error("invalid BIND_ADDR '{value}': expected host:port")]
    InvalidBindAddr { value: String },
    /// Database settings cannot be turned into a connection URL.
    #[error(transparent)]
    InvalidDatabase(#[from] ConnectError),
    /// Session cookie settings are invalid.
    #[error(transparent)]
    Session(#[from] SessionConfigError),
}

/// Settings resolved once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub role: NodeRole,
    pub db: DbSettings,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    /// Resolve configuration from `env`, falling back to `dotenv` and then to
    /// built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an unknown role, an unparsable port or bind
    /// address, or a database name that cannot form a URL.
    pub fn from_env<E: Env>(env: &E, dotenv: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let lookup = |key: &str| env.string(key).or_else(|| dotenv.get(key).cloned());

        let role = lookup(ROLE_ENV)
            .map(|raw| raw.parse::<NodeRole>())
            .transpose()?
            .unwrap_or_default();

        let port = match lookup(DB_PORT_ENV) {
            None => DEFAULT_DB_PORT,
            Some(value) => match value.trim().parse::<u16>() {
                Ok(port) if port > 0 => port,
                _ => return Err(ConfigError::InvalidPort { value }),
            },
        };

        let password = lookup(DB_PASS_ENV)
            .or_else(|| lookup(ROOT_PASSWORD_ENV))
            .unwrap_or_default();

        let db = DbSettings::new(
            lookup(DB_HOST_ENV).unwrap_or_else(|| DEFAULT_DB_HOST.to_owned()),
            lookup(DB_NAME_ENV).unwrap_or_else(|| DEFAULT_DB_NAME.to_owned()),
        )
        .with_port(port)
        .with_credentials(
            lookup(DB_USER_ENV).unwrap_or_else(|| DEFAULT_DB_USER.to_owned()),
            password,
        );
        // Surface a malformed URL at startup instead of on the first request.
        db.database_url()?;

        let raw_bind = lookup(BIND_ADDR_ENV).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = raw_bind
            .trim()
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidBindAddr { value: raw_bind })?;

        Ok(Self {
            role,
            db,
            bind_addr,
        })
    }

    /// Connector for the configured database.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDatabase`] when the settings cannot be
    /// encoded as a URL.
    pub fn connector(&self) -> Result<MysqlConnector, ConfigError> {
        Ok(MysqlConnector::new(&self.db)?)
    }
}

/// Read `KEY=VALUE` pairs from a `.env` file.
///
/// Blank lines and `#` comments are skipped, an optional `export ` prefix is
/// accepted and matching single or double quotes around a value are removed.
/// A missing file yields an empty map, and so does an unreadable one after a
/// warning; the process environment then stands alone.
pub fn load_env_file(path: &Path) -> HashMap<String, String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_env_file(&contents),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring unreadable env file");
            HashMap::new()
        }
    }
}

fn parse_env_file(contents: &str) -> HashMap<String, String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let line = line.strip_prefix("export ").unwrap_or(line);
            let (key, value) = line.split_once('=')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_owned(), unquote(value.trim()).to_owned()))
        })
        .collect()
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
