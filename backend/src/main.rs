//! Backend entry-point: resolves configuration and serves the REST API.

mod server;

use std::path::Path;

use actix_web::web;
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use gradebook::inbound::http::health::HealthState;
use gradebook::inbound::http::session_config::{BuildMode, session_settings_from_env};
use server::{AppConfig, ConfigError, create_server, load_env_file, serve_until_shutdown};

const ENV_FILE: &str = ".env";

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let dotenv = load_env_file(Path::new(ENV_FILE));
    let env = DefaultEnv::new();
    let config = AppConfig::from_env(&env, &dotenv).map_err(startup_error)?;
    let session = session_settings_from_env(&env, BuildMode::from_debug_assertions())
        .map_err(|err| startup_error(ConfigError::from(err)))?;

    info!(
        role = %config.role,
        db_host = config.db.host(),
        db_name = config.db.database(),
        bind_addr = %config.bind_addr,
        "starting gradebook node"
    );

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), &config, session)?;
    serve_until_shutdown(server, health_state).await
}

fn startup_error(err: ConfigError) -> std::io::Error {
    std::io::Error::other(err.to_string())
}
