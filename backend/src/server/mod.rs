//! Builds the Actix application and binds the HTTP server.

mod config;
mod state_builders;

pub use config::{AppConfig, ConfigError, load_env_file};
pub use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use gradebook::Trace;
#[cfg(debug_assertions)]
use gradebook::doc::ApiDoc;
use gradebook::inbound::http::api_routes;
use gradebook::inbound::http::health::{HealthState, live, ready};
use gradebook::inbound::http::session_config::SessionSettings;
use gradebook::inbound::http::state::HttpState;
use gradebook::inbound::http::validation::{json_config, path_config};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    session: SessionSettings,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        session,
    } = deps;

    let api = web::scope("/api/v1")
        .wrap(session.middleware())
        .configure(api_routes);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .app_data(path_config())
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct the HTTP server for the configured node.
///
/// # Parameters
/// - `health_state`: shared readiness state, marked ready once bound.
/// - `config`: resolved node role, database settings and bind address.
/// - `session`: cookie key and flags.
///
/// # Errors
/// Returns [`std::io::Error`] when the database settings are unusable or the
/// socket cannot be bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: &AppConfig,
    session: SessionSettings,
) -> std::io::Result<Server> {
    let connector = config
        .connector()
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let gate = gradebook::domain::WriteGate::for_role(config.role);
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state: build_http_state(&connector, gate),
        session,
    };

    let server = HttpServer::new(move || build_app(deps.clone()))
        .disable_signals()
        .bind(config.bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}

/// Drive `server` until SIGINT or SIGTERM, then fail liveness and drain.
///
/// # Errors
/// Returns the server's own I/O error, if any.
pub async fn serve_until_shutdown(
    server: Server,
    health_state: web::Data<HealthState>,
) -> std::io::Result<()> {
    let handle = server.handle();
    actix_web::rt::spawn(async move {
        shutdown_signal().await;
        begin_shutdown(&health_state);
        handle.stop(true).await;
    });
    server.await
}

fn begin_shutdown(health_state: &HealthState) {
    health_state.mark_unhealthy();
    info!("shutdown requested; draining connections");
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = terminate.recv() => {}
                }
                return;
            }
            Err(err) => warn!(error = %err, "SIGTERM handler unavailable; waiting for Ctrl-C"),
        }
    }
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Ctrl-C handler unavailable; shutdown only by process kill");
        std::future::pending::<()>().await;
    }
}
