use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer};

mod api;
mod config;
mod docs;
mod error;
mod model;
mod payroll;
mod remote;
mod routes;
mod session;
mod utils;

#[cfg(test)]
mod test_support;

use config::Config;

use crate::docs::ApiDoc;
use crate::remote::RemoteApi;
use crate::remote::probe::probe_remote;
use crate::session::SessionStore;
use tracing::{info, warn};
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = Config::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("{e:#}")))?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "console.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    for warning in &config.warnings {
        warn!("{warning}");
    }
    info!(remote = %config.remote_api_url, "Payroll console starting...");

    let remote = RemoteApi::new(config.remote_api_url.clone());
    let sessions = SessionStore::new(config.session_ttl, config.session_capacity);

    let remote_for_probe = remote.clone();
    actix_web::rt::spawn(async move {
        if let Err(e) = probe_remote(&remote_for_probe).await {
            log::warn!("{e:#}");
        }
    });

    let server_addr = config.server_addr.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                // wildcard {_:.*} matches the JS/CSS assets
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::new(remote.clone()))
            .app_data(Data::new(sessions.clone()))
            .configure(|cfg| routes::configure(cfg, config.clone()))
    })
    .bind(server_addr)?
    .run()
    .await
}
