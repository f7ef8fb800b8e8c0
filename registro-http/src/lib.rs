//! HTTP front of the subject and pet registries. Each registry is served by
//! its own binary; both share the settings, logging and middleware here.

use std::net::SocketAddr;

use registro_base::{PetRegistry, SubjectRegistry};
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::{
    error::StartupError,
    middleware::{cors, tower_trace},
    server::{build_pet_routes, build_subject_routes},
    settings::{build_config, build_file_path, command::Args},
};

pub mod config;
mod doc;
pub mod error;
pub mod logging;
mod middleware;
pub mod server;
pub mod settings;
mod wrappers;

pub use crate::config::Service;
pub use clap::Parser;

const TARGET_HTTP: &str = "Registro-Http";

/// Starts the service and serves it until Ctrl-C.
pub async fn run(service: Service, args: Args) -> Result<(), StartupError> {
    let mut file_path = args.file_path;
    if file_path.is_empty() {
        file_path = build_file_path(service);
    }

    let config = build_config(service, args.env_config, &file_path)?;
    let _logging = logging::init_logging(&config.logging, service.name());

    let routes = match service {
        Service::Subjects => build_subject_routes(SubjectRegistry::new(), config.doc),
        Service::Pets => {
            let registry = if config.seed {
                PetRegistry::seeded()
            } else {
                PetRegistry::new()
            };
            build_pet_routes(registry, config.doc)
        }
    };

    let listener = TcpListener::bind(&config.address).await?;
    let address = listener.local_addr()?;
    info!(TARGET_HTTP, "{} listening on {}", service.name(), address);

    axum::serve(
        listener,
        tower_trace(routes, service)
            .layer(cors())
            .into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!(TARGET_HTTP, "{} stopped", service.name());
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(TARGET_HTTP, "Can not listen for the shutdown signal: {}", e);
    }
}
