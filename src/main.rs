//! Temperature by CEP service.
//!
//! # Architecture Overview
//!
//! ```text
//!   client ──POST /v1/temperature──▶ input role ──GET /ws/{cep}/json/──▶ ViaCEP
//!                                        │
//!                                        └──POST /v1/weather (traceparent)──▶ weather role
//!                                                                               │
//!                                                        weatherapi.com ◀──GET /v1/current.json
//! ```
//!
//! One binary serves either role; both join the caller's trace through the
//! W3C `traceparent` header.

use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;

use temperature_by_cep::config::validation::validate_config;
use temperature_by_cep::config::{load_config, ConfigError};
use temperature_by_cep::lifecycle::{build_router, Role, Shutdown};
use temperature_by_cep::observability::{logging, metrics, Telemetry};
use temperature_by_cep::HttpServer;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RoleArg {
    Input,
    Weather,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Input => Role::Input,
            RoleArg::Weather => Role::Weather,
        }
    }
}

#[derive(Parser)]
#[command(name = "temperature-service")]
#[command(about = "Resolves a CEP to its current temperature", long_about = None)]
struct Cli {
    /// Service role to run.
    #[arg(value_enum)]
    role: RoleArg,

    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let role = Role::from(cli.role);

    let mut config = load_config(cli.config.as_deref(), false)?;
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    validate_config(&config, role.requires_api_key(&config)).map_err(ConfigError::Validation)?;

    logging::init_logging(&config.observability);
    tracing::info!(role = %role, version = env!("CARGO_PKG_VERSION"), "temperature-service starting");

    let telemetry = Telemetry::init(&config.observability, &config.service.name)?;

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let router = build_router(role, &config, telemetry.tracer("temperature-by-cep"))?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    HttpServer::new(router, role.as_str())
        .run(listener, shutdown.subscribe())
        .await?;

    telemetry.shutdown();
    tracing::info!("Shutdown complete");
    Ok(())
}
