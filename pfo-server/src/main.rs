use anyhow::{anyhow, Result};
use clap::{value_parser, Arg, ArgMatches, Command};
use pfo_server::{routes, Service};
use pfo_structs::config::{
    ServiceConfig, DEFAULT_HOST, DEFAULT_MAX_BODY_BYTES, DEFAULT_MAX_TABLE_CELLS, DEFAULT_PORT,
    DEFAULT_SERVICE_NAME,
};
use std::{net::SocketAddr, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn cli() -> Command {
    Command::new("pfo-server")
        .about("Portfolio optimization service (0/1 knapsack over HTTP)")
        .arg(
            Arg::new("host")
                .long("host")
                .env("PFO_HOST")
                .help("(Optional) Set address to listen on")
                .default_value(DEFAULT_HOST)
                .value_parser(value_parser!(String)),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .env("PFO_PORT")
                .help("(Optional) Set port to listen on")
                .default_value(DEFAULT_PORT.to_string())
                .value_parser(value_parser!(u16)),
        )
        .arg(
            Arg::new("service_name")
                .long("service-name")
                .env("PFO_SERVICE_NAME")
                .help("(Optional) Set service name reported by /health")
                .default_value(DEFAULT_SERVICE_NAME)
                .value_parser(value_parser!(String)),
        )
        .arg(
            Arg::new("max_table_cells")
                .long("max-table-cells")
                .env("PFO_MAX_TABLE_CELLS")
                .help("(Optional) Set limit on (items + 1) * (capacity + 1) per request")
                .default_value(DEFAULT_MAX_TABLE_CELLS.to_string())
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("max_body_bytes")
                .long("max-body-bytes")
                .env("PFO_MAX_BODY_BYTES")
                .help("(Optional) Set limit on request body size in bytes")
                .default_value(DEFAULT_MAX_BODY_BYTES.to_string())
                .value_parser(value_parser!(u64)),
        )
}

fn load_config(matches: &ArgMatches) -> Result<ServiceConfig> {
    let arg = |id: &str| anyhow!("Missing argument '{}'", id);
    Ok(ServiceConfig {
        host: matches.get_one::<String>("host").ok_or_else(|| arg("host"))?.clone(),
        port: *matches.get_one::<u16>("port").ok_or_else(|| arg("port"))?,
        service_name: matches
            .get_one::<String>("service_name")
            .ok_or_else(|| arg("service_name"))?
            .clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        max_table_cells: *matches
            .get_one::<usize>("max_table_cells")
            .ok_or_else(|| arg("max_table_cells"))?,
        max_body_bytes: *matches
            .get_one::<u64>("max_body_bytes")
            .ok_or_else(|| arg("max_body_bytes"))?,
    })
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run(cli().get_matches()).await {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(matches: ArgMatches) -> Result<()> {
    let config = load_config(&matches)?;
    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .map_err(|e| anyhow!("Invalid listen address {}: {}", config.bind_address(), e))?;

    let service = Arc::new(Service::new(config));
    let (addr, server) = warp::serve(routes(service.clone()))
        .try_bind_with_graceful_shutdown(addr, shutdown_signal())
        .map_err(|e| anyhow!("Failed to bind {}: {}", addr, e))?;

    let config = service.config();
    info!(
        max_table_cells = config.max_table_cells,
        max_body_bytes = config.max_body_bytes,
        "{} v{} listening on http://{}",
        config.service_name,
        config.version,
        addr
    );
    info!("  GET  /health     - Health check");
    info!("  POST /optimizar  - Optimize portfolio selection");

    server.await;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
