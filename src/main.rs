#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use clap::Parser;
use pm25api::config::{self, DEFAULT_CONFIG_FILE, load_configuration};
use pm25api::dataset::{load_dataset, shared};
use pm25api::http::server::run_http_server;
use pm25api::http::state::HttpServerState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Level;
use tracing::event;

/// PM2.5 REST API server
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Settings file, read after the PM25_* environment variables
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create Tokio runtime")?;

    runtime.block_on(async_main(cli))
}

async fn async_main(cli: Cli) -> Result<()> {
    // Initialize tracing subscriber for HTTP request logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .init();

    load_configuration(&cli.config).context("Failed to load configuration")?;
    let config = config::get().context("Failed to get configuration")?;

    // Initialize Sentry if DSN is provided
    let _sentry = config.sentry_dsn.as_ref().map(|dsn| {
        sentry::init((
            dsn.clone(),
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    event!(Level::INFO, "Starting to load dataset.");
    let data_path = config.data_path.clone();
    let options = config.load_options();
    let store = tokio::task::spawn_blocking(move || load_dataset(&data_path, &options))
        .await
        .context("Dataset loading task panicked")?
        .with_context(|| format!("Failed to load dataset {}", config.data_path.display()))?;
    event!(
        Level::INFO,
        records = store.len(),
        "Finished loading dataset."
    );

    // Exit the program if a panic occurs
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        default_panic(info);
        std::process::exit(1);
    }));

    let address = SocketAddr::from((config.endpoint, config.port));

    event!(Level::INFO, "Starting HTTP server on {}", address);
    match run_http_server(
        HttpServerState {
            name: Arc::new("PM2.5 REST API".to_string()),
            store: shared(store),
        },
        address,
    )
    .await
    {
        Ok(_) => {
            event!(Level::INFO, "HTTP server stopped gracefully");
            Ok(())
        }
        Err(err) => {
            event!(Level::ERROR, "HTTP server failed to start: {}", err);
            Err(err)
        }
    }
}
