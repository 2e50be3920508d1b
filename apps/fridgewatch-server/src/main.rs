//! FridgeWatch Server — HTTP upload endpoint for access-event classification.
//!
//! Routes:
//!   GET  /               Liveness check
//!   GET  /health         Liveness check
//!   POST /upload-images  Multipart frame batch -> access event

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use fridgewatch_classifier_client::CustomVisionClient;
use fridgewatch_common::config::AppConfig;
use fridgewatch_decision_core::{EventPipeline, InMemoryEventStore, PipelineConfig};

mod routes;

use routes::{handle_request, AppState};

#[derive(Parser)]
#[command(
    name = "fridgewatch-server",
    about = "Classifies fridge-access events from camera frame uploads",
    version,
    author
)]
struct Cli {
    /// Path to a JSON config file (defaults apply when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured listen port
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;

    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    fridgewatch_common::logging::init_logging(&logging);

    tracing::info!("Starting server...");

    let prediction_key = AppConfig::prediction_key()?;
    let classifier = Arc::new(CustomVisionClient::new(
        config.classifiers.endpoint.clone(),
        prediction_key,
    ));
    let store = Arc::new(InMemoryEventStore::new());
    let pipeline = EventPipeline::new(classifier, store, PipelineConfig::from(&config));

    let state = Arc::new(AppState { pipeline });

    let port = cli.port.unwrap_or(config.server.port);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Server listening");

    loop {
        let (stream, remote) = listener.accept().await?;
        let state = state.clone();

        tokio::spawn(async move {
            let service = service_fn(move |req| handle_request(state.clone(), req));
            if let Err(e) = http1::Builder::new()
                .serve_connection(TokioIo::new(stream), service)
                .await
            {
                tracing::warn!(%remote, error = %e, "Connection error");
            }
        });
    }
}
