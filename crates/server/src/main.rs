mod routes;

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use axum::http::StatusCode;
use clap::Parser;
use schemalens_core::FetchConfig;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::routes::AppState;

/// HTTP front end for the SchemaLens inspection engine
#[derive(Parser, Debug)]
#[command(name = "schemalens-server")]
#[command(version)]
#[command(about = "Serve schema.org structured-data inspection over HTTP", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, env = "SCHEMALENS_ADDR", default_value = "127.0.0.1:8787", value_name = "ADDR")]
    addr: SocketAddr,

    /// Request timeout in seconds, also used for page fetches
    #[arg(long, env = "SCHEMALENS_TIMEOUT_SECS", default_value = "30", value_name = "SECS")]
    timeout_secs: u64,

    /// Custom User-Agent for page fetches
    #[arg(long, env = "SCHEMALENS_USER_AGENT", value_name = "UA")]
    user_agent: Option<String>,
}

fn app(args: &Args) -> Router {
    let mut fetch = FetchConfig { timeout: args.timeout_secs, ..Default::default() };
    if let Some(user_agent) = &args.user_agent {
        fetch.user_agent = user_agent.clone();
    }

    routes::router(AppState { fetch })
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(args.timeout_secs),
        ))
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let app = app(&args);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("Failed to bind {}", args.addr))?;
    tracing::info!(addr = %args.addr, timeout_secs = args.timeout_secs, "schemalens-server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}
