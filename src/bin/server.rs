//! Permatrix matrix server
//!
//! Serves the routes of `permatrix::server` for a web renderer.
//!
//! Run with: cargo run --features server --bin permatrix-server

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use permatrix::ModuleTree;

#[derive(Parser, Debug)]
#[command(name = "permatrix-server")]
#[command(about = "Permission matrix engine over HTTP")]
struct Args {
    /// Address to bind
    #[arg(long, env = "PERMATRIX_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, modules = ModuleTree::hr().len(), "permatrix-server v{} listening", env!("CARGO_PKG_VERSION"));

    axum::serve(listener, permatrix::server::router()).await?;
    Ok(())
}
