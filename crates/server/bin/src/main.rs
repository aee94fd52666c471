//! Ordex server
//!
//! Entry point for the order backend: HTTP record endpoints plus the
//! authenticated realtime notification channel.

mod config;
mod startup;

#[cfg(test)]
mod tests_integration;

use clap::Parser;
use ordex_server_interface::auth::jwt::JwtCodec;
use ordex_server_interface::state::AppState;
use tokio::net::TcpListener;

/// CLI arguments for ordex-server
#[derive(clap::Parser, Debug)]
#[command(name = "ordex-server")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Order backend with realtime order notifications", long_about = None)]
struct Args {
    /// Override the configured HTTP port
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    setup_logging(args.debug);

    // A missing or empty signing secret fails here, before anything binds.
    let config = config::load(args.port)?;
    let codec = JwtCodec::new(config.jwt_secret.as_bytes())?;
    let state = AppState::new(codec);

    let listener = TcpListener::bind(&config.http_addr).await?;
    startup::run(listener, state).await?;

    Ok(())
}

/// Setup logging based on debug flag.
fn setup_logging(debug: bool) {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    let level = if debug { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}
