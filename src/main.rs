//! Reviewlens HTTP server
//!
//! Starts an Axum web server that accepts restaurant reviews, asks the
//! sentiment model service for predictions, and collects feedback on them.

use clap::Parser;
use reviewlens::cli::{Cli, Command, generate_config_template};
use reviewlens::config::Config;
use reviewlens::handlers::AppState;
use reviewlens::{app, telemetry};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(Command::Config { output }) = cli.command {
        let template = generate_config_template();
        match output {
            Some(path) => {
                std::fs::write(&path, template)?;
                println!("Wrote configuration template to {}", path);
            }
            None => print!("{}", template),
        }
        return Ok(());
    }

    let config = Config::load(&cli.config)?;

    telemetry::init(&config.observability.log_level);

    tracing::info!(
        model_url = %config.services.model_url(),
        collection_url = %config.services.collection_url(),
        "Starting Reviewlens server on {}:{}",
        config.server.host,
        config.server.port
    );

    let addr = SocketAddr::from((
        config
            .server
            .host
            .parse::<std::net::IpAddr>()
            .unwrap_or_else(|_| std::net::IpAddr::from([0, 0, 0, 0])),
        config.server.port,
    ));

    let state = AppState::new(Arc::new(config))?;
    let router = app(state);

    tracing::info!("Listening on {}", addr);
    tracing::info!("Review form available at http://{}/", addr);
    tracing::info!("Metrics available at http://{}/metrics", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
