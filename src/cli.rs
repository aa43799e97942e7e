//! Command-line interface for Reviewlens
//!
//! Provides argument parsing and subcommand handling for the Reviewlens binary.

use clap::{Parser, Subcommand};

/// Review sentiment front end with prediction feedback telemetry
#[derive(Parser)]
#[command(name = "reviewlens")]
#[command(version)]
#[command(about = "Review sentiment front end with prediction feedback telemetry")]
#[command(
    long_about = "Reviewlens serves a restaurant review form, forwards reviews to an \
    external sentiment model, collects correctness feedback on predictions, and ships \
    corrected labels to a data collection service. Prometheus metrics are exposed at /metrics."
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a template configuration file
    Config {
        /// Output file path (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Generate template configuration content
pub fn generate_config_template() -> &'static str {
    r#"# Reviewlens Configuration
# ========================
#
# This file configures the HTTP server, the upstream service URLs, and
# observability settings for Reviewlens.
#
# The service URLs can also be overridden with environment variables:
# MODEL_SERVICE_URL, MODEL_VERSION_URL, and DATA_COLLECTION_URL.
# Environment variables win over values in this file.

# ─────────────────────────────────────────────────────────────────────────────
# SERVER CONFIGURATION
# ─────────────────────────────────────────────────────────────────────────────

[server]
# IP address to bind to (0.0.0.0 for all interfaces, 127.0.0.1 for localhost only)
host = "0.0.0.0"

# Port to listen on
port = 5000

# ─────────────────────────────────────────────────────────────────────────────
# UPSTREAM SERVICES
# ─────────────────────────────────────────────────────────────────────────────
#
# Reviewlens talks to two services:
#
#   - The sentiment model service: classifies review text (model_url) and
#     reports its deployed version (model_version_url)
#   - The data collection service: archives reviews with corrected labels
#     (collection_url)

[services]
model_url = "http://localhost:5001/predict"
model_version_url = "http://localhost:5001/version"
collection_url = "http://localhost:5002/collect"

# Timeout applied to every upstream request, in seconds (1-300)
timeout_seconds = 5

# ─────────────────────────────────────────────────────────────────────────────
# OBSERVABILITY
# ─────────────────────────────────────────────────────────────────────────────

[observability]
# Log level: "trace", "debug", "info", "warn", "error"
log_level = "info"

# Prometheus metrics are always available at /metrics on the server port
# For production, consider using a reverse proxy to restrict access
"#
}
