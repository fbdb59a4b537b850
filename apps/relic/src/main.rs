//! # Relic - Token Registry Server
//!
//! The main binary for the Relic deterministic token registry.
//!
//! This application provides:
//! - HTTP REST API server (axum-based)
//! - CLI interface for registry operations
//! - Snapshot file persistence
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                  apps/relic (THE BINARY)                │
//! │                                                         │
//! │      ┌─────────────┐          ┌─────────────┐          │
//! │      │   CLI       │          │   HTTP API  │          │
//! │      │  (clap)     │          │   (axum)    │          │
//! │      └──────┬──────┘          └──────┬──────┘          │
//! │             │                        │                  │
//! │             └───────────┬────────────┘                  │
//! │                         ▼                               │
//! │                 ┌───────────────┐                       │
//! │                 │  relic-core   │                       │
//! │                 │  (THE LOGIC)  │                       │
//! │                 └───────────────┘                       │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! relic server --host 0.0.0.0 --port 8080
//!
//! # CLI operations
//! relic --caller 0 init
//! relic --caller 0 mint --to 42 --quantity 3
//! relic --caller 42 stake --token 0
//! relic info --token 0
//! ```

use clap::Parser;
use relic::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Initialize tracing — RELIC_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("RELIC_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "relic=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Display startup banner
    if !cli.quiet {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Relic startup banner.
fn print_banner() {
    println!(
        r#"
  ██████╗ ███████╗██╗     ██╗ ██████╗
  ██╔══██╗██╔════╝██║     ██║██╔════╝
  ██████╔╝█████╗  ██║     ██║██║
  ██╔══██╗██╔══╝  ██║     ██║██║
  ██║  ██║███████╗███████╗██║╚██████╗
  ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝ ╚═════╝

  Token Registry Server v{}

  Deterministic • Auditable • Time-gated
"#,
        env!("CARGO_PKG_VERSION")
    );
}
