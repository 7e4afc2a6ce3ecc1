//! # Storefront - E-Commerce Backend
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server (default command)
//! storefront server --host 0.0.0.0 --port 8000
//!
//! # Catalog from the command line
//! storefront products -q wallet
//! storefront product sample-2 --json-mode
//! storefront health
//! ```

use clap::Parser;
use storefront::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // STOREFRONT_LOG_FORMAT=json switches to machine-parseable output.
    let log_format =
        std::env::var("STOREFRONT_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "storefront=info,tower_http=debug".into());

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

    let cli = cli::Cli::parse();

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
  Storefront v{}
  Catalog backend with sample-catalog fallback
"#,
        env!("CARGO_PKG_VERSION")
    );
}
