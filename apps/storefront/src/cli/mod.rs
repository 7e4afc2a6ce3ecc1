//! # Storefront CLI Module
//!
//! This module implements the CLI interface for Storefront.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server (default)
//! - `products` - List products through the catalog resolver
//! - `product` - Show a single product
//! - `health` - Show the document store health snapshot

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use storefront_core::StorefrontError;

pub use commands::*;

use crate::config::Config;
use crate::store::{Backend, open_store};

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Storefront - e-commerce backend
///
/// Serves a product catalog from MongoDB, falling back to a built-in sample
/// catalog when the database cannot be reached.
#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Document store backend: "mongo" or "memory"
    #[arg(short = 'B', long, global = true, default_value = "mongo")]
    pub backend: String,

    /// Optional TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to (overrides HOST)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List products
    Products {
        /// Case-insensitive text to search for in title and description
        #[arg(short = 'q', long)]
        query: Option<String>,

        /// Maximum number of products
        #[arg(short, long)]
        limit: Option<i64>,
    },

    /// Show one product
    Product {
        /// Product identifier
        id: String,
    },

    /// Show document store health
    Health,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), StorefrontError> {
    let backend: Backend = cli.backend.parse()?;
    let mut config = Config::load(cli.config.as_deref())?;
    let json_mode = cli.json_mode;

    if let Some(Commands::Server { host, port }) = &cli.command {
        if let Some(host) = host {
            config.host.clone_from(host);
        }
        if let Some(port) = port {
            config.port = *port;
        }
    }

    let store = open_store(backend, &config).await;

    match cli.command {
        Some(Commands::Server { .. }) | None => cmd_server(store, config).await,
        Some(Commands::Products { query, limit }) => {
            cmd_products(store, json_mode, query.as_deref(), limit).await
        }
        Some(Commands::Product { id }) => cmd_product(store, json_mode, &id).await,
        Some(Commands::Health) => cmd_health(store, &config, json_mode).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_server_overrides() {
        let cli = Cli::parse_from(["storefront", "server", "--port", "9001", "-H", "127.0.0.1"]);
        match cli.command {
            Some(Commands::Server { host, port }) => {
                assert_eq!(host.as_deref(), Some("127.0.0.1"));
                assert_eq!(port, Some(9001));
            }
            other => unreachable!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn parses_products_with_global_flags() {
        let cli = Cli::parse_from([
            "storefront",
            "products",
            "-q",
            "wallet",
            "--backend",
            "memory",
            "--json-mode",
        ]);
        assert_eq!(cli.backend, "memory");
        assert!(cli.json_mode);
        assert!(matches!(
            cli.command,
            Some(Commands::Products { query: Some(ref q), limit: None }) if q == "wallet"
        ));
    }

    #[test]
    fn no_subcommand_defaults() {
        let cli = Cli::parse_from(["storefront"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.backend, "mongo");
    }
}
