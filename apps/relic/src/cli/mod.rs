//! # Relic CLI Module
//!
//! This module implements the CLI interface for Relic.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server
//! - `init` - Initialize a new registry snapshot
//! - `status` - Show registry status
//! - `mint` - Mint tokens to an account (admin)
//! - `stake` - Stake a token (owner)
//! - `unstake` - Unstake a token (owner)
//! - `level-up` - Level up a staked token (owner)
//! - `info` - Show full state of a token
//! - `uri` - Print the metadata URI of a token
//! - `set-base-uri` - Change the metadata base URI (admin)
//! - `transfer` - Transfer a token between accounts
//! - `generate-metadata` - Write metadata JSON documents for all tokens
//! - `export` - Export the registry snapshot to a file

mod commands;

use clap::{Parser, Subcommand};
use relic_core::RegistryError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Relic - Token Registry Server
///
/// A deterministic ownership, staking, and leveling registry.
/// Every mutation names the account performing it; the registry decides
/// authorization, never the transport.
#[derive(Parser, Debug)]
#[command(name = "relic")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the registry snapshot file
    #[arg(short = 'D', long, global = true, default_value = "relic.bin")]
    pub database: PathBuf,

    /// Account performing the operation
    #[arg(short = 'c', long, global = true, default_value = "0")]
    pub caller: u64,

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
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Optional TOML config file (host/port override CLI defaults)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Initialize a new registry snapshot with the caller as admin
    Init {
        /// Force initialization even if snapshot exists
        #[arg(short, long)]
        force: bool,
    },

    /// Show registry status
    Status,

    /// Mint tokens to an account (admin only)
    Mint {
        /// Receiving account
        #[arg(short, long)]
        to: u64,

        /// Number of tokens to mint
        #[arg(short = 'n', long, default_value = "1")]
        quantity: u64,
    },

    /// Stake a token (owner only)
    Stake {
        /// Token ID
        #[arg(short, long)]
        token: u64,
    },

    /// Unstake a token (owner only)
    Unstake {
        /// Token ID
        #[arg(short, long)]
        token: u64,
    },

    /// Level up a staked token (owner only)
    LevelUp {
        /// Token ID
        #[arg(short, long)]
        token: u64,
    },

    /// Show full state of a token
    Info {
        /// Token ID
        #[arg(short, long)]
        token: u64,
    },

    /// Print the metadata URI of a token
    Uri {
        /// Token ID
        #[arg(short, long)]
        token: u64,
    },

    /// Change the metadata base URI (admin only)
    SetBaseUri {
        /// New base URI
        #[arg(short, long)]
        base: String,
    },

    /// Transfer a token between accounts
    Transfer {
        /// Current owner account
        #[arg(short, long)]
        from: u64,

        /// Receiving account
        #[arg(short, long)]
        to: u64,

        /// Token ID
        #[arg(short = 'T', long)]
        token: u64,
    },

    /// Write metadata JSON documents for every token at every level
    GenerateMetadata {
        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Base URI for image references
        #[arg(short, long, default_value = "ipfs://relic-images/")]
        image_base: String,
    },

    /// Export the registry snapshot to a file
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), RegistryError> {
    let caller = relic_core::AccountId(cli.caller);
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Server { host, port, config }) => {
            cmd_server(&cli.database, &host, port, config.as_deref()).await
        }
        Some(Commands::Init { force }) => cmd_init(&cli.database, caller, force),
        Some(Commands::Status) => cmd_status(&cli.database, json_mode),
        Some(Commands::Mint { to, quantity }) => {
            cmd_mint(&cli.database, caller, relic_core::AccountId(to), quantity)
        }
        Some(Commands::Stake { token }) => {
            cmd_stake(&cli.database, caller, relic_core::TokenId(token))
        }
        Some(Commands::Unstake { token }) => {
            cmd_unstake(&cli.database, caller, relic_core::TokenId(token))
        }
        Some(Commands::LevelUp { token }) => {
            cmd_level_up(&cli.database, caller, relic_core::TokenId(token))
        }
        Some(Commands::Info { token }) => {
            cmd_info(&cli.database, relic_core::TokenId(token), json_mode)
        }
        Some(Commands::Uri { token }) => cmd_uri(&cli.database, relic_core::TokenId(token)),
        Some(Commands::SetBaseUri { base }) => cmd_set_base_uri(&cli.database, caller, &base),
        Some(Commands::Transfer { from, to, token }) => cmd_transfer(
            &cli.database,
            caller,
            relic_core::AccountId(from),
            relic_core::AccountId(to),
            relic_core::TokenId(token),
        ),
        Some(Commands::GenerateMetadata { output, image_base }) => {
            cmd_generate_metadata(&cli.database, &output, &image_base)
        }
        Some(Commands::Export { output }) => cmd_export(&cli.database, &output),
        None => {
            // No subcommand - show status by default
            cmd_status(&cli.database, json_mode)
        }
    }
}
