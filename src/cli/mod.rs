//! CLI interface for Shiftboard

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shiftboard")]
#[command(version)]
#[command(about = "User and shift API with JWT session tokens", long_about = None)]
pub struct Cli {
    /// Path to the configuration file (defaults to the nearest shiftboard.toml)
    #[arg(short, long, global = true, env = "SHIFTBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new shiftboard.toml configuration file
    Init,

    /// Start the HTTP API server
    Serve {
        /// Host to bind to (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print a signed session token for a user id
    Token {
        /// User id to embed in the token
        #[arg(short, long)]
        user_id: i64,
    },

    /// Print a bcrypt hash for seeding the users table
    HashPassword {
        /// Plain-text password
        password: String,
    },
}
