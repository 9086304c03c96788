//! # Schemagen CLI
//!
//! Command-line interface for Schemagen.
//!
//! ## Commands
//!
//! - `generate` - Generate a migration for the selected tables
//! - `tables` - List the tables of a connection
//! - `inspect` - Print the extracted schema of one table
//!

pub mod args;
pub mod commands;
pub mod config;
pub mod output;

pub use args::{Cli, Commands};
pub use config::AppConfig;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a parsed command line
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load(&cli.config)?;

    match &cli.command {
        Commands::Generate(args) => commands::generate(args, &config),
        Commands::Tables { connection } => commands::tables(connection.as_deref(), &config),
        Commands::Inspect {
            table,
            connection,
            no_prefix,
        } => commands::inspect(table, connection.as_deref(), *no_prefix, &config),
    }
}

impl Cli {
    /// Log filter used when `RUST_LOG` is not set
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
