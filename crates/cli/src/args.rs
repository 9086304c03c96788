//! Command-line arguments

use clap::{Args, Parser, Subcommand, ValueEnum};
use schemagen_codegen::ScriptStyle;
use std::path::PathBuf;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "schemagen.toml";

#[derive(Debug, Parser)]
#[command(name = "schemagen")]
#[command(version, about = "Generate replayable migration scripts from a database schema")]
pub struct Cli {
    /// Configuration file
    #[arg(long, global = true, env = "SCHEMAGEN_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a migration for one or more tables
    Generate(GenerateArgs),

    /// List the tables of a connection
    Tables {
        /// Connection id
        #[arg(short, long)]
        connection: Option<String>,
    },

    /// Print the extracted schema of a table as JSON
    Inspect {
        /// Table name
        table: String,

        /// Connection id
        #[arg(short, long)]
        connection: Option<String>,

        /// Keep storage table names instead of prefix-neutral aliases
        #[arg(long)]
        no_prefix: bool,
    },
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// `*` or a comma-separated list of table names
    #[arg(short, long)]
    pub tables: String,

    /// Migration class name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Connection id
    #[arg(short, long)]
    pub connection: Option<String>,

    /// Keep storage table names instead of prefix-neutral aliases
    #[arg(long)]
    pub no_prefix: bool,

    /// Storage options appended to every created table
    #[arg(long)]
    pub table_options: Option<String>,

    /// Migration directory, relative to the output directory
    #[arg(long)]
    pub migration_path: Option<String>,

    /// Base output directory
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Script style to write
    #[arg(long, value_enum, default_value_t = StyleArg::Both)]
    pub style: StyleArg,

    /// Overwrite existing files
    #[arg(short, long)]
    pub force: bool,

    /// Print the generated files instead of writing them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StyleArg {
    Builder,
    Raw,
    Both,
}

impl StyleArg {
    pub fn styles(self) -> Vec<ScriptStyle> {
        match self {
            StyleArg::Builder => vec![ScriptStyle::Builder],
            StyleArg::Raw => vec![ScriptStyle::Raw],
            StyleArg::Both => ScriptStyle::all().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::parse_from(["schemagen", "generate", "--tables", "users"]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_FILE));
        assert_eq!(args.tables, "users");
        assert_eq!(args.style, StyleArg::Both);
        assert!(!args.force && !args.dry_run && !args.no_prefix);
    }

    #[test]
    fn test_style_selection() {
        assert_eq!(StyleArg::Raw.styles(), vec![ScriptStyle::Raw]);
        assert_eq!(StyleArg::Both.styles().len(), 2);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["schemagen", "tables", "-v", "--config", "other.toml"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from("other.toml"));
    }
}
