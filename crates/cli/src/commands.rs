//! Subcommand handlers

use crate::args::GenerateArgs;
use crate::config::AppConfig;
use crate::output;
use anyhow::{Context, Result, bail};
use chrono::Utc;
use schemagen_codegen::{Generator, GeneratorConfig};
use schemagen_introspect::{ConnectionProvider, SchemaExtractor};
use schemagen_ir::{
    MigrationRequest, Validatable, migration_name_at, suggested_migration_name,
};

/// Build the request from flags, falling back to config defaults
pub fn build_request(args: &GenerateArgs, config: &AppConfig) -> MigrationRequest {
    let defaults = &config.defaults;
    let mut request = MigrationRequest::new(&args.tables)
        .with_connection(args.connection.as_deref().unwrap_or(&defaults.connection))
        .with_migration_path(args.migration_path.as_deref().unwrap_or(&defaults.migration_path))
        .with_table_prefix(defaults.use_table_prefix && !args.no_prefix)
        .with_table_options(args.table_options.as_deref().unwrap_or(&defaults.table_options));

    let now = Utc::now();
    request.migration_name = match &args.name {
        Some(name) => name.clone(),
        None => match request.selector() {
            Ok(selector) => suggested_migration_name(selector.name_hint(), now),
            Err(_) => migration_name_at(now),
        },
    };
    request
}

pub fn generate(args: &GenerateArgs, config: &AppConfig) -> Result<()> {
    let request = build_request(args, config).normalized();
    // Rejected before the snapshot is read.
    request.validate()?;
    let registry = config.registry_for(&request.connection)?;

    let mut generator_config = GeneratorConfig::new()
        .with_output_dir(&args.output)
        .with_styles(args.style.styles());
    if args.force {
        generator_config = generator_config.allow_overwrite();
    }
    let generator = Generator::new(generator_config);

    if args.dry_run {
        let migration = generator.generate(&request, &registry)?;
        output::print_dry_run(&migration);
        return Ok(());
    }

    let (migration, written) = generator
        .generate_and_write(&request, &registry)
        .context("Failed to generate migration")?;
    output::print_generation(&migration, &written);
    Ok(())
}

pub fn tables(connection: Option<&str>, config: &AppConfig) -> Result<()> {
    let id = connection.unwrap_or(&config.defaults.connection);
    let registry = config.registry_for(id)?;

    for name in registry.connection(id)?.table_names()? {
        println!("{name}");
    }
    Ok(())
}

pub fn inspect(
    table: &str,
    connection: Option<&str>,
    no_prefix: bool,
    config: &AppConfig,
) -> Result<()> {
    let id = connection.unwrap_or(&config.defaults.connection);
    let registry = config.registry_for(id)?;
    let use_alias = config.defaults.use_table_prefix && !no_prefix;

    let extractor = SchemaExtractor::new(registry.connection(id)?, use_alias);
    let Some(schema) = extractor.extract(table)? else {
        bail!("Table '{table}' not found on connection '{id}'");
    };

    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::{Cli, Commands};
    use clap::Parser;
    use pretty_assertions::assert_eq;

    fn generate_args(extra: &[&str]) -> GenerateArgs {
        let argv = ["schemagen", "generate"].iter().chain(extra);
        match Cli::parse_from(argv).command {
            Commands::Generate(args) => args,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_single_table_suggests_name() {
        let request = build_request(&generate_args(&["--tables", "UserProfile"]), &AppConfig::default());
        assert!(request.migration_name.starts_with('m'));
        assert!(request.migration_name.ends_with("_create_user_profile"));
    }

    #[test]
    fn test_multiple_tables_suggest_tables_name() {
        for tables in ["a, b", "*"] {
            let request = build_request(&generate_args(&["--tables", tables]), &AppConfig::default());
            assert!(request.migration_name.ends_with("_create_tables"));
        }
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = AppConfig::from_toml(
            "[defaults]\nconnection = \"main\"\ntable_options = \"ENGINE=InnoDB\"\n",
        )
        .unwrap();

        let request = build_request(
            &generate_args(&["--tables", "*", "--name", "m1", "--no-prefix"]),
            &config,
        );
        assert_eq!(request.connection, "main");
        assert_eq!(request.migration_name, "m1");
        assert_eq!(request.table_options, "ENGINE=InnoDB");
        assert!(!request.use_table_prefix);

        let request = build_request(
            &generate_args(&["--tables", "*", "--connection", "db", "--table-options", ""]),
            &config,
        );
        assert_eq!(request.connection, "db");
        assert_eq!(request.table_options, "");
    }

    #[test]
    fn test_invalid_request_rejected_before_snapshot_is_read() {
        let config =
            AppConfig::from_toml("[connections.db]\nsnapshot = \"/nonexistent/db.json\"\n").unwrap();

        let err = generate(&generate_args(&["--tables", "users", "--name", "bad-name"]), &config)
            .unwrap_err();
        assert!(err.to_string().contains("underscore characters only"));

        let err = generate(&generate_args(&["--tables", " , ", "--name", "m1"]), &config)
            .unwrap_err();
        assert!(err.to_string().contains("At least one table name is required."));
    }
}
