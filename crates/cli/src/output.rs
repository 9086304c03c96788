//! Terminal output

use colored::Colorize;
use schemagen_codegen::{GeneratedMigration, summarize};
use std::path::PathBuf;

/// Print the run summary, warnings and written paths
pub fn print_generation(migration: &GeneratedMigration, written: &[PathBuf]) {
    print!("{}", summarize(migration));

    for warning in &migration.warnings {
        println!("{} {warning}", "warning:".yellow().bold());
    }

    for path in written {
        println!("  {} {}", "created".green(), path.display());
    }
}

/// Print every generated file instead of writing it
pub fn print_dry_run(migration: &GeneratedMigration) {
    for warning in &migration.warnings {
        eprintln!("{} {warning}", "warning:".yellow().bold());
    }

    for file in &migration.files {
        println!("{}", format!("// {}", file.path.display()).dimmed());
        print!("{}", file.content);
    }
}
