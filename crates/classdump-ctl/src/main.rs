//! classdump command-line interface
//!
//! Loads a YAML definition document, applies `.classdump.toml` settings and
//! writes the generated PHP classes.

mod cli_config;
mod commands;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "classdump-ctl", version, about = "Generate PHP classes from type definitions")]
#[command(styles = output::clap_styles())]
pub(crate) struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence when set)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Generate PHP files for every definition in a document
    Generate {
        /// YAML definition document
        definitions: PathBuf,

        /// Base directory for generated files (default: current directory)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Print all definitions as a single unit to stdout instead of writing files
        #[arg(long, conflicts_with = "dry_run")]
        stdout: bool,

        /// List the files that would be written without writing them
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate a definition document without generating anything
    Check {
        /// YAML definition document
        definitions: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            definitions,
            out_dir,
            stdout,
            dry_run,
        } => commands::handle_generate_command(&definitions, out_dir, stdout, dry_run),
        Commands::Check { definitions } => commands::handle_check_command(&definitions),
    };

    if let Err(e) = result {
        output::error(format!("{e:#}"));
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    // RUST_LOG, when set, replaces the verbosity default entirely.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn default_directive(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("warn,classdump_ctl={level},classdump_core={level}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_directive() {
        assert_eq!(
            default_directive(false),
            "warn,classdump_ctl=info,classdump_core=info"
        );
        assert_eq!(
            default_directive(true),
            "warn,classdump_ctl=debug,classdump_core=debug"
        );
        assert!(EnvFilter::try_new(default_directive(true)).is_ok());
    }
}
