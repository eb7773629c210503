//! Command-line interface for deploy-config
//!
//! Provides `show`, `profile`, `validate` and `completions` subcommands.

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::ConfigLoader;
use crate::domain::Configuration;

mod profile;
mod show;
mod validate;

/// Inspect network deployment profiles and compiler optimizer settings
#[derive(Parser)]
#[command(name = "deploy-config")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    source: SourceArgs,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
pub struct SourceArgs {
    /// Directory searched for deploy-config.{toml,yaml,yml,json}
    #[arg(long, value_name = "DIR", default_value = ".", global = true)]
    pub root: PathBuf,

    /// Config file to load instead of discovery
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,
}

impl SourceArgs {
    pub fn load(&self) -> Result<Configuration> {
        let mut loader = ConfigLoader::new(&self.root);
        if let Some(path) = &self.config {
            loader = loader.explicit(path);
        }
        let source = loader.source();
        loader.load().with_context(|| format!("Failed to load configuration from {source}"))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the loaded configuration
    Show(show::ShowArgs),

    /// Print one network profile
    Profile(profile::ProfileArgs),

    /// Validate the configuration and print its fingerprint
    Validate,

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Show(args) => show::run(&cli.source, args),
        Commands::Profile(args) => profile::run(&cli.source, args),
        Commands::Validate => validate::run(&cli.source),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "deploy-config", &mut std::io::stdout());
            Ok(())
        }
    }
}
