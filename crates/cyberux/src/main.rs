//! cyberux CLI - assembles the CyberUXcellence Awards site.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "cyberux")]
#[command(about = "Assemble the CyberUXcellence Awards site from its component folders")]
#[command(version)]
pub struct Cli {
    /// Defaults to `build`
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to cyberux.toml config file
    #[arg(short, long, default_value = "cyberux.toml", global = true)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Build index.html, styles.css, scripts.js and copy assets
    Build {
        /// Output directory (defaults to config or "build")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail on orphaned components or placeholders
        #[arg(long)]
        strict: bool,

        /// Delete copied assets that were removed from the source
        #[arg(long)]
        prune_stale_assets: bool,

        /// Print the build report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Scaffold a new component folder
    New {
        /// Component directory name, e.g. "Jury"
        name: String,

        /// Overwrite existing component files
        #[arg(short, long)]
        force: bool,
    },

    /// Preview the built site
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// Project root to serve
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Do not open browser
        #[arg(long)]
        no_open: bool,
    },
}

/// Running `cyberux` with no subcommand builds with the configured output.
fn default_command() -> Commands {
    Commands::Build {
        output: None,
        strict: false,
        prune_stale_assets: false,
        json: false,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command.unwrap_or_else(default_command) {
        Commands::Build {
            output,
            strict,
            prune_stale_assets,
            json,
        } => {
            let args = commands::build::BuildArgs {
                output,
                strict,
                prune_stale_assets,
                json,
            };
            commands::build::run(&cli.config, args)?;
        }
        Commands::New { name, force } => {
            commands::new::run(&cli.config, &name, force)?;
        }
        Commands::Serve { port, dir, no_open } => {
            commands::serve::run(&cli.config, port, dir, !no_open).await?;
        }
    }

    Ok(())
}
