//! Site build command.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cyberux_build::SiteBuilder;

use crate::config::load_config;

/// Command-line overrides for a build.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BuildArgs {
    pub output: Option<PathBuf>,
    pub strict: bool,
    pub prune_stale_assets: bool,
    pub json: bool,
}

/// Run the build command from the current directory.
pub fn run(config_path: &Path, args: BuildArgs) -> Result<()> {
    let root = env::current_dir().context("Failed to resolve current directory")?;
    run_in(&root, config_path, args)
}

/// Run the build command with relative paths resolved against `root`.
pub fn run_in(root: &Path, config_path: &Path, args: BuildArgs) -> Result<()> {
    tracing::info!("Building site...");

    let file_config = load_config(&root.join(config_path))?;
    let mut config = file_config.to_build_config(root);

    if let Some(output) = &args.output {
        file_config.set_output(&mut config, output, root);
    }
    config.strict |= args.strict;
    config.prune_stale_assets |= args.prune_stale_assets;

    let result = SiteBuilder::new(config).build()?;

    tracing::info!(
        "Built {} components ({} inserted into the page) in {}ms",
        result.components.len(),
        result.html.inserted.len(),
        result.duration_ms
    );

    if !result.assets.stale.is_empty() && result.assets.pruned.is_empty() {
        tracing::info!(
            "{} stale asset(s) kept, use --prune-stale-assets to remove them",
            result.assets.stale.len()
        );
    }

    tracing::info!("Output: {}", result.output_dir.display());

    if args.json {
        let report =
            serde_json::to_string_pretty(&result).context("Failed to serialize build report")?;
        println!("{}", report);
    }

    Ok(())
}
