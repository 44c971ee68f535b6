//! Site builder: runs the assembly stages in order.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;

use crate::assets::{copy_assets, AssetReport};
use crate::bundle::{build_css, build_js};
use crate::component::{discover_components, Component};
use crate::config::BuildConfig;
use crate::files::{read_required, write_output};
use crate::html::{build_html, HtmlReport};
use crate::substitute::{LiteralSubstituter, RewriteRules, Substituter};

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Template not found: {0}")]
    TemplateNotFound(PathBuf),

    #[error("Failed to read {path}: {message}")]
    ReadError { path: PathBuf, message: String },

    #[error("Failed to write {path}: {message}")]
    WriteError { path: PathBuf, message: String },

    #[error("Strict mode: {0}")]
    Strict(String),
}

impl BuildError {
    pub(crate) fn read(path: &Path, err: io::Error) -> Self {
        BuildError::ReadError {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    pub(crate) fn write(path: &Path, err: io::Error) -> Self {
        BuildError::WriteError {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

/// Result of a build operation.
#[derive(Debug, Clone, Serialize)]
pub struct BuildResult {
    /// Components in the order they were assembled
    pub components: Vec<String>,

    /// HTML placement details
    pub html: HtmlReport,

    /// Files concatenated into `styles.css`
    pub css_sources: Vec<PathBuf>,

    /// Files concatenated into `scripts.js`
    pub js_sources: Vec<PathBuf>,

    /// Asset copy details
    pub assets: AssetReport,

    /// Manifest entries with no component directory
    pub missing_components: Vec<String>,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Assembles the site described by a [`BuildConfig`].
pub struct SiteBuilder {
    config: BuildConfig,
    substituter: Box<dyn Substituter>,
}

impl SiteBuilder {
    /// Create a builder using literal substring substitution.
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            substituter: Box::new(LiteralSubstituter),
        }
    }

    /// Replace the substitution strategy.
    pub fn with_substituter(mut self, substituter: impl Substituter + 'static) -> Self {
        self.substituter = Box::new(substituter);
        self
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Run every stage: HTML, CSS, JS, assets, then asset path rewriting.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let (components, missing_components) = self.discover()?;

        let html = self.build_html(&components)?;
        let css = build_css(&self.config, &components)?;
        let js = build_js(&self.config, &components)?;
        let assets = copy_assets(&self.config)?;
        self.update_asset_paths()?;

        Ok(BuildResult {
            components: components.into_iter().map(|c| c.name).collect(),
            html,
            css_sources: css.sources,
            js_sources: js.sources,
            assets,
            missing_components,
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Discover components, honoring the configured manifest.
    pub fn discover(&self) -> Result<(Vec<Component>, Vec<String>), BuildError> {
        let discovery = discover_components(
            &self.config.components_dir,
            self.config.component_order.as_deref(),
        )?;

        for name in &discovery.missing {
            tracing::warn!("Component {} is listed in the order but has no directory", name);
        }
        for name in &discovery.unlisted {
            tracing::debug!("Component {} is not listed in the order, appending", name);
        }

        if self.config.strict && !discovery.missing.is_empty() {
            return Err(BuildError::Strict(format!(
                "unknown component(s) in order: {}",
                discovery.missing.join(", ")
            )));
        }

        tracing::info!(
            "Found {} components in {}",
            discovery.components.len(),
            self.config.components_dir.display()
        );

        Ok((discovery.components, discovery.missing))
    }

    /// Write `index.html`.
    pub fn build_html(&self, components: &[Component]) -> Result<HtmlReport, BuildError> {
        build_html(&self.config, components, self.substituter.as_ref())
    }

    /// Point asset URLs in the merged page and stylesheet at the copied assets.
    pub fn update_asset_paths(&self) -> Result<(), BuildError> {
        let rules =
            RewriteRules::for_prefixes(&self.config.source_asset_url, &self.config.build_asset_url);

        for (path, stage_rules) in [
            (self.config.html_output(), &rules.html),
            (self.config.css_output(), &rules.css),
        ] {
            let original = read_required(&path)?;
            let rewritten = self.substituter.rewrite_asset_paths(&original, stage_rules);

            if rewritten != original {
                write_output(&path, &rewritten)?;
                tracing::debug!("Rewrote asset paths in {}", path.display());
            }
        }

        Ok(())
    }
}
