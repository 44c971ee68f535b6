//! Configuration file (cyberux.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cyberux_build::BuildConfig;
use serde::Deserialize;

/// Configuration file structure. Every value is optional and falls back to the
/// built-in project layout.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub core: CoreConfig,
    #[serde(default)]
    pub urls: UrlsConfig,
    #[serde(default)]
    pub components: ComponentsConfig,
    #[serde(default)]
    pub build: BuildSettings,
}

#[derive(Debug, Deserialize, Default)]
pub struct PathsConfig {
    pub template: Option<PathBuf>,
    pub components: Option<PathBuf>,
    pub core_styles: Option<PathBuf>,
    pub core_scripts: Option<PathBuf>,
    pub core_assets: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
pub struct CoreConfig {
    /// Core stylesheets in cascade order
    pub styles: Option<Vec<String>>,
    /// Core scripts in load order
    pub scripts: Option<Vec<String>>,
    /// Asset subdirectories to copy
    pub assets: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UrlsConfig {
    pub source_assets: Option<String>,
    pub build_assets: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ComponentsConfig {
    /// Explicit component order
    pub order: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default)]
pub struct BuildSettings {
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub prune_stale_assets: bool,
}

impl ConfigFile {
    /// Overlay file values on the default build configuration, resolving
    /// relative paths against `root`.
    ///
    /// Moving the output directory also moves the build asset URL unless
    /// `[urls] build_assets` is set.
    pub fn to_build_config(&self, root: &Path) -> BuildConfig {
        let defaults = BuildConfig::default();
        let paths = &self.paths;

        let mut config = BuildConfig {
            template: paths.template.clone().unwrap_or(defaults.template),
            components_dir: paths.components.clone().unwrap_or(defaults.components_dir),
            core_styles_dir: paths.core_styles.clone().unwrap_or(defaults.core_styles_dir),
            core_scripts_dir: paths.core_scripts.clone().unwrap_or(defaults.core_scripts_dir),
            core_assets_dir: paths.core_assets.clone().unwrap_or(defaults.core_assets_dir),
            output_dir: defaults.output_dir,
            core_styles: self.core.styles.clone().unwrap_or(defaults.core_styles),
            core_scripts: self.core.scripts.clone().unwrap_or(defaults.core_scripts),
            asset_kinds: self.core.assets.clone().unwrap_or(defaults.asset_kinds),
            source_asset_url: self
                .urls
                .source_assets
                .clone()
                .unwrap_or(defaults.source_asset_url),
            build_asset_url: defaults.build_asset_url,
            component_order: self.components.order.clone(),
            strict: self.build.strict,
            prune_stale_assets: self.build.prune_stale_assets,
        }
        .resolve_against(root);

        if let Some(output) = &paths.output {
            self.set_output(&mut config, output, root);
        }
        if let Some(url) = &self.urls.build_assets {
            config.build_asset_url = url.clone();
        }

        config
    }

    /// Point the build at `output`, keeping an explicit `[urls] build_assets`.
    pub fn set_output(&self, config: &mut BuildConfig, output: &Path, root: &Path) {
        if self.urls.build_assets.is_some() {
            config.output_dir = root.join(output);
        } else {
            config.relocate_output(output, root);
        }
    }
}

/// Load configuration if the file exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::info!("Loaded config from {}", path.display());

    Ok(config)
}
