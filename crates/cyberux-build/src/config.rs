//! Build configuration.

use std::path::{Component, Path, PathBuf};

/// Core stylesheets, in cascade order.
pub const DEFAULT_CORE_STYLES: [&str; 5] = [
    "reset.css",
    "variables.css",
    "typography.css",
    "layout.css",
    "utilities.css",
];

/// Core scripts. Helpers load before `main.js`, which calls component initializers.
pub const DEFAULT_CORE_SCRIPTS: [&str; 2] = ["utils.js", "main.js"];

/// Asset directories copied from the core assets root.
pub const DEFAULT_ASSET_KINDS: [&str; 2] = ["images", "fonts"];

/// Configuration for assembling the site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Page template containing `<!-- NAME -->` placeholders
    pub template: PathBuf,

    /// Directory holding one subdirectory per component
    pub components_dir: PathBuf,

    /// Directory holding the core stylesheets
    pub core_styles_dir: PathBuf,

    /// Directory holding the core scripts
    pub core_scripts_dir: PathBuf,

    /// Directory holding `images/`, `fonts/`, ...
    pub core_assets_dir: PathBuf,

    /// Build output directory
    pub output_dir: PathBuf,

    /// Core stylesheet filenames, concatenated in this order
    pub core_styles: Vec<String>,

    /// Core script filenames, concatenated in this order
    pub core_scripts: Vec<String>,

    /// Asset subdirectories to copy
    pub asset_kinds: Vec<String>,

    /// URL prefix the template and stylesheets use for source assets
    pub source_asset_url: String,

    /// URL prefix the copied assets are served under
    pub build_asset_url: String,

    /// Explicit component order. When unset, components are sorted by name.
    pub component_order: Option<Vec<String>>,

    /// Fail on orphaned components, unmatched placeholders and unknown manifest entries
    pub strict: bool,

    /// Delete copied assets that no longer exist in the source
    pub prune_stale_assets: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            template: PathBuf::from("index-template.html"),
            components_dir: PathBuf::from("components"),
            core_styles_dir: PathBuf::from("core/styles"),
            core_scripts_dir: PathBuf::from("core/scripts"),
            core_assets_dir: PathBuf::from("core/assets"),
            output_dir: PathBuf::from("build"),
            core_styles: DEFAULT_CORE_STYLES.iter().map(|s| s.to_string()).collect(),
            core_scripts: DEFAULT_CORE_SCRIPTS.iter().map(|s| s.to_string()).collect(),
            asset_kinds: DEFAULT_ASSET_KINDS.iter().map(|s| s.to_string()).collect(),
            source_asset_url: "core/assets".to_string(),
            build_asset_url: "build/assets".to_string(),
            component_order: None,
            strict: false,
            prune_stale_assets: false,
        }
    }
}

impl BuildConfig {
    /// Create a configuration with every path resolved against `root`.
    pub fn rooted_at(root: impl AsRef<Path>) -> Self {
        Self::default().resolve_against(root.as_ref())
    }

    /// Resolve relative paths against the project root. Absolute paths are kept.
    pub fn resolve_against(self, root: &Path) -> Self {
        Self {
            template: root.join(&self.template),
            components_dir: root.join(&self.components_dir),
            core_styles_dir: root.join(&self.core_styles_dir),
            core_scripts_dir: root.join(&self.core_scripts_dir),
            core_assets_dir: root.join(&self.core_assets_dir),
            output_dir: root.join(&self.output_dir),
            ..self
        }
    }

    /// Move the build to `output` and serve copied assets from `<output>/assets`.
    ///
    /// The asset URL is the output path relative to `root`. An output outside the
    /// project keeps the current URL and logs a warning.
    pub fn relocate_output(&mut self, output: impl AsRef<Path>, root: &Path) {
        self.output_dir = root.join(output);

        match self.output_dir.strip_prefix(root) {
            Ok(relative) => {
                let prefix = url_path(relative);
                self.build_asset_url = if prefix.is_empty() {
                    "assets".to_string()
                } else {
                    format!("{}/assets", prefix)
                };
            }
            Err(_) => tracing::warn!(
                "Output {} is outside {}, asset URLs stay at {}",
                self.output_dir.display(),
                root.display(),
                self.build_asset_url
            ),
        }
    }

    /// Path of the merged page.
    pub fn html_output(&self) -> PathBuf {
        self.output_dir.join("index.html")
    }

    /// Path of the merged stylesheet.
    pub fn css_output(&self) -> PathBuf {
        self.output_dir.join("styles.css")
    }

    /// Path of the merged script.
    pub fn js_output(&self) -> PathBuf {
        self.output_dir.join("scripts.js")
    }

    /// Root of the copied asset tree.
    pub fn assets_output(&self) -> PathBuf {
        self.output_dir.join("assets")
    }
}

/// Relative filesystem path as a URL path: `./build/index.html` -> `build/index.html`.
pub fn url_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
