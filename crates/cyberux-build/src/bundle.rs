//! CSS and JS stages: ordered concatenation of core files and component files.

use std::path::{Path, PathBuf};

use crate::builder::BuildError;
use crate::component::Component;
use crate::config::BuildConfig;
use crate::files::{read_optional, write_output};

/// Which bundle is being assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleKind {
    Css,
    Js,
}

impl BundleKind {
    /// Comment line placed before a component's contents.
    pub fn banner(self, component: &str) -> String {
        match self {
            BundleKind::Css => format!("/* {} */\n", component),
            BundleKind::Js => format!("// {}\n", component),
        }
    }

    fn component_file(self, component: &Component) -> Option<&PathBuf> {
        match self {
            BundleKind::Css => component.css.as_ref(),
            BundleKind::Js => component.js.as_ref(),
        }
    }

    fn label(self) -> &'static str {
        match self {
            BundleKind::Css => "stylesheet",
            BundleKind::Js => "script",
        }
    }
}

/// A concatenated bundle and the files that went into it.
#[derive(Debug, Clone, Default)]
pub struct Bundle {
    pub text: String,
    pub sources: Vec<PathBuf>,
}

/// Concatenate core files (in list order) followed by component files (in component order).
///
/// Absent files are skipped.
pub fn concat_bundle(
    kind: BundleKind,
    core_dir: &Path,
    core_files: &[String],
    components: &[Component],
) -> Result<Bundle, BuildError> {
    let mut bundle = Bundle::default();

    for file in core_files {
        let path = core_dir.join(file);
        match read_optional(&path)? {
            Some(content) => {
                bundle.text.push_str(&content);
                bundle.text.push('\n');
                bundle.sources.push(path);
            }
            None => tracing::debug!("Core {} not found: {}", kind.label(), path.display()),
        }
    }

    for component in components {
        let Some(path) = kind.component_file(component) else {
            continue;
        };

        if let Some(content) = read_optional(path)? {
            bundle.text.push_str(&kind.banner(&component.name));
            bundle.text.push_str(&content);
            bundle.text.push('\n');
            bundle.sources.push(path.clone());
        }
    }

    Ok(bundle)
}

/// Build `styles.css`.
pub fn build_css(config: &BuildConfig, components: &[Component]) -> Result<Bundle, BuildError> {
    let bundle = concat_bundle(
        BundleKind::Css,
        &config.core_styles_dir,
        &config.core_styles,
        components,
    )?;

    let output = config.css_output();
    write_output(&output, &bundle.text)?;
    tracing::info!("Wrote {} ({} files)", output.display(), bundle.sources.len());

    Ok(bundle)
}

/// Build `scripts.js`.
pub fn build_js(config: &BuildConfig, components: &[Component]) -> Result<Bundle, BuildError> {
    let bundle = concat_bundle(
        BundleKind::Js,
        &config.core_scripts_dir,
        &config.core_scripts,
        components,
    )?;

    let output = config.js_output();
    write_output(&output, &bundle.text)?;
    tracing::info!("Wrote {} ({} files)", output.display(), bundle.sources.len());

    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    use crate::component::discover_components;

    #[test]
    fn core_files_come_first_in_list_order() {
        let temp = tempdir().unwrap();
        let core = temp.path().join("core");
        let components = temp.path().join("components");
        fs::create_dir_all(&core).unwrap();
        fs::create_dir_all(components.join("Hero")).unwrap();
        fs::write(core.join("reset.css"), "* { margin: 0; }").unwrap();
        fs::write(core.join("layout.css"), ".grid { display: grid; }").unwrap();
        fs::write(components.join("Hero").join("hero.css"), ".hero { color: red; }").unwrap();

        let found = discover_components(&components, None).unwrap().components;
        let core_files = vec![
            "reset.css".to_string(),
            "variables.css".to_string(),
            "layout.css".to_string(),
        ];
        let bundle = concat_bundle(BundleKind::Css, &core, &core_files, &found).unwrap();

        assert_eq!(
            bundle.text,
            "* { margin: 0; }\n.grid { display: grid; }\n/* Hero */\n.hero { color: red; }\n"
        );
        assert_eq!(bundle.sources.len(), 3);
    }

    #[test]
    fn scripts_use_line_comment_banners() {
        let temp = tempdir().unwrap();
        let core = temp.path().join("core");
        let components = temp.path().join("components");
        fs::create_dir_all(&core).unwrap();
        fs::create_dir_all(components.join("Modal")).unwrap();
        fs::create_dir_all(components.join("Menu")).unwrap();
        fs::write(core.join("utils.js"), "function $(s) {}").unwrap();
        fs::write(core.join("main.js"), "initAll();").unwrap();
        fs::write(components.join("Modal").join("modal.js"), "function initModal() {}").unwrap();
        fs::write(components.join("Menu").join("menu.js"), "function initMenu() {}").unwrap();

        let found = discover_components(&components, None).unwrap().components;
        let core_files = vec!["utils.js".to_string(), "main.js".to_string()];
        let bundle = concat_bundle(BundleKind::Js, &core, &core_files, &found).unwrap();

        assert_eq!(
            bundle.text,
            "function $(s) {}\ninitAll();\n// Menu\nfunction initMenu() {}\n// Modal\nfunction initModal() {}\n"
        );
    }

    #[test]
    fn empty_inputs_give_empty_bundle() {
        let temp = tempdir().unwrap();

        let bundle = concat_bundle(
            BundleKind::Css,
            temp.path(),
            &["reset.css".to_string()],
            &[],
        )
        .unwrap();

        assert!(bundle.text.is_empty());
        assert!(bundle.sources.is_empty());
    }
}
