//! Component discovery.
//!
//! A component is a directory `Name` under the components root that may contain
//! `name.html`, `name.css` and `name.js` (lowercased directory name). Its HTML is
//! inserted into the template at `<!-- NAME -->` (uppercased directory name).

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::builder::BuildError;

/// A component folder and the artifacts it provides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// Directory name, as found on disk
    pub name: String,

    /// Component directory
    pub dir: PathBuf,

    /// `name.html`, if present
    pub html: Option<PathBuf>,

    /// `name.css`, if present
    pub css: Option<PathBuf>,

    /// `name.js`, if present
    pub js: Option<PathBuf>,
}

impl Component {
    /// Inspect a component directory.
    pub fn from_dir(dir: &Path) -> Option<Self> {
        let name = dir.file_name()?.to_str()?.to_string();
        let stem = name.to_lowercase();

        let artifact = |ext: &str| {
            let path = dir.join(format!("{}.{}", stem, ext));
            path.is_file().then_some(path)
        };

        Some(Self {
            html: artifact("html"),
            css: artifact("css"),
            js: artifact("js"),
            name,
            dir: dir.to_path_buf(),
        })
    }

    /// Marker name used in the template.
    pub fn placeholder_name(&self) -> String {
        self.name.to_uppercase()
    }

    /// Full placeholder text, e.g. `<!-- HEADER -->`.
    pub fn placeholder(&self) -> String {
        placeholder(&self.placeholder_name())
    }
}

/// Template marker for a placeholder name: `HEADER` -> `<!-- HEADER -->`.
pub fn placeholder(name: &str) -> String {
    format!("<!-- {} -->", name)
}

/// Result of scanning the components root.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    /// Components in concatenation order
    pub components: Vec<Component>,

    /// Manifest entries with no directory on disk
    pub missing: Vec<String>,

    /// Directories not named in the manifest (appended after listed ones)
    pub unlisted: Vec<String>,
}

/// Discover components under `root`.
///
/// Without a manifest, components are sorted by directory name. With one, listed
/// components come first in manifest order and the rest follow sorted by name.
/// A missing root yields no components.
pub fn discover_components(root: &Path, order: Option<&[String]>) -> Result<Discovery, BuildError> {
    if !root.is_dir() {
        tracing::debug!("Components directory not found: {}", root.display());
        return Ok(Discovery::default());
    }

    let mut found = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| BuildError::ReadError {
            path: root.to_path_buf(),
            message: e.to_string(),
        })?;

        if !entry.file_type().is_dir() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            tracing::warn!("Skipping component with non UTF-8 name: {}", entry.path().display());
            continue;
        };

        if name.starts_with('.') {
            continue;
        }

        if let Some(component) = Component::from_dir(entry.path()) {
            tracing::debug!(
                "Found component {} (html: {}, css: {}, js: {})",
                component.name,
                component.html.is_some(),
                component.css.is_some(),
                component.js.is_some()
            );
            found.push(component);
        }
    }

    Ok(match order {
        Some(manifest) => apply_manifest(found, manifest),
        None => Discovery {
            components: found,
            ..Default::default()
        },
    })
}

/// Reorder sorted components according to an explicit manifest.
fn apply_manifest(mut found: Vec<Component>, manifest: &[String]) -> Discovery {
    let mut components = Vec::with_capacity(found.len());
    let mut missing = Vec::new();

    for name in manifest {
        match found.iter().position(|c| &c.name == name) {
            Some(index) => components.push(found.remove(index)),
            None => missing.push(name.clone()),
        }
    }

    let unlisted = found.iter().map(|c| c.name.clone()).collect();
    components.extend(found);

    Discovery {
        components,
        missing,
        unlisted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn make_component(root: &Path, name: &str, files: &[&str]) {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        for file in files {
            fs::write(dir.join(file), format!("/* {} */", file)).unwrap();
        }
    }

    fn names(discovery: &Discovery) -> Vec<&str> {
        discovery.components.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn finds_artifacts_by_lowercase_name() {
        let temp = tempdir().unwrap();
        make_component(temp.path(), "About", &["about.html", "about.css"]);

        let discovery = discover_components(temp.path(), None).unwrap();
        let about = &discovery.components[0];

        assert_eq!(about.name, "About");
        assert_eq!(about.placeholder(), "<!-- ABOUT -->");
        assert!(about.html.is_some());
        assert!(about.css.is_some());
        assert!(about.js.is_none());
    }

    #[test]
    fn ignores_wrongly_cased_artifacts() {
        let temp = tempdir().unwrap();
        make_component(temp.path(), "Hero", &["Hero.html"]);

        let discovery = discover_components(temp.path(), None).unwrap();

        assert!(discovery.components[0].html.is_none());
    }

    #[test]
    fn sorts_components_by_name() {
        let temp = tempdir().unwrap();
        make_component(temp.path(), "Nav", &[]);
        make_component(temp.path(), "Footer", &[]);
        make_component(temp.path(), "Hero", &[]);

        let discovery = discover_components(temp.path(), None).unwrap();

        assert_eq!(names(&discovery), vec!["Footer", "Hero", "Nav"]);
    }

    #[test]
    fn skips_files_and_hidden_directories() {
        let temp = tempdir().unwrap();
        make_component(temp.path(), "Hero", &[]);
        make_component(temp.path(), ".cache", &[]);
        fs::write(temp.path().join("README.md"), "notes").unwrap();

        let discovery = discover_components(temp.path(), None).unwrap();

        assert_eq!(names(&discovery), vec!["Hero"]);
    }

    #[test]
    fn missing_root_yields_nothing() {
        let temp = tempdir().unwrap();

        let discovery = discover_components(&temp.path().join("components"), None).unwrap();

        assert!(discovery.components.is_empty());
    }

    #[test]
    fn manifest_controls_order() {
        let temp = tempdir().unwrap();
        for name in ["Footer", "Header", "Hero", "Awards"] {
            make_component(temp.path(), name, &[]);
        }

        let manifest = vec![
            "Header".to_string(),
            "Hero".to_string(),
            "Sponsors".to_string(),
            "Footer".to_string(),
        ];
        let discovery = discover_components(temp.path(), Some(&manifest)).unwrap();

        assert_eq!(names(&discovery), vec!["Header", "Hero", "Footer", "Awards"]);
        assert_eq!(discovery.missing, vec!["Sponsors"]);
        assert_eq!(discovery.unlisted, vec!["Awards"]);
    }
}
