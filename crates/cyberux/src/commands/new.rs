//! Scaffold a new component folder.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cyberux_build::Component;

use crate::config::load_config;

/// Run the new command.
pub fn run(config_path: &Path, name: &str, force: bool) -> Result<()> {
    let root = env::current_dir().context("Failed to resolve current directory")?;
    let config = load_config(config_path)?.to_build_config(&root);

    let written = scaffold(&config.components_dir, name, force)?;
    for path in &written {
        tracing::info!("Created {}", path.display());
    }

    let dir = config.components_dir.join(name);
    let Some(component) = Component::from_dir(&dir) else {
        anyhow::bail!("Invalid component directory: {}", dir.display());
    };
    let placeholder = component.placeholder();

    let in_template = fs::read_to_string(&config.template)
        .map(|template| template.contains(&placeholder))
        .unwrap_or(false);

    if in_template {
        tracing::info!("{} already contains {}", config.template.display(), placeholder);
    } else {
        tracing::info!(
            "Add {} to {} where the component should appear.",
            placeholder,
            config.template.display()
        );
    }

    Ok(())
}

/// Create `name.html`, `name.css` and `name.js` inside `components_dir/name/`.
///
/// Existing files are left alone unless `force` is set. Returns the files written.
pub fn scaffold(components_dir: &Path, name: &str, force: bool) -> Result<Vec<PathBuf>> {
    validate_name(name)?;

    let dir = components_dir.join(name);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let stem = name.to_lowercase();
    let files = [
        (format!("{}.html", stem), starter_html(&stem, name)),
        (format!("{}.css", stem), starter_css(&stem)),
        (format!("{}.js", stem), starter_js(&stem, name)),
    ];

    let mut written = Vec::new();
    for (file, content) in files {
        let path = dir.join(file);
        if path.exists() && !force {
            tracing::warn!("{} already exists. Use --force to overwrite.", path.display());
            continue;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }

    Ok(written)
}

/// Component names become directory names and placeholder markers.
fn validate_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && !name.starts_with(['.', '-', '_'])
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if !valid {
        anyhow::bail!(
            "Invalid component name '{}': use letters, digits, '-' or '_'",
            name
        );
    }

    Ok(())
}

/// `award-categories` -> `initAwardCategories`
fn init_function(name: &str) -> String {
    let words: String = name
        .split(['-', '_'])
        .map(capitalize)
        .collect();
    format!("init{}", words)
}

/// Capitalize first letter of a string.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn starter_html(stem: &str, name: &str) -> String {
    format!(
        "<section class=\"{stem}\" id=\"{stem}\">\n  <h2>{name}</h2>\n</section>\n"
    )
}

fn starter_css(stem: &str) -> String {
    format!(".{stem} {{\n  padding: var(--space-lg, 4rem) 0;\n}}\n")
}

fn starter_js(stem: &str, name: &str) -> String {
    format!(
        "function {init}() {{\n  const root = document.querySelector('.{stem}');\n  if (!root) return;\n}}\n",
        init = init_function(name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn scaffolds_all_three_artifacts() {
        let temp = tempdir().unwrap();

        let written = scaffold(temp.path(), "Jury", false).unwrap();

        assert_eq!(written.len(), 3);
        let component = Component::from_dir(&temp.path().join("Jury")).unwrap();
        assert!(component.html.is_some());
        assert!(component.css.is_some());
        assert!(component.js.is_some());
        assert_eq!(component.placeholder(), "<!-- JURY -->");

        let js = fs::read_to_string(temp.path().join("Jury/jury.js")).unwrap();
        assert!(js.starts_with("function initJury() {"));
    }

    #[test]
    fn keeps_existing_files_without_force() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("Hero");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("hero.html"), "<h1>Custom</h1>").unwrap();

        let written = scaffold(temp.path(), "Hero", false).unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(fs::read_to_string(dir.join("hero.html")).unwrap(), "<h1>Custom</h1>");

        scaffold(temp.path(), "Hero", true).unwrap();
        assert!(fs::read_to_string(dir.join("hero.html")).unwrap().contains("<h2>Hero</h2>"));
    }

    #[test]
    fn rejects_path_like_names() {
        let temp = tempdir().unwrap();

        assert!(scaffold(temp.path(), "../Escape", false).is_err());
        assert!(scaffold(temp.path(), ".hidden", false).is_err());
        assert!(scaffold(temp.path(), "", false).is_err());
    }

    #[test]
    fn init_function_is_camel_cased() {
        assert_eq!(init_function("award-categories"), "initAwardCategories");
        assert_eq!(init_function("FAQ"), "initFAQ");
    }
}
