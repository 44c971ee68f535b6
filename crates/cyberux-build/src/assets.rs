//! Asset stage: flat copy of `images/` and `fonts/` into the build directory.

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::builder::BuildError;
use crate::config::BuildConfig;

/// Outcome of copying assets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssetReport {
    /// Destination paths written
    pub copied: Vec<PathBuf>,

    /// Destination files with no source counterpart
    pub stale: Vec<PathBuf>,

    /// Stale files deleted
    pub pruned: Vec<PathBuf>,
}

/// Regular files directly inside `dir`, sorted by name.
fn list_files(dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| BuildError::ReadError {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;

        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Copy every file of one asset kind. Subdirectories are not descended into.
fn copy_kind(source: &Path, dest: &Path, prune: bool, report: &mut AssetReport) -> Result<(), BuildError> {
    if !source.is_dir() {
        tracing::debug!("Asset directory not found: {}", source.display());
        return Ok(());
    }

    fs::create_dir_all(dest).map_err(|e| BuildError::write(dest, e))?;

    let sources = list_files(source)?;
    let mut names: HashSet<OsString> = HashSet::with_capacity(sources.len());

    for path in &sources {
        let Some(name) = path.file_name() else {
            continue;
        };

        let target = dest.join(name);
        fs::copy(path, &target).map_err(|e| BuildError::write(&target, e))?;
        tracing::debug!("Copied {} -> {}", path.display(), target.display());

        names.insert(name.to_os_string());
        report.copied.push(target);
    }

    for existing in list_files(dest)? {
        let known = existing
            .file_name()
            .is_some_and(|name| names.contains(name));
        if known {
            continue;
        }

        if prune {
            fs::remove_file(&existing).map_err(|e| BuildError::write(&existing, e))?;
            tracing::info!("Removed stale asset {}", existing.display());
            report.pruned.push(existing.clone());
        } else {
            tracing::debug!("Stale asset kept: {}", existing.display());
        }
        report.stale.push(existing);
    }

    Ok(())
}

/// Copy configured asset kinds into `<output>/assets/<kind>/`.
pub fn copy_assets(config: &BuildConfig) -> Result<AssetReport, BuildError> {
    let mut report = AssetReport::default();
    let assets_root = config.assets_output();

    for kind in &config.asset_kinds {
        copy_kind(
            &config.core_assets_dir.join(kind),
            &assets_root.join(kind),
            config.prune_stale_assets,
            &mut report,
        )?;
    }

    if !report.stale.is_empty() && !config.prune_stale_assets {
        let log = format!(
            "{} stale asset(s) left in {}",
            report.stale.len(),
            assets_root.display()
        );
        if config.strict {
            tracing::warn!("{}", log);
        } else {
            tracing::debug!("{}", log);
        }
    }

    tracing::info!("Copied {} assets", report.copied.len());

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn setup() -> (tempfile::TempDir, BuildConfig) {
        let temp = tempdir().unwrap();
        let config = BuildConfig::rooted_at(temp.path());
        fs::create_dir_all(config.core_assets_dir.join("images")).unwrap();
        (temp, config)
    }

    #[test]
    fn copies_files_byte_for_byte() {
        let (_temp, config) = setup();
        let bytes: Vec<u8> = vec![0x89, b'P', b'N', b'G', 0x00, 0xff];
        fs::write(config.core_assets_dir.join("images/logo.png"), &bytes).unwrap();

        let report = copy_assets(&config).unwrap();

        let copied = config.assets_output().join("images/logo.png");
        assert_eq!(fs::read(&copied).unwrap(), bytes);
        assert_eq!(report.copied, vec![copied]);
    }

    #[test]
    fn does_not_recurse_into_subdirectories() {
        let (_temp, config) = setup();
        let nested = config.core_assets_dir.join("images/icons");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("star.svg"), "<svg/>").unwrap();
        fs::write(config.core_assets_dir.join("images/bg.jpg"), "jpg").unwrap();

        copy_assets(&config).unwrap();

        assert!(config.assets_output().join("images/bg.jpg").exists());
        assert!(!config.assets_output().join("images/icons").exists());
    }

    #[test]
    fn missing_kind_is_skipped() {
        let (_temp, config) = setup();

        let report = copy_assets(&config).unwrap();

        assert!(report.copied.is_empty());
        assert!(!config.assets_output().join("fonts").exists());
    }

    #[test]
    fn overwrites_existing_destination_files() {
        let (_temp, config) = setup();
        let source = config.core_assets_dir.join("images/hero.jpg");
        fs::write(&source, "old").unwrap();
        copy_assets(&config).unwrap();

        fs::write(&source, "new").unwrap();
        copy_assets(&config).unwrap();

        let copied = fs::read_to_string(config.assets_output().join("images/hero.jpg")).unwrap();
        assert_eq!(copied, "new");
    }

    #[test]
    fn keeps_stale_files_by_default() {
        let (_temp, config) = setup();
        let source = config.core_assets_dir.join("images/old.png");
        fs::write(&source, "png").unwrap();
        copy_assets(&config).unwrap();

        fs::remove_file(&source).unwrap();
        let report = copy_assets(&config).unwrap();

        let stale = config.assets_output().join("images/old.png");
        assert!(stale.exists());
        assert_eq!(report.stale, vec![stale]);
        assert!(report.pruned.is_empty());
    }

    #[test]
    fn prunes_stale_files_when_enabled() {
        let (_temp, mut config) = setup();
        let source = config.core_assets_dir.join("images/old.png");
        fs::write(&source, "png").unwrap();
        copy_assets(&config).unwrap();

        fs::remove_file(&source).unwrap();
        config.prune_stale_assets = true;
        let report = copy_assets(&config).unwrap();

        assert!(!config.assets_output().join("images/old.png").exists());
        assert_eq!(report.pruned.len(), 1);
    }
}
