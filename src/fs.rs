use crate::error::{IoResultExt, Result};
use crate::slug;
use log::debug;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// Vault folders that never hold notes.
pub const ALWAYS_IGNORED: [&str; 2] = [".git", ".obsidian"];

/// Copies the vault into a temporary directory, leaving out ignored names.
///
/// The returned [`TempDir`] deletes the staged copy when dropped, so it is
/// cleaned up whether the build succeeds or fails.
pub fn stage_vault(vault_path: &Path, ignore: &[String]) -> Result<TempDir> {
    let staging = tempfile::Builder::new()
        .prefix("obs2hexo-")
        .tempdir()
        .at(std::env::temp_dir())?;
    debug!("Staging {} in {}", vault_path.display(), staging.path().display());

    copy_dir_filtered(vault_path, staging.path(), |name| {
        ALWAYS_IGNORED.iter().any(|i| name == OsStr::new(i))
            || ignore.iter().any(|i| name == OsStr::new(i))
    })?;
    Ok(staging)
}

/// Deletes the staged copy, reporting failures against the staging path.
pub fn remove_staging(staging: TempDir) -> Result<()> {
    let path = staging.path().to_path_buf();
    staging.close().at(&path)
}

/// Recursively copies `src` into `dst`, skipping any entry whose name matches `exclude`.
pub fn copy_dir_filtered<F>(src: &Path, dst: &Path, exclude: F) -> Result<usize>
where
    F: Fn(&OsStr) -> bool,
{
    let mut copied = 0;
    let walker = WalkDir::new(src)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !exclude(e.file_name()));

    for entry in walker {
        let entry = entry?;
        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).at(&target)?;
        } else {
            copy_file(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

pub fn copy_file(path: &Path, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent).at(parent)?;
    }
    fs::copy(path, output_path).at(path)?;
    Ok(())
}

/// Copies `path` over `output_path`, removing whatever was there first.
pub fn replace_file(path: &Path, output_path: &Path) -> Result<()> {
    if output_path.exists() {
        fs::remove_file(output_path).at(output_path)?;
    }
    copy_file(path, output_path)
}

/// Copies a note's asset folder to the post's asset folder.
///
/// Every path segment below `output_dir` is slug-normalized, so a copied file
/// sits exactly where a rewritten `assets/` link points. An existing folder at
/// `output_dir` is removed first. Returns the number of files copied.
pub fn copy_asset_bundle(asset_dir: &Path, output_dir: &Path) -> Result<usize> {
    if output_dir.exists() {
        fs::remove_dir_all(output_dir).at(output_dir)?;
    }

    let mut copied = 0;
    for entry in WalkDir::new(asset_dir) {
        let entry = entry?;
        let relative = entry.path().strip_prefix(asset_dir).unwrap_or(entry.path());
        let target = asset_target(output_dir, relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).at(&target)?;
            continue;
        }

        debug!("Copying asset: {} -> {}", entry.path().display(), target.display());
        copy_file(entry.path(), &target)?;
        copied += 1;
    }
    Ok(copied)
}

fn asset_target(output_dir: &Path, relative: &Path) -> PathBuf {
    relative.components().fold(output_dir.to_path_buf(), |target, component| {
        target.join(slug::normalize(&component.as_os_str().to_string_lossy()))
    })
}

/// All `.md` files under `root`, in a stable order.
pub fn markdown_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().and_then(|s| s.to_str()) == Some("md") {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}
