use crate::adapters::workspace::BootstrapDir;
use crate::utils::error::{Result, ScaffoldError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Moves the project out of the bootstrap directory to `destination`, then
/// removes the download and extraction leftovers. A failed cleanup is only
/// logged; the project has already been moved by then.
pub fn finalize(workspace: &BootstrapDir, destination: &Path) -> Result<PathBuf> {
    let project_dir = relocate(&workspace.extraction_root(), destination)?;

    if let Err(e) = workspace.cleanup() {
        tracing::warn!(
            "Could not clean up {}: {}",
            workspace.root().display(),
            e
        );
    }

    Ok(project_dir)
}

/// Moves the single top-level entry of `extraction_root` to `destination`.
pub fn relocate(extraction_root: &Path, destination: &Path) -> Result<PathBuf> {
    let entries = fs::read_dir(extraction_root)?.collect::<io::Result<Vec<_>>>()?;
    if entries.len() != 1 {
        return Err(ScaffoldError::AmbiguousArchiveLayout {
            root: extraction_root.to_path_buf(),
            found: entries.len(),
        });
    }
    let source = entries[0].path();

    if destination.exists() {
        return Err(ScaffoldError::Io(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists", destination.display()),
        )));
    }
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }

    tracing::debug!("Moving {} -> {}", source.display(), destination.display());
    if let Err(e) = fs::rename(&source, destination) {
        // Typically the bootstrap directory lives on another filesystem.
        tracing::debug!("Rename failed ({}), copying instead", e);
        copy_tree(&source, destination)?;
        if source.is_dir() {
            fs::remove_dir_all(&source)?;
        } else {
            fs::remove_file(&source)?;
        }
    }

    Ok(destination.to_path_buf())
}

fn copy_tree(source: &Path, destination: &Path) -> Result<()> {
    for entry in WalkDir::new(source).follow_links(false) {
        let entry = entry.map_err(io::Error::from)?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| io::Error::other(e.to_string()))?;
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
