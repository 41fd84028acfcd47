use crate::utils::error::Result;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const ARCHIVE_FILE_NAME: &str = "download.zip";
pub const EXTRACTION_DIR_NAME: &str = "template";
pub const SETTINGS_FILE_NAME: &str = "config.toml";

/// Per-user scratch area holding the downloaded archive and its extraction.
#[derive(Debug, Clone)]
pub struct BootstrapDir {
    root: PathBuf,
}

impl BootstrapDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `~/.svc-scaffold`, or `./.svc-scaffold` when there is no home directory.
    pub fn default_location() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".svc-scaffold")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn archive_path(&self) -> PathBuf {
        self.root.join(ARCHIVE_FILE_NAME)
    }

    pub fn extraction_root(&self) -> PathBuf {
        self.root.join(EXTRACTION_DIR_NAME)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE_NAME)
    }

    /// Creates the directory if needed and clears artifacts of an earlier
    /// run that never got to clean up.
    pub fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        if self.archive_path().exists() || self.extraction_root().exists() {
            tracing::warn!(
                "Removing leftovers of a previous run in {}",
                self.root.display()
            );
            self.cleanup()?;
        }
        Ok(())
    }

    /// Removes the download and the extraction tree. Anything else in the
    /// directory, such as the settings file, is kept.
    pub fn cleanup(&self) -> Result<()> {
        remove_if_exists(&self.archive_path(), |p| fs::remove_file(p))?;
        remove_if_exists(&self.extraction_root(), |p| fs::remove_dir_all(p))?;
        Ok(())
    }
}

fn remove_if_exists(path: &Path, remove: fn(&Path) -> io::Result<()>) -> io::Result<()> {
    match remove(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
