use crate::utils::error::{Result, ScaffoldError};
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// Unpacks the zip at `archive_path` into `dest_dir`.
///
/// All directories are created before any file is written. File modes are
/// applied as each file lands; directory modes are applied last so a
/// read-only directory can still be filled. Returns the number of files
/// written.
pub fn extract(archive_path: &Path, dest_dir: &Path) -> Result<usize> {
    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;
    fs::create_dir_all(dest_dir)?;

    tracing::debug!(
        "Extracting {} entries from {}",
        archive.len(),
        archive_path.display()
    );

    let mut dir_modes: Vec<(PathBuf, u32)> = Vec::new();
    for i in 0..archive.len() {
        let entry = archive.by_index(i)?;
        let target = dest_dir.join(enclosed_path(entry.enclosed_name(), entry.name())?);

        if entry.is_dir() {
            fs::create_dir_all(&target)?;
            if let Some(mode) = entry.unix_mode() {
                dir_modes.push((target, mode));
            }
        } else if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut files = 0;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if entry.is_dir() {
            continue;
        }
        let target = dest_dir.join(enclosed_path(entry.enclosed_name(), entry.name())?);

        let mut out = File::create(&target)?;
        io::copy(&mut entry, &mut out)?;
        if let Some(mode) = entry.unix_mode() {
            apply_mode(&target, mode)?;
        }
        files += 1;
        tracing::trace!("Extracted {}", target.display());
    }

    // Deepest first so parents stay writable while children are adjusted.
    dir_modes.sort_by_key(|(dir, _)| std::cmp::Reverse(dir.components().count()));
    for (dir, mode) in &dir_modes {
        apply_mode(dir, *mode)?;
    }

    Ok(files)
}

fn enclosed_path(enclosed: Option<PathBuf>, raw_name: &str) -> Result<PathBuf> {
    enclosed.ok_or_else(|| ScaffoldError::UnsafeArchiveEntry {
        name: raw_name.to_string(),
    })
}

#[cfg(unix)]
fn apply_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = mode & 0o7777;
    if mode != 0 {
        fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn apply_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}
