use crate::core::template::{contains_placeholder, render, render_name};
use crate::domain::model::{FileNode, NodeKind, SubstitutionRecord, TransformReport};
use crate::utils::error::{Result, ScaffoldError};
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Renders every regular file under `root` in place: contents first, then
/// the file's base name. Directory names are left as they are.
///
/// Each directory's listing is read in full (sorted by name) before its
/// entries are handed out, so renames made during the walk never change
/// what the walk visits next. The first failure aborts the walk and the
/// tree is left as far as it got.
pub fn transform(root: &Path, record: &SubstitutionRecord) -> Result<TransformReport> {
    let mut report = TransformReport::default();

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            ScaffoldError::at_path(path, ScaffoldError::Io(e.into()))
        })?;
        let node = FileNode::from_entry(&entry);

        match node.kind {
            NodeKind::Directory => {
                report.directories_visited += 1;
                if node.name().is_some_and(contains_placeholder) {
                    tracing::warn!(
                        "Directory names are not rendered, leaving {} as is",
                        node.path().display()
                    );
                }
            }
            NodeKind::File => {
                report.files_visited += 1;
                transform_file(&node, record, &mut report)
                    .map_err(|e| ScaffoldError::at_path(node.path(), e))?;
            }
            NodeKind::Other => {
                tracing::trace!("Skipping special entry {}", node.path().display());
            }
        }
    }

    tracing::debug!(
        "Rendered {} of {} files, renamed {}",
        report.contents_rendered,
        report.files_visited,
        report.files_renamed
    );
    Ok(report)
}

fn transform_file(
    node: &FileNode,
    record: &SubstitutionRecord,
    report: &mut TransformReport,
) -> Result<()> {
    let path = node.path();

    // Content must be settled before the rename moves the file away.
    let original = fs::read(path)?;
    if let Cow::Owned(rendered) = render(&original, record)? {
        if rendered != original {
            let permissions = fs::metadata(path)?.permissions();
            fs::write(path, &rendered)?;
            fs::set_permissions(path, permissions)?;
            report.contents_rendered += 1;
            tracing::debug!("Rendered contents of {}", path.display());
        }
    }

    // Non UTF-8 names cannot hold placeholders.
    let Some(name) = node.name() else {
        return Ok(());
    };
    let new_name = render_name(name, record)?;
    if new_name == name {
        return Ok(());
    }

    let target = path.with_file_name(&*new_name);
    if target.exists() {
        tracing::warn!(
            "{} overwrites existing {}",
            path.display(),
            target.display()
        );
        report.rename_collisions += 1;
    }
    fs::rename(path, &target)?;
    report.files_renamed += 1;
    tracing::debug!("Renamed {} -> {}", path.display(), target.display());

    Ok(())
}
