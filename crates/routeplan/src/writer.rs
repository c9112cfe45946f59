//! Artifact persistence.

use routeplan_core::RoutingArtifact;
use routeplan_error::{RouteplanResult, StorageError, StorageErrorKind};
use std::fs;
use std::path::Path;
use tracing::{debug, instrument};

/// Serialize and write the routing artifact, replacing any previous one.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
#[instrument(skip(artifact), fields(path = %path.display()))]
pub fn write_artifact(path: &Path, artifact: &RoutingArtifact) -> RouteplanResult<()> {
    let contents = artifact
        .to_json_pretty()
        .map_err(|e| StorageError::new(StorageErrorKind::Serialize(e.to_string())))?;
    write_atomic(path, &contents)
}

/// Write `contents` to `path` via a temporary sibling file and a rename,
/// so readers see either the old file or the complete new one.
///
/// Missing parent directories are created.
///
/// # Errors
///
/// Returns an error if the directory, the temporary file or the rename
/// fails. A partially written temporary file is removed.
#[instrument(skip(contents), fields(path = %path.display(), bytes = contents.len()))]
pub fn write_atomic(path: &Path, contents: &str) -> RouteplanResult<()> {
    let file_name = path.file_name().ok_or_else(|| {
        StorageError::new(StorageErrorKind::InvalidPath(path.display().to_string()))
    })?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    fs::create_dir_all(parent).map_err(|e| {
        StorageError::new(StorageErrorKind::DirectoryCreation(format!(
            "{}: {}",
            parent.display(),
            e
        )))
    })?;

    let temp_path = parent.join(format!(".{}.tmp", file_name.to_string_lossy()));
    debug!(temp = %temp_path.display(), "Writing temporary artifact");

    if let Err(e) = fs::write(&temp_path, contents) {
        let _ = fs::remove_file(&temp_path);
        return Err(StorageError::new(StorageErrorKind::FileWrite(format!(
            "{}: {}",
            temp_path.display(),
            e
        )))
        .into());
    }

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(StorageError::new(StorageErrorKind::Rename(format!(
            "{} to {}: {}",
            temp_path.display(),
            path.display(),
            e
        )))
        .into());
    }

    Ok(())
}
