//! Filesystem path confinement and sanitization.
//!
//! User-supplied paths are resolved (symlinks and relative segments
//! included) before anything touches them, and may be confined to a base
//! directory outside of which resolution must not land. Pure validation: no
//! function here creates, opens, or modifies anything.

use crate::{Result, RollscanError};
use std::path::{Component, Path, PathBuf};

/// Resolve a user-supplied path, optionally confined to `base_dir`.
///
/// The raw path is rejected up front if it carries `..` traversal segments;
/// the canonicalized result (symlinks resolved) is rejected if it escapes
/// the canonicalized confinement root.
pub fn resolve_secure(path: impl AsRef<Path>, base_dir: Option<&Path>) -> Result<PathBuf> {
    let path = path.as_ref();

    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(RollscanError::path_security(format!(
            "path '{}' contains traversal segments",
            path.display()
        )));
    }

    let resolved = path.canonicalize().map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => RollscanError::not_found(format!("path does not exist: {}", path.display())),
        _ => RollscanError::validation_with_source(format!("cannot resolve path '{}'", path.display()), e),
    })?;

    if let Some(base) = base_dir {
        let base_resolved = base.canonicalize().map_err(|e| {
            RollscanError::validation_with_source(format!("cannot resolve base directory '{}'", base.display()), e)
        })?;
        if !resolved.starts_with(&base_resolved) {
            return Err(RollscanError::path_security(format!(
                "path '{}' resolves outside allowed directory '{}'",
                path.display(),
                base.display()
            )));
        }
    }

    Ok(resolved)
}

/// Validate that `path` resolves to an existing regular file.
pub fn require_file(path: impl AsRef<Path>, base_dir: Option<&Path>) -> Result<PathBuf> {
    let resolved = resolve_secure(&path, base_dir)?;
    if !resolved.is_file() {
        return Err(RollscanError::not_found(format!(
            "not a file: {}",
            path.as_ref().display()
        )));
    }
    Ok(resolved)
}

/// Validate that `path` resolves to an existing directory.
pub fn require_dir(path: impl AsRef<Path>, base_dir: Option<&Path>) -> Result<PathBuf> {
    let resolved = resolve_secure(&path, base_dir)?;
    if !resolved.is_dir() {
        return Err(RollscanError::not_found(format!(
            "not a directory: {}",
            path.as_ref().display()
        )));
    }
    Ok(resolved)
}
