//! MeshCore parity patcher for pyMC_Repeater's `mesh_cli.py`.
//!
//! Adds `tempradio` auto-revert, `neighbor.remove`, `clear stats`, the
//! `stats-*` commands, `board`, and a systemctl-backed `reboot` by surgical
//! text edits, so the upstream file keeps its structure and style. Every
//! inserted block is tagged `pymc_console` for easy identification.

pub mod patches;
mod snippets;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub use patches::{Edit, PATCHES, Patch, PatchOutcome, apply_patches};

/// Errors raised while patching a file.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    /// The target file does not exist.
    #[error("{} not found", path.display())]
    NotFound {
        /// The path that was given.
        path: PathBuf,
    },

    /// Reading or writing the target failed.
    #[error("failed to {action} {}", path.display())]
    Io {
        /// `"read"` or `"write"`.
        action: &'static str,
        /// The target path.
        path: PathBuf,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },
}

/// What [`patch_file`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchReport {
    /// The file was rewritten; these patches changed it.
    Patched {
        /// Applied patch names, in order.
        applied: Vec<&'static str>,
    },
    /// Every patch was already in place or inapplicable; nothing was written.
    Unchanged,
}

fn read_target(path: &Path) -> Result<String, PatchError> {
    if !path.exists() {
        return Err(PatchError::NotFound {
            path: path.to_path_buf(),
        });
    }
    fs::read_to_string(path).map_err(|source| PatchError::Io {
        action: "read",
        path: path.to_path_buf(),
        source,
    })
}

/// Apply [`PATCHES`] to the file at `path`, rewriting it only if it changed.
pub fn patch_file(path: &Path) -> Result<PatchReport, PatchError> {
    let original = read_target(path)?;
    let outcome = apply_patches(&original, PATCHES);
    if !outcome.changed() {
        return Ok(PatchReport::Unchanged);
    }
    fs::write(path, &outcome.content).map_err(|source| PatchError::Io {
        action: "write",
        path: path.to_path_buf(),
        source,
    })?;
    let applied = outcome.applied.len();
    tracing::info!(path = %path.display(), applied, "patched");
    Ok(PatchReport::Patched {
        applied: outcome.applied,
    })
}

/// Names of the patches [`patch_file`] would apply, without writing.
pub fn pending_patches(path: &Path) -> Result<Vec<&'static str>, PatchError> {
    let original = read_target(path)?;
    Ok(apply_patches(&original, PATCHES).applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGINAL: &str = include_str!("../tests/fixtures/mesh_cli.py");

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mesh_cli.py");
        let err = patch_file(&path).unwrap_err();
        assert!(matches!(err, PatchError::NotFound { .. }));
        assert_eq!(err.to_string(), format!("{} not found", path.display()));
    }

    #[test]
    fn patch_then_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mesh_cli.py");
        fs::write(&path, ORIGINAL).unwrap();

        assert_eq!(pending_patches(&path).unwrap().len(), PATCHES.len());
        let report = patch_file(&path).unwrap();
        let PatchReport::Patched { applied } = report else {
            panic!("expected a patched report");
        };
        assert_eq!(applied.len(), 9);
        let after_first = fs::read_to_string(&path).unwrap();

        assert_eq!(patch_file(&path).unwrap(), PatchReport::Unchanged);
        assert_eq!(fs::read_to_string(&path).unwrap(), after_first);
        assert!(pending_patches(&path).unwrap().is_empty());
    }

    #[test]
    fn pending_does_not_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mesh_cli.py");
        fs::write(&path, ORIGINAL).unwrap();
        let _ = pending_patches(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), ORIGINAL);
    }
}
