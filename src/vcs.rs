//! Version lookup from version control metadata
//!
//! When `set_version_from_vcs` is requested, the project file's `version`
//! field is overwritten with a version derived from the repository the
//! plugin runs in. The lookup sits behind [`VersionSource`] so the
//! decision logic stays independent of how the version is obtained.

use std::path::Path;
use std::process::Command;

use crate::GeneratorError;

/// Source of a version string derived from version-control metadata
pub trait VersionSource {
    /// Resolve a version string for the repository containing `dir`
    fn version(&self, dir: &Path) -> Result<String, GeneratorError>;
}

/// Derives the version from the nearest reachable git tag
///
/// Runs `git describe --tags --always` and strips a leading `v` from the
/// result, so a `v1.2.3` tag becomes `1.2.3`. Between tags the describe
/// output carries the commit distance and hash, which is passed through
/// as-is.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitVersion;

impl VersionSource for GitVersion {
    fn version(&self, dir: &Path) -> Result<String, GeneratorError> {
        let output = Command::new("git")
            .args(["describe", "--tags", "--always"])
            .current_dir(dir)
            .output()
            .map_err(|e| GeneratorError::VcsError(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GeneratorError::VcsError(stderr.trim().to_string()));
        }

        let describe = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if describe.is_empty() {
            return Err(GeneratorError::VcsError(
                "no version control metadata found".to_string(),
            ));
        }

        Ok(describe.trim_start_matches('v').to_string())
    }
}
