//! Artifact installation: copy recognized output files into place.

use std::path::Path;

use anyhow::Result;

use crate::core::layout::ARTIFACT_PATTERNS;
use crate::util::fs::{copy_into, ensure_dir, glob_files};

pub struct ArtifactInstaller;

impl ArtifactInstaller {
    /// Copy every file matching the fixed artifact patterns from the build
    /// output directory into the install directory, returning the count.
    ///
    /// A missing build directory is not an error: there is simply nothing
    /// to install yet, which is expected when running install against an
    /// unbuilt tree.
    pub fn install(build_dir: &Path, install_dir: &Path) -> Result<usize> {
        if !build_dir.is_dir() {
            tracing::warn!(
                "`{}` does not exist -- nothing to install",
                build_dir.display()
            );
            return Ok(0);
        }

        ensure_dir(install_dir)?;

        let mut copied = 0;
        for artifact in glob_files(build_dir, &ARTIFACT_PATTERNS)? {
            let dest = copy_into(&artifact, install_dir)?;
            tracing::debug!("installed {}", dest.display());
            copied += 1;
        }
        Ok(copied)
    }
}
