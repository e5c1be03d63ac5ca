//! Implementation of `slipway install`: artifact copy plus script paths.

use std::path::PathBuf;

use anyhow::Result;

use crate::builder::install::ArtifactInstaller;
use crate::builder::scripts::relocate_scripts;
use crate::core::layout::ProjectLayout;

#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Destination for the recognized artifacts.
    pub install_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct InstallOutcome {
    /// Number of artifact files copied.
    pub copied: usize,
    /// Resolved launcher script paths, preferring build-output copies.
    pub scripts: Vec<PathBuf>,
}

pub fn install(layout: &ProjectLayout, opts: &InstallOptions) -> Result<InstallOutcome> {
    let copied = ArtifactInstaller::install(&layout.output_dir, &opts.install_dir)?;
    let scripts = relocate_scripts(&layout.scripts, &layout.output_dir);

    Ok(InstallOutcome { copied, scripts })
}
