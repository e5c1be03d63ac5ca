//! Command implementations.

pub mod build;
pub mod completions;
pub mod doctor;
pub mod install;
pub mod restore;

use std::path::PathBuf;

use anyhow::Result;

use slipway::core::layout::ProjectLayout;
use slipway::util::config::{find_manifest, load_config, Config};
use slipway::util::diagnostic::suggestions;

/// Locate the manifest from the working directory and load the project
/// layout, with an optional output directory override.
pub fn load_project(output_dir: Option<PathBuf>) -> Result<(Config, ProjectLayout)> {
    let cwd = std::env::current_dir()?;
    let manifest =
        find_manifest(&cwd).map_err(|e| anyhow::anyhow!("{}\n{}", e, suggestions::NO_MANIFEST))?;
    let config = load_config(&manifest)?;
    let root = manifest.parent().unwrap_or(&cwd).to_path_buf();
    let layout = ProjectLayout::from_config(&root, &config, output_dir);
    Ok((config, layout))
}
