//! Launcher script relocation.
//!
//! Launcher scripts are preferred from the build output directory when a
//! same-named file exists there; otherwise the original name is kept. Pure
//! existence checks, no copying, no failure mode.

use std::path::{Path, PathBuf};

/// Resolve each script name against the build output directory.
pub fn relocate_scripts(scripts: &[String], output_dir: &Path) -> Vec<PathBuf> {
    scripts
        .iter()
        .map(|script| {
            let candidate = output_dir.join(script);
            if candidate.is_file() {
                candidate
            } else {
                PathBuf::from(script)
            }
        })
        .collect()
}
