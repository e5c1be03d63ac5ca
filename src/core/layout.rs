//! Project layout: where the solution, subprojects, and outputs live.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::util::config::Config;

/// Base token of the extension module artifact (`clr.pyd` / `clr.so`).
pub const EXTENSION_BASE: &str = "clr";

/// Name patterns of the installable artifact families. Files that match
/// neither are never installed, whatever else the output directory holds.
pub const ARTIFACT_PATTERNS: [&str; 2] = ["clr.*", "Python.Runtime.*"];

/// Per-subproject package manifest file name.
pub const PACKAGE_MANIFEST: &str = "packages.config";

/// Subproject reserved for the msbuild backend (skipped under Mono).
pub const MSBUILD_RESERVED_DIR: &str = "clrmodule";

/// Subproject reserved for the Mono backend (skipped under msbuild).
pub const MONO_RESERVED_DIR: &str = "monoclr";

/// Shim translation units compiled on the Mono path.
#[derive(Debug, Clone)]
pub struct ShimSources {
    /// Runtime initialization shared by module and executable.
    pub init: PathBuf,
    /// Extension-module entry translation unit.
    pub module: PathBuf,
    /// Standalone-executable entry translation unit.
    pub executable: PathBuf,
}

/// A buildable unit directly under the subprojects root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubprojectDescriptor {
    pub name: String,
    pub directory: PathBuf,
    /// Present when the subproject declares packages to restore.
    pub package_manifest: Option<PathBuf>,
}

/// Resolved on-disk layout of the project being orchestrated.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    /// Directory containing the manifest.
    pub root: PathBuf,
    /// Solution descriptor consumed by the build tool.
    pub solution: PathBuf,
    /// Directory scanned for subprojects.
    pub subprojects_root: PathBuf,
    /// Absolute directory all build steps write into.
    pub output_dir: PathBuf,
    /// Solution property naming the output directory (e.g. `PythonBuildDir`).
    pub output_dir_property: String,
    /// Path to the restore tool.
    pub nuget: PathBuf,
    /// Shared package output directory for restores.
    pub packages_dir: PathBuf,
    /// Launcher script names subject to relocation.
    pub scripts: Vec<String>,
    pub shim: ShimSources,
    /// Libraries whose flags the shim build queries from pkg-config.
    pub shim_libraries: Vec<String>,
}

impl ProjectLayout {
    /// Build the layout from a loaded config, rooted at the manifest's
    /// directory. `output_dir` overrides the configured one when given.
    pub fn from_config(root: &Path, config: &Config, output_dir: Option<PathBuf>) -> Self {
        let project = &config.project;
        let restore = &config.restore;
        let shim = &config.shim;

        let out = output_dir.unwrap_or_else(|| PathBuf::from(&project.output_dir));

        ProjectLayout {
            root: root.to_path_buf(),
            solution: root.join(&project.solution),
            subprojects_root: root.join(&project.subprojects_root),
            output_dir: absolutize(root, &out),
            output_dir_property: project.output_dir_property.clone(),
            nuget: root.join(&restore.nuget),
            packages_dir: root.join(&restore.packages_dir),
            scripts: project.scripts.clone(),
            shim: ShimSources {
                init: root.join(&shim.init_source),
                module: root.join(&shim.module_source),
                executable: root.join(&shim.executable_source),
            },
            shim_libraries: shim.libraries.clone(),
        }
    }

    /// Enumerate immediate subdirectories of the subprojects root, sorted by
    /// name so restore order is stable.
    pub fn scan_subprojects(&self) -> Result<Vec<SubprojectDescriptor>> {
        let entries = fs::read_dir(&self.subprojects_root).with_context(|| {
            format!(
                "failed to read subprojects root: {}",
                self.subprojects_root.display()
            )
        })?;

        let mut subprojects = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let directory = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            let manifest = directory.join(PACKAGE_MANIFEST);
            subprojects.push(SubprojectDescriptor {
                name,
                directory,
                package_manifest: manifest.is_file().then_some(manifest),
            });
        }

        subprojects.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(subprojects)
    }

    /// File name of the extension module artifact on this host. The Mono
    /// shim writes the same name msbuild would, so installation never
    /// branches on the toolchain.
    pub fn extension_module_file(&self) -> String {
        format!("{}{}", EXTENSION_BASE, std::env::consts::DLL_SUFFIX)
    }
}

/// Join a possibly-relative path onto the root and make it absolute.
fn absolutize(root: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    };
    crate::util::fs::normalize_path(&joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn layout_for(tmp: &TempDir) -> ProjectLayout {
        ProjectLayout::from_config(tmp.path(), &Config::default(), None)
    }

    #[test]
    fn test_scan_subprojects_sorted_with_manifests() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir_all(src.join("runtime")).unwrap();
        fs::create_dir_all(src.join("embed_tests")).unwrap();
        fs::write(src.join("runtime").join(PACKAGE_MANIFEST), "<packages/>").unwrap();
        // stray file at the root must be ignored
        fs::write(src.join("README"), "not a subproject").unwrap();

        let subprojects = layout_for(&tmp).scan_subprojects().unwrap();
        assert_eq!(subprojects.len(), 2);
        assert_eq!(subprojects[0].name, "embed_tests");
        assert!(subprojects[0].package_manifest.is_none());
        assert_eq!(subprojects[1].name, "runtime");
        assert!(subprojects[1].package_manifest.is_some());
    }

    #[test]
    fn test_output_dir_is_absolute() {
        let tmp = TempDir::new().unwrap();
        let layout = layout_for(&tmp);
        assert!(layout.output_dir.is_absolute());
        assert!(layout.output_dir.starts_with(tmp.path()));
    }
}
