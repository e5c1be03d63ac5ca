//! Project manifest (`Slipway.toml`) loading.
//!
//! Every field has a default matching the stock pythonnet tree, so an empty
//! manifest is a valid one; the file mostly exists to pin down nonstandard
//! layouts.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::util::fs::read_to_string;

/// Manifest file name looked up from the working directory upward.
pub const MANIFEST_NAME: &str = "Slipway.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub project: ProjectConfig,
    pub build: BuildConfig,
    pub restore: RestoreConfig,
    pub shim: ShimConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ProjectConfig {
    /// Solution descriptor, relative to the project root.
    pub solution: String,
    /// Directory holding one subdirectory per buildable unit.
    pub subprojects_root: String,
    /// Directory the solution build writes into.
    pub output_dir: String,
    /// Solution property carrying the output directory.
    pub output_dir_property: String,
    /// Launcher scripts subject to build-output relocation.
    pub scripts: Vec<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        ProjectConfig {
            solution: "pythonnet.sln".to_string(),
            subprojects_root: "src".to_string(),
            output_dir: "build".to_string(),
            output_dir_property: "PythonBuildDir".to_string(),
            scripts: vec!["npython".to_string()],
        }
    }
}

/// Build defaults; each is overridable on the command line.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BuildConfig {
    /// `release` or `debug`.
    pub configuration: Option<String>,
    /// Solution platform (`x64`/`x86`); derived from the host when unset.
    pub platform: Option<String>,
    /// Build tool verbosity level.
    pub verbosity: Option<String>,
    /// Toolchain override (`msbuild` or `xbuild`).
    pub toolchain: Option<String>,
    /// Target Python interpreter to probe.
    pub python: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RestoreConfig {
    /// Restore tool path, relative to the project root.
    pub nuget: String,
    /// Shared package output directory.
    pub packages_dir: String,
}

impl Default for RestoreConfig {
    fn default() -> Self {
        RestoreConfig {
            nuget: "tools/nuget/nuget.exe".to_string(),
            packages_dir: "packages".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ShimConfig {
    pub init_source: String,
    pub module_source: String,
    pub executable_source: String,
    /// pkg-config libraries queried for shim compile/link flags, in order.
    pub libraries: Vec<String>,
}

impl Default for ShimConfig {
    fn default() -> Self {
        ShimConfig {
            init_source: "src/monoclr/pynetinit.c".to_string(),
            module_source: "src/monoclr/clrmod.c".to_string(),
            executable_source: "src/monoclr/python.c".to_string(),
            libraries: vec!["mono-2".to_string(), "glib-2.0".to_string()],
        }
    }
}

/// Load the manifest from a path.
pub fn load_config(path: &Path) -> Result<Config> {
    let contents = read_to_string(path)?;
    toml::from_str(&contents)
        .with_context(|| format!("failed to parse manifest: {}", path.display()))
}

/// Find `Slipway.toml` by walking up from `start`.
pub fn find_manifest(start: &Path) -> Result<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        let candidate = dir.join(MANIFEST_NAME);
        if candidate.is_file() {
            return Ok(candidate);
        }
        current = dir.parent();
    }
    bail!(
        "could not find `{}` in `{}` or any parent directory",
        MANIFEST_NAME,
        start.display()
    )
}
