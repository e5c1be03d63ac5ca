//! Implementation of `slipway build`: the full orchestration pipeline.
//!
//! Strictly sequential: resolve the toolchain once, restore packages, derive
//! build properties from the probed interpreter, clean and build the
//! solution, and on the Mono path compile the native shim afterwards. Every
//! external call blocks and any failure aborts the run.

use std::path::PathBuf;

use anyhow::Result;

use crate::builder::backend::backend_for;
use crate::builder::locate::{locator_for, resolve_profile, resolve_variant};
use crate::builder::restore::PackageRestorer;
use crate::builder::solution::SolutionBuilder;
use crate::core::layout::ProjectLayout;
use crate::core::profile::ToolchainProfile;
use crate::core::properties::{
    host_platform, BuildProperties, BuildVerbosity, Configuration, PythonInterpreter,
};
use crate::util::process::CommandRunner;

/// Options for the build pipeline.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub configuration: Configuration,
    pub verbosity: BuildVerbosity,
    /// Solution platform; derived from the host when unset.
    pub platform: Option<String>,
    /// Target interpreter to probe.
    pub python: PathBuf,
    /// Toolchain override name, if any.
    pub toolchain: Option<String>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            configuration: Configuration::default(),
            verbosity: BuildVerbosity::default(),
            platform: None,
            python: PathBuf::from("python"),
            toolchain: None,
        }
    }
}

/// What a successful build produced.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub profile: ToolchainProfile,
    pub output_dir: PathBuf,
    /// Number of subprojects whose packages were restored.
    pub restored: usize,
}

/// Run the pipeline for the current host.
pub fn build(
    layout: &ProjectLayout,
    opts: &BuildOptions,
    runner: &dyn CommandRunner,
) -> Result<BuildOutcome> {
    build_for_host(layout, opts, runner, cfg!(windows))
}

/// Run the pipeline with the host platform made explicit (testable on any
/// host).
pub fn build_for_host(
    layout: &ProjectLayout,
    opts: &BuildOptions,
    runner: &dyn CommandRunner,
    windows_like: bool,
) -> Result<BuildOutcome> {
    // Toolchain resolution happens exactly once; everything downstream
    // receives the profile explicitly.
    let variant = resolve_variant(windows_like, opts.toolchain.as_deref())?;
    let locator = locator_for(variant, runner);
    let profile = resolve_profile(variant, locator.as_ref())?;
    tracing::info!(
        "using {} toolchain: {}",
        profile.variant,
        profile.tool.display()
    );

    let backend = backend_for(profile.clone());

    let restored = PackageRestorer::new(runner, layout, backend.as_ref()).restore()?;

    let interpreter = PythonInterpreter::probe(runner, &opts.python)?;
    let props = BuildProperties::new(
        opts.configuration,
        &interpreter,
        opts.platform
            .clone()
            .unwrap_or_else(|| host_platform().to_string()),
        layout.output_dir.clone(),
        opts.verbosity,
    );

    SolutionBuilder::new(runner, layout, &profile).build(&props)?;
    backend.post_build(runner, layout, &props, &interpreter)?;

    Ok(BuildOutcome {
        profile,
        output_dir: props.output_dir,
        restored,
    })
}
