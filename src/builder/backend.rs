//! Per-toolchain backend strategies.
//!
//! The two variants differ in three places: which reserved subproject they
//! skip during restore, how the restore tool is invoked, and whether a
//! post-build native shim pass runs. Collapsing those into one trait lets
//! the orchestration dispatch once instead of branching per step.

use std::path::Path;

use crate::builder::errors::OrchestrationError;
use crate::builder::shim::NativeShimBuilder;
use crate::core::layout::{ProjectLayout, MONO_RESERVED_DIR, MSBUILD_RESERVED_DIR};
use crate::core::profile::{ToolchainProfile, ToolchainVariant};
use crate::core::properties::{BuildProperties, PythonInterpreter};
use crate::util::process::{CommandRunner, ProcessBuilder};

/// Variant-specific behavior threaded through the pipeline.
pub trait ToolchainBackend {
    /// The resolved profile this backend was built from.
    fn profile(&self) -> &ToolchainProfile;

    /// Whether a subproject is reserved for the other variant and must be
    /// skipped during restore.
    fn skips_subproject(&self, name: &str) -> bool;

    /// Restore invocation for one package manifest.
    fn restore_command(&self, layout: &ProjectLayout, manifest: &Path) -> ProcessBuilder;

    /// Post-build step, run only after the solution build succeeded.
    fn post_build(
        &self,
        runner: &dyn CommandRunner,
        layout: &ProjectLayout,
        props: &BuildProperties,
        interpreter: &PythonInterpreter,
    ) -> Result<(), OrchestrationError>;
}

/// msbuild backend: restores with nuget.exe directly, no post-build work.
pub struct MsBuildBackend {
    profile: ToolchainProfile,
}

impl ToolchainBackend for MsBuildBackend {
    fn profile(&self) -> &ToolchainProfile {
        &self.profile
    }

    fn skips_subproject(&self, name: &str) -> bool {
        name == MONO_RESERVED_DIR
    }

    fn restore_command(&self, layout: &ProjectLayout, manifest: &Path) -> ProcessBuilder {
        ProcessBuilder::new(&layout.nuget)
            .arg("install")
            .arg(manifest)
            .arg("-o")
            .arg(&layout.packages_dir)
    }

    fn post_build(
        &self,
        _runner: &dyn CommandRunner,
        _layout: &ProjectLayout,
        _props: &BuildProperties,
        _interpreter: &PythonInterpreter,
    ) -> Result<(), OrchestrationError> {
        // msbuild builds the extension module within the solution itself
        Ok(())
    }
}

/// Mono backend: nuget runs under the mono runtime, and the clr module plus
/// the npython launcher are compiled from the shim sources afterwards.
pub struct MonoBackend {
    profile: ToolchainProfile,
}

impl ToolchainBackend for MonoBackend {
    fn profile(&self) -> &ToolchainProfile {
        &self.profile
    }

    fn skips_subproject(&self, name: &str) -> bool {
        name == MSBUILD_RESERVED_DIR
    }

    fn restore_command(&self, layout: &ProjectLayout, manifest: &Path) -> ProcessBuilder {
        ProcessBuilder::new("mono")
            .arg(&layout.nuget)
            .arg("install")
            .arg(manifest)
            .arg("-o")
            .arg(&layout.packages_dir)
    }

    fn post_build(
        &self,
        runner: &dyn CommandRunner,
        layout: &ProjectLayout,
        props: &BuildProperties,
        interpreter: &PythonInterpreter,
    ) -> Result<(), OrchestrationError> {
        NativeShimBuilder::new(runner, layout, props, interpreter, self.profile.companion_exe)
            .build()
    }
}

/// Construct the backend for a resolved profile.
pub fn backend_for(profile: ToolchainProfile) -> Box<dyn ToolchainBackend> {
    match profile.variant {
        ToolchainVariant::MsBuild => Box::new(MsBuildBackend { profile }),
        ToolchainVariant::Mono => Box::new(MonoBackend { profile }),
    }
}
