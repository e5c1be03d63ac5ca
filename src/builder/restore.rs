//! Package restore for toolchain-eligible subprojects.
//!
//! Restore always runs before the solution build. A subproject is skipped
//! when it is reserved for the inactive toolchain or has no package
//! manifest; the first failed restore aborts the run.

use anyhow::Result;

use crate::builder::backend::ToolchainBackend;
use crate::builder::errors::OrchestrationError;
use crate::core::layout::ProjectLayout;
use crate::util::process::CommandRunner;

pub struct PackageRestorer<'a> {
    runner: &'a dyn CommandRunner,
    layout: &'a ProjectLayout,
    backend: &'a dyn ToolchainBackend,
}

impl<'a> PackageRestorer<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        layout: &'a ProjectLayout,
        backend: &'a dyn ToolchainBackend,
    ) -> Self {
        PackageRestorer {
            runner,
            layout,
            backend,
        }
    }

    /// Restore packages for every eligible subproject, returning how many
    /// restore invocations ran.
    pub fn restore(&self) -> Result<usize> {
        let subprojects = self.layout.scan_subprojects()?;
        let mut restored = 0;

        for subproject in &subprojects {
            if self.backend.skips_subproject(&subproject.name) {
                tracing::debug!(
                    "skipping `{}`: reserved for the {} toolchain",
                    subproject.name,
                    match self.backend.profile().variant {
                        crate::core::profile::ToolchainVariant::MsBuild => "mono",
                        crate::core::profile::ToolchainVariant::Mono => "msbuild",
                    }
                );
                continue;
            }
            let Some(ref manifest) = subproject.package_manifest else {
                continue;
            };

            let cmd = self.backend.restore_command(self.layout, manifest);
            eprintln!("   Restoring packages for `{}`", subproject.name);
            tracing::info!("running `{}`", cmd.display_command());

            let output = self.runner.run(&cmd).map_err(|e| {
                OrchestrationError::Restore {
                    subproject: subproject.name.clone(),
                    code: None,
                    output: format!("{:#}", e),
                }
            })?;

            if !output.success() {
                return Err(OrchestrationError::Restore {
                    subproject: subproject.name.clone(),
                    code: output.code,
                    output: output.merged(),
                }
                .into());
            }
            restored += 1;
        }

        Ok(restored)
    }
}
