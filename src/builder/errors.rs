//! Orchestration error types and diagnostics.
//!
//! Any external-process failure aborts the whole run: there is no retry and
//! no aggregation across subprojects. The captured tool output and exit code
//! ride on the error so the failure can be diagnosed from the message alone.

use std::path::PathBuf;

use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Fatal error during build orchestration.
#[derive(Debug, Error)]
pub enum OrchestrationError {
    /// A toolchain override named something other than the two supported
    /// backends.
    #[error("unsupported toolchain `{name}` (use `msbuild` or `xbuild`)")]
    Configuration { name: String },

    /// The build tool could not be located on this host.
    #[error("msbuild.exe could not be found (probed {})", probed.join(", "))]
    ToolLocation { probed: Vec<String> },

    /// Package restore exited non-zero for a subproject.
    #[error("package restore failed for `{subproject}` (exit code {code:?})\n{output}")]
    Restore {
        subproject: String,
        code: Option<i32>,
        output: String,
    },

    /// A solution build invocation (Clean or Build) failed.
    #[error("`{command}` failed during {target} (exit code {code:?})\n{output}")]
    Build {
        command: String,
        target: String,
        code: Option<i32>,
        output: String,
    },

    /// A pkg-config flag query failed or the tool is missing.
    #[error("pkg-config query failed for `{library}` (exit code {code:?})\n{output}")]
    ToolQuery {
        library: String,
        code: Option<i32>,
        output: String,
    },

    /// Compiling or linking the native shim failed.
    #[error("native shim build failed: {message}\n{output}")]
    NativeBuild { message: String, output: String },

    /// Filesystem failure while preparing or scanning directories.
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl OrchestrationError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            OrchestrationError::Configuration { name } => {
                Diagnostic::error(format!("unsupported toolchain `{}`", name))
                    .with_suggestion("help: Supported toolchains are `msbuild` and `xbuild`")
            }

            OrchestrationError::ToolLocation { probed } => {
                Diagnostic::error("msbuild.exe could not be found")
                    .with_context(format!("probed registry keys: {}", probed.join(", ")))
                    .with_suggestion(suggestions::MSBUILD_NOT_FOUND)
            }

            OrchestrationError::Restore {
                subproject,
                code,
                output,
            } => Diagnostic::error(format!(
                "package restore failed for `{}` (exit code {:?})",
                subproject, code
            ))
            .with_context(output.clone()),

            OrchestrationError::Build {
                command,
                target,
                code,
                output,
            } => Diagnostic::error(format!(
                "`{}` failed during {} (exit code {:?})",
                command, target, code
            ))
            .with_context(output.clone())
            .with_suggestion(suggestions::BUILD_FAILED),

            OrchestrationError::ToolQuery {
                library,
                code,
                output,
            } => Diagnostic::error(format!(
                "pkg-config query failed for `{}` (exit code {:?})",
                library, code
            ))
            .with_context(output.clone())
            .with_suggestion(suggestions::PKG_CONFIG_FAILED),

            OrchestrationError::NativeBuild { message, output } => {
                Diagnostic::error(format!("native shim build failed: {}", message))
                    .with_context(output.clone())
            }

            OrchestrationError::Io { path, source } => {
                Diagnostic::error(source.to_string()).with_location(path.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_error_carries_output() {
        let err = OrchestrationError::Build {
            command: "xbuild pythonnet.sln".to_string(),
            target: "Clean".to_string(),
            code: Some(1),
            output: "MSB4025: project file could not be loaded".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("Clean"));
        assert!(rendered.contains("MSB4025"));
    }

    #[test]
    fn test_tool_query_diagnostic_suggests_packages() {
        let err = OrchestrationError::ToolQuery {
            library: "mono-2".to_string(),
            code: Some(1),
            output: "No package 'mono-2' found".to_string(),
        };
        let diag = err.to_diagnostic();
        assert!(diag.suggestions.iter().any(|s| s.contains("pkg-config")));
    }
}
