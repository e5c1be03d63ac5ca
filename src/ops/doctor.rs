//! Environment health checks for `slipway doctor`.
//!
//! Fast checks that the external tools the orchestration shells out to are
//! actually present, reported per toolchain variant.

use std::path::PathBuf;

use crate::builder::locate::{BuildToolLocator, RegistryLookup};
use crate::core::layout::ProjectLayout;
use crate::core::profile::ToolchainVariant;
use crate::util::diagnostic::suggestions;
use crate::util::process::{find_c_compiler, find_executable, CommandRunner};

/// Result of a single health check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the check.
    pub name: String,
    /// Whether the check passed.
    pub passed: bool,
    /// Human-readable status message.
    pub message: String,
    /// Path to the tool (if found).
    pub path: Option<PathBuf>,
    /// Whether this check is required for the active variant.
    pub required: bool,
}

impl CheckResult {
    fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        CheckResult {
            name: name.into(),
            passed: true,
            message: message.into(),
            path: None,
            required: true,
        }
    }

    fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        CheckResult {
            name: name.into(),
            passed: false,
            message: message.into(),
            path: None,
            required: true,
        }
    }

    fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    fn with_path(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }
}

/// Run every check relevant to the given toolchain variant.
pub fn run_checks(
    layout: &ProjectLayout,
    variant: ToolchainVariant,
    runner: &dyn CommandRunner,
) -> Vec<CheckResult> {
    let mut results = Vec::new();

    results.push(check_build_tool(variant, runner));

    if layout.nuget.is_file() {
        results.push(
            CheckResult::pass("nuget", "bundled restore tool present")
                .with_path(layout.nuget.clone()),
        );
    } else {
        results.push(CheckResult::fail(
            "nuget",
            format!("not found at {}", layout.nuget.display()),
        ));
    }

    results.push(check_on_path("python", "interpreter to probe and embed"));

    if variant == ToolchainVariant::Mono {
        results.push(check_on_path("mono", "runtime for the restore tool"));
        results.push(check_on_path("pkg-config", "shim flag discovery"));
        match find_c_compiler() {
            Some(cc) => results.push(
                CheckResult::pass("cc", "C compiler for the shim build").with_path(cc),
            ),
            None => results.push(CheckResult::fail(
                "cc",
                "no C compiler found (set CC or install gcc/clang)",
            )),
        }
    }

    if !layout.solution.is_file() {
        results.push(
            CheckResult::fail(
                "solution",
                format!("descriptor missing: {}", layout.solution.display()),
            )
            .optional(),
        );
    }

    results
}

fn check_build_tool(variant: ToolchainVariant, runner: &dyn CommandRunner) -> CheckResult {
    match variant {
        ToolchainVariant::MsBuild => match RegistryLookup::new(runner).locate() {
            Ok(path) => {
                CheckResult::pass("msbuild", "located via registry").with_path(path)
            }
            Err(e) => CheckResult::fail("msbuild", e.to_string()),
        },
        // the profile leaves xbuild to the search path; verify it would
        // actually resolve
        ToolchainVariant::Mono => match find_executable("xbuild") {
            Some(path) => CheckResult::pass("xbuild", "found on PATH").with_path(path),
            None => CheckResult::fail("xbuild", suggestions::MONO_NOT_FOUND),
        },
    }
}

fn check_on_path(name: &str, purpose: &str) -> CheckResult {
    match find_executable(name) {
        Some(path) => CheckResult::pass(name, purpose).with_path(path),
        None => CheckResult::fail(name, format!("not found on PATH ({})", purpose)),
    }
}
