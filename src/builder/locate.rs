//! Toolchain resolution and build tool location.
//!
//! Location strategies sit behind [`BuildToolLocator`] so tests can inject a
//! fake. Registry probing shells out to `reg query` through the command
//! runner rather than binding a registry API, which keeps the lookup
//! mockable on any host.

use std::path::PathBuf;

use crate::builder::errors::OrchestrationError;
use crate::core::profile::{ToolchainProfile, ToolchainVariant};
use crate::util::process::{CommandRunner, ProcessBuilder};

/// Registry keys probed for an MSBuild installation, newest first.
const MSBUILD_TOOLS_KEYS: [&str; 4] = [
    r"HKLM\SOFTWARE\Microsoft\MSBuild\ToolsVersions\12.0",
    r"HKLM\SOFTWARE\Microsoft\MSBuild\ToolsVersions\4.0",
    r"HKLM\SOFTWARE\Microsoft\MSBuild\ToolsVersions\3.5",
    r"HKLM\SOFTWARE\Microsoft\MSBuild\ToolsVersions\2.0",
];

const MSBUILD_TOOLS_VALUE: &str = "MSBuildToolsPath";

/// Capability for locating the active build tool.
pub trait BuildToolLocator {
    fn locate(&self) -> Result<PathBuf, OrchestrationError>;
}

/// Locates msbuild.exe by probing the Windows registry across an ordered
/// list of tools versions.
pub struct RegistryLookup<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> RegistryLookup<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        RegistryLookup { runner }
    }
}

impl BuildToolLocator for RegistryLookup<'_> {
    fn locate(&self) -> Result<PathBuf, OrchestrationError> {
        for key in MSBUILD_TOOLS_KEYS {
            let cmd = ProcessBuilder::new("reg")
                .args(["query", key, "/v", MSBUILD_TOOLS_VALUE]);
            let output = match self.runner.run(&cmd) {
                Ok(out) => out,
                // reg.exe itself missing: nothing more to probe
                Err(_) => break,
            };
            if !output.success() {
                continue;
            }
            if let Some(tools_path) = parse_reg_value(&output.stdout) {
                let msbuild = PathBuf::from(tools_path).join("msbuild.exe");
                tracing::debug!("located msbuild via {}: {}", key, msbuild.display());
                return Ok(msbuild);
            }
        }

        Err(OrchestrationError::ToolLocation {
            probed: MSBUILD_TOOLS_KEYS.iter().map(|k| k.to_string()).collect(),
        })
    }
}

/// Parse the `MSBuildToolsPath REG_SZ <path>` line out of `reg query` output.
fn parse_reg_value(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .filter(|line| line.contains(MSBUILD_TOOLS_VALUE))
        .find_map(|line| {
            let (_, value) = line.split_once("REG_SZ")?;
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        })
}

/// A tool addressed by a fixed command name, resolved by the OS search path
/// at invocation time.
pub struct FixedPathOnSystem {
    name: String,
}

impl FixedPathOnSystem {
    pub fn new(name: impl Into<String>) -> Self {
        FixedPathOnSystem { name: name.into() }
    }
}

impl BuildToolLocator for FixedPathOnSystem {
    fn locate(&self) -> Result<PathBuf, OrchestrationError> {
        Ok(PathBuf::from(&self.name))
    }
}

/// Decide the active toolchain variant for this run.
///
/// An explicit override wins; an unknown override name is a configuration
/// error. Without one, Windows-like hosts use msbuild and everything else
/// uses Mono's xbuild.
pub fn resolve_variant(
    windows_like: bool,
    override_name: Option<&str>,
) -> Result<ToolchainVariant, OrchestrationError> {
    match override_name {
        Some(name) => name.parse(),
        None => Ok(ToolchainVariant::for_host(windows_like)),
    }
}

/// Resolve the full toolchain profile for a variant.
pub fn resolve_profile(
    variant: ToolchainVariant,
    locator: &dyn BuildToolLocator,
) -> Result<ToolchainProfile, OrchestrationError> {
    let tool = locator.locate()?;
    Ok(ToolchainProfile::new(variant, tool))
}

/// Default locator for a variant.
pub fn locator_for<'a>(
    variant: ToolchainVariant,
    runner: &'a dyn CommandRunner,
) -> Box<dyn BuildToolLocator + 'a> {
    match variant {
        ToolchainVariant::MsBuild => Box::new(RegistryLookup::new(runner)),
        ToolchainVariant::Mono => Box::new(FixedPathOnSystem::new("xbuild")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{CommandPattern, MockRunner};
    use crate::util::process::ExecOutput;

    const REG_HIT: &str = "\r\nHKEY_LOCAL_MACHINE\\SOFTWARE\\Microsoft\\MSBuild\\ToolsVersions\\4.0\r\n    MSBuildToolsPath    REG_SZ    C:\\Windows\\Microsoft.NET\\Framework\\v4.0.30319\\\r\n";

    #[test]
    fn test_registry_lookup_probes_in_order() {
        let mut runner = MockRunner::new();
        // 12.0 misses, 4.0 hits
        runner.expect(
            CommandPattern::Contains("ToolsVersions\\12.0".to_string()),
            ExecOutput::err(1, "ERROR: The system was unable to find the specified registry key or value."),
        );
        runner.expect(
            CommandPattern::Contains("ToolsVersions\\4.0".to_string()),
            ExecOutput::ok(REG_HIT),
        );

        let located = RegistryLookup::new(&runner).locate().unwrap();
        assert!(located.ends_with("msbuild.exe"));
        assert!(located
            .to_string_lossy()
            .contains("v4.0.30319"));

        let invocations = runner.invocations();
        assert_eq!(invocations.len(), 2);
        assert!(invocations[0].contains("12.0"));
        assert!(invocations[1].contains("4.0"));
    }

    #[test]
    fn test_registry_lookup_all_keys_missing() {
        let mut runner = MockRunner::new();
        runner.expect(
            CommandPattern::Any,
            ExecOutput::err(1, "ERROR: unable to find the specified registry key"),
        );

        let err = RegistryLookup::new(&runner).locate().unwrap_err();
        assert!(matches!(err, OrchestrationError::ToolLocation { ref probed } if probed.len() == 4));
        assert_eq!(runner.invocations().len(), 4);
    }

    #[test]
    fn test_parse_reg_value_with_spaces() {
        let out = "    MSBuildToolsPath    REG_SZ    C:\\Program Files\\MSBuild\\12.0\\bin\\";
        assert_eq!(
            parse_reg_value(out).unwrap(),
            "C:\\Program Files\\MSBuild\\12.0\\bin\\"
        );
        assert_eq!(parse_reg_value("no such value"), None);
    }

    #[test]
    fn test_resolve_variant_override() {
        assert_eq!(
            resolve_variant(true, Some("xbuild")).unwrap(),
            ToolchainVariant::Mono
        );
        assert!(matches!(
            resolve_variant(false, Some("bazel")),
            Err(OrchestrationError::Configuration { .. })
        ));
    }

    #[test]
    fn test_resolve_profile_is_deterministic() {
        let locator = FixedPathOnSystem::new("xbuild");
        let first = resolve_profile(ToolchainVariant::Mono, &locator).unwrap();
        let second = resolve_profile(ToolchainVariant::Mono, &locator).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.tool, PathBuf::from("xbuild"));
    }
}
