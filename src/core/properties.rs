//! Build properties passed to the solution build tool.
//!
//! Preprocessor defines are derived from the target Python interpreter
//! (version and unicode width), not from the host Rust toolchain, so the
//! interpreter is probed once and the answers threaded through.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::core::profile::ToolchainProfile;
use crate::util::process::{CommandRunner, ProcessBuilder};

/// Narrow/wide unicode boundary: interpreters with `maxunicode` below this
/// are UCS2 builds.
const WIDE_UNICODE_MAX: u32 = 0x10FFFF;

/// Build configuration (maps onto the solution's configuration names).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Configuration {
    #[default]
    Release,
    Debug,
}

impl Configuration {
    pub fn as_str(&self) -> &'static str {
        match self {
            Configuration::Release => "Release",
            Configuration::Debug => "Debug",
        }
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Configuration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "release" => Ok(Configuration::Release),
            "debug" => Ok(Configuration::Debug),
            _ => Err(format!(
                "invalid configuration '{}'; expected 'release' or 'debug'",
                s
            )),
        }
    }
}

/// Verbosity level forwarded to the build tool's `/verbosity:` switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildVerbosity {
    Quiet,
    #[default]
    Minimal,
    Normal,
    Detailed,
    Diagnostic,
}

impl BuildVerbosity {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildVerbosity::Quiet => "quiet",
            BuildVerbosity::Minimal => "minimal",
            BuildVerbosity::Normal => "normal",
            BuildVerbosity::Detailed => "detailed",
            BuildVerbosity::Diagnostic => "diagnostic",
        }
    }
}

impl fmt::Display for BuildVerbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildVerbosity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "quiet" => Ok(BuildVerbosity::Quiet),
            "minimal" => Ok(BuildVerbosity::Minimal),
            "normal" => Ok(BuildVerbosity::Normal),
            "detailed" => Ok(BuildVerbosity::Detailed),
            "diagnostic" => Ok(BuildVerbosity::Diagnostic),
            _ => Err(format!(
                "invalid verbosity '{}'; expected quiet, minimal, normal, detailed, or diagnostic",
                s
            )),
        }
    }
}

/// Facts about the target Python interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PythonInterpreter {
    /// `sys.version_info[:2]`.
    pub version: (u32, u32),
    /// `sys.maxunicode`, deciding UCS2 vs UCS4.
    pub max_unicode: u32,
    /// `sysconfig.get_config_var("BLDLIBRARY")`, used when linking the
    /// companion executable against the interpreter.
    pub link_library: Option<String>,
}

/// Introspection snippet run once per build.
const PROBE_SNIPPET: &str = "import sys, sysconfig; \
    print(sys.version_info[0]); \
    print(sys.version_info[1]); \
    print(sys.maxunicode); \
    print(sysconfig.get_config_var('BLDLIBRARY') or '')";

impl PythonInterpreter {
    /// Probe an interpreter by running it with a short introspection script.
    pub fn probe(runner: &dyn CommandRunner, python: &Path) -> Result<Self> {
        let cmd = ProcessBuilder::new(python).arg("-c").arg(PROBE_SNIPPET);
        let output = runner
            .run(&cmd)
            .with_context(|| format!("failed to run `{}`", python.display()))?;
        if !output.success() {
            bail!(
                "`{}` exited with {:?} while probing interpreter facts\n{}",
                python.display(),
                output.code,
                output.merged()
            );
        }
        Self::parse_probe(&output.stdout)
            .with_context(|| format!("unexpected probe output from `{}`", python.display()))
    }

    fn parse_probe(stdout: &str) -> Result<Self> {
        let mut lines = stdout.lines().map(str::trim);
        let major: u32 = lines.next().context("missing version line")?.parse()?;
        let minor: u32 = lines.next().context("missing version line")?.parse()?;
        let max_unicode: u32 = lines.next().context("missing maxunicode line")?.parse()?;
        let link_library = lines
            .next()
            .filter(|l| !l.is_empty())
            .map(str::to_string);

        Ok(PythonInterpreter {
            version: (major, minor),
            max_unicode,
            link_library,
        })
    }
}

/// Parameters shared by every build tool invocation.
#[derive(Debug, Clone)]
pub struct BuildProperties {
    pub configuration: Configuration,
    /// Solution platform name (`x64` or `x86`).
    pub platform: String,
    /// Ordered preprocessor defines; joined with the profile's separator.
    pub defines: Vec<String>,
    /// Absolute directory the solution build writes into.
    pub output_dir: PathBuf,
    pub verbosity: BuildVerbosity,
}

impl BuildProperties {
    /// Derive the properties for one build.
    pub fn new(
        configuration: Configuration,
        interpreter: &PythonInterpreter,
        platform: String,
        output_dir: PathBuf,
        verbosity: BuildVerbosity,
    ) -> Self {
        let mut defines = vec![
            format!("PYTHON{}{}", interpreter.version.0, interpreter.version.1),
            if interpreter.max_unicode < WIDE_UNICODE_MAX {
                "UCS2".to_string()
            } else {
                "UCS4".to_string()
            },
        ];
        if configuration == Configuration::Debug {
            defines.push("DEBUG".to_string());
            defines.push("TRACE".to_string());
        }

        BuildProperties {
            configuration,
            platform,
            defines,
            output_dir,
            verbosity,
        }
    }

    /// Full configuration name including the toolchain suffix,
    /// e.g. `ReleaseMono`.
    pub fn configuration_name(&self, profile: &ToolchainProfile) -> String {
        format!("{}{}", self.configuration, profile.configuration_suffix)
    }

    /// Defines joined into the single string the build tool expects.
    pub fn joined_defines(&self, profile: &ToolchainProfile) -> String {
        self.defines.join(profile.define_separator)
    }
}

/// Solution platform name for the host: `x64` on 64-bit hosts, else `x86`.
pub fn host_platform() -> &'static str {
    if std::mem::size_of::<usize>() == 8 {
        "x64"
    } else {
        "x86"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::{ToolchainProfile, ToolchainVariant};
    use std::path::PathBuf;

    fn wide_py27() -> PythonInterpreter {
        PythonInterpreter {
            version: (2, 7),
            max_unicode: 0x10FFFF,
            link_library: None,
        }
    }

    #[test]
    fn test_defines_release_wide() {
        let props = BuildProperties::new(
            Configuration::Release,
            &wide_py27(),
            "x64".to_string(),
            PathBuf::from("/tmp/out"),
            BuildVerbosity::Minimal,
        );
        assert_eq!(props.defines, vec!["PYTHON27", "UCS4"]);
    }

    #[test]
    fn test_defines_narrow_unicode() {
        let narrow = PythonInterpreter {
            version: (2, 7),
            max_unicode: 0xFFFF,
            link_library: None,
        };
        let props = BuildProperties::new(
            Configuration::Release,
            &narrow,
            "x86".to_string(),
            PathBuf::from("/tmp/out"),
            BuildVerbosity::Minimal,
        );
        assert_eq!(props.defines, vec!["PYTHON27", "UCS2"]);
    }

    #[test]
    fn test_defines_debug_appends_trace() {
        let props = BuildProperties::new(
            Configuration::Debug,
            &wide_py27(),
            "x64".to_string(),
            PathBuf::from("/tmp/out"),
            BuildVerbosity::Minimal,
        );
        assert_eq!(props.defines, vec!["PYTHON27", "UCS4", "DEBUG", "TRACE"]);
    }

    #[test]
    fn test_joined_defines_uses_profile_separator() {
        let props = BuildProperties::new(
            Configuration::Release,
            &wide_py27(),
            "x64".to_string(),
            PathBuf::from("/tmp/out"),
            BuildVerbosity::Minimal,
        );

        let mono = ToolchainProfile::new(ToolchainVariant::Mono, PathBuf::from("xbuild"));
        assert_eq!(props.joined_defines(&mono), "PYTHON27,UCS4");
        assert_eq!(props.configuration_name(&mono), "ReleaseMono");

        let msbuild =
            ToolchainProfile::new(ToolchainVariant::MsBuild, PathBuf::from("msbuild.exe"));
        assert_eq!(props.joined_defines(&msbuild), "PYTHON27;UCS4");
        assert_eq!(props.configuration_name(&msbuild), "ReleaseWin");
    }

    #[test]
    fn test_parse_probe_output() {
        let parsed =
            PythonInterpreter::parse_probe("3\n11\n1114111\n-lpython3.11\n").unwrap();
        assert_eq!(parsed.version, (3, 11));
        assert_eq!(parsed.max_unicode, 1114111);
        assert_eq!(parsed.link_library.as_deref(), Some("-lpython3.11"));
    }

    #[test]
    fn test_parse_probe_empty_link_library() {
        let parsed = PythonInterpreter::parse_probe("2\n7\n65535\n\n").unwrap();
        assert_eq!(parsed.version, (2, 7));
        assert_eq!(parsed.link_library, None);
    }

    #[test]
    fn test_verbosity_parse() {
        assert_eq!(
            "minimal".parse::<BuildVerbosity>().unwrap(),
            BuildVerbosity::Minimal
        );
        assert!("loud".parse::<BuildVerbosity>().is_err());
    }
}
