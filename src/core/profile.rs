//! Toolchain variants and the resolved toolchain profile.
//!
//! The two build backends are mutually exclusive: msbuild on Windows-like
//! hosts, xbuild (Mono) everywhere else. The profile is resolved exactly once
//! per run and passed explicitly into every component; nothing re-derives
//! platform facts from ambient state.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::builder::errors::OrchestrationError;

/// The active native build backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolchainVariant {
    /// msbuild.exe, located through the Windows registry.
    MsBuild,
    /// xbuild from a Mono installation, resolved via the search path.
    Mono,
}

impl ToolchainVariant {
    /// Pick the default variant for the host platform.
    pub fn for_host(windows_like: bool) -> Self {
        if windows_like {
            ToolchainVariant::MsBuild
        } else {
            ToolchainVariant::Mono
        }
    }

    /// Get the variant name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolchainVariant::MsBuild => "msbuild",
            ToolchainVariant::Mono => "xbuild",
        }
    }
}

impl fmt::Display for ToolchainVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolchainVariant {
    type Err = OrchestrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "msbuild" | "msdev" => Ok(ToolchainVariant::MsBuild),
            "xbuild" | "mono" => Ok(ToolchainVariant::Mono),
            other => Err(OrchestrationError::Configuration {
                name: other.to_string(),
            }),
        }
    }
}

/// Invocation parameters for the resolved toolchain.
///
/// Immutable once resolved; components read it rather than branching on the
/// host platform themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainProfile {
    /// Active backend variant.
    pub variant: ToolchainVariant,
    /// The build tool to invoke: an absolute msbuild.exe path, or the fixed
    /// `xbuild` command name left to the OS search path.
    pub tool: PathBuf,
    /// Separator used when joining preprocessor defines for the tool.
    pub define_separator: &'static str,
    /// Suffix appended to the configuration name (e.g. `ReleaseWin`).
    pub configuration_suffix: &'static str,
    /// Name of the standalone companion executable.
    pub companion_exe: &'static str,
}

impl ToolchainProfile {
    /// Assemble the profile for a variant with an already-located tool.
    pub fn new(variant: ToolchainVariant, tool: PathBuf) -> Self {
        match variant {
            ToolchainVariant::MsBuild => ToolchainProfile {
                variant,
                tool,
                define_separator: ";",
                configuration_suffix: "Win",
                companion_exe: "nPython.exe",
            },
            ToolchainVariant::Mono => ToolchainProfile {
                variant,
                tool,
                define_separator: ",",
                configuration_suffix: "Mono",
                companion_exe: "npython",
            },
        }
    }
}
