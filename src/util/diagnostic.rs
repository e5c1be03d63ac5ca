//! User-friendly diagnostic messages.
//!
//! Every fatal error should carry the root cause plus a suggested fix where
//! one exists; the captured tool output rides along for diagnosis.

use std::fmt;
use std::path::PathBuf;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when no manifest file is found.
    pub const NO_MANIFEST: &str =
        "help: Run slipway from the project root containing Slipway.toml";

    /// Suggestion when msbuild cannot be located.
    pub const MSBUILD_NOT_FOUND: &str =
        "help: Install a .NET SDK or Visual Studio Build Tools with MSBuild";

    /// Suggestion when xbuild or mono is missing.
    pub const MONO_NOT_FOUND: &str =
        "help: Install Mono and ensure `xbuild` and `mono` are on PATH";

    /// Suggestion when pkg-config queries fail.
    pub const PKG_CONFIG_FAILED: &str =
        "help: Install pkg-config plus the mono-2 and glib-2.0 development packages";

    /// Suggestion when the solution build fails.
    pub const BUILD_FAILED: &str =
        "help: Re-run with `--verbosity detailed` for the full tool log";
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A diagnostic message with optional context and suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub message: String,
    pub severity: Severity,
    /// Additional context lines (typically captured tool output).
    pub context: Vec<String>,
    /// Suggested fixes.
    pub suggestions: Vec<String>,
    /// Related location (file path).
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity: Severity::Error,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity: Severity::Warning,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add a file location.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if let Some(ref location) = self.location {
            write!(f, "\n  --> {}", location.display())?;
        }
        for line in &self.context {
            for sub in line.lines() {
                write!(f, "\n  {}", sub)?;
            }
        }
        for suggestion in &self.suggestions {
            write!(f, "\n{}", suggestion)?;
        }
        Ok(())
    }
}
