//! Test utilities and mocks for slipway unit tests.
//!
//! The orchestration only touches the outside world through
//! [`CommandRunner`](crate::util::process::CommandRunner), so a mock runner
//! plus a scratch project tree is enough to exercise every pipeline step
//! without real build tools.

use std::path::Path;
use std::sync::Mutex;

use anyhow::Result;

use crate::util::process::{CommandRunner, ExecOutput, ProcessBuilder};

/// Pattern for matching commands in [`MockRunner`].
#[derive(Debug, Clone)]
pub enum CommandPattern {
    /// Exact match on the full displayed command.
    Exact(String),
    /// Match if the command starts with the prefix.
    StartsWith(String),
    /// Match if the command contains the substring.
    Contains(String),
    /// Match any command.
    Any,
}

impl CommandPattern {
    /// Check if this pattern matches the given command.
    pub fn matches(&self, cmd: &str) -> bool {
        match self {
            CommandPattern::Exact(s) => cmd == s,
            CommandPattern::StartsWith(s) => cmd.starts_with(s.as_str()),
            CommandPattern::Contains(s) => cmd.contains(s.as_str()),
            CommandPattern::Any => true,
        }
    }
}

type Effect = Box<dyn Fn(&ProcessBuilder) + Send>;

struct Expectation {
    pattern: CommandPattern,
    output: ExecOutput,
    effect: Option<Effect>,
}

/// Mock command runner recording every invocation.
///
/// Expectations are checked in registration order; the first matching one
/// wins and is not consumed. Unmatched commands succeed with empty output,
/// so tests only need to describe the interesting invocations.
#[derive(Default)]
pub struct MockRunner {
    expectations: Vec<Expectation>,
    invocations: Mutex<Vec<String>>,
}

impl MockRunner {
    pub fn new() -> Self {
        MockRunner::default()
    }

    /// Respond to matching commands with the given output.
    pub fn expect(&mut self, pattern: CommandPattern, output: ExecOutput) {
        self.expectations.push(Expectation {
            pattern,
            output,
            effect: None,
        });
    }

    /// Like [`expect`](Self::expect), additionally running a side effect
    /// (e.g. creating the file a tool would have written).
    pub fn expect_with(
        &mut self,
        pattern: CommandPattern,
        output: ExecOutput,
        effect: impl Fn(&ProcessBuilder) + Send + 'static,
    ) {
        self.expectations.push(Expectation {
            pattern,
            output,
            effect: Some(Box::new(effect)),
        });
    }

    /// Every command run so far, in order, as displayed strings.
    pub fn invocations(&self) -> Vec<String> {
        self.invocations.lock().unwrap().clone()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, cmd: &ProcessBuilder) -> Result<ExecOutput> {
        let display = cmd.display_command();
        self.invocations.lock().unwrap().push(display.clone());

        for expectation in &self.expectations {
            if expectation.pattern.matches(&display) {
                if let Some(ref effect) = expectation.effect {
                    effect(cmd);
                }
                return Ok(expectation.output.clone());
            }
        }
        Ok(ExecOutput::ok(""))
    }
}

/// Write a minimal solution project tree under `root`: manifest, solution
/// descriptor, subprojects (with package manifests), shim sources, and the
/// bundled nuget path.
pub fn scaffold_project(root: &Path) {
    use crate::core::layout::PACKAGE_MANIFEST;
    use std::fs;

    fs::write(root.join("Slipway.toml"), "").unwrap();
    fs::write(root.join("pythonnet.sln"), "").unwrap();

    for sub in ["runtime", "clrmodule", "monoclr"] {
        let dir = root.join("src").join(sub);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(PACKAGE_MANIFEST), "<packages/>").unwrap();
    }
    for shim in ["pynetinit.c", "clrmod.c", "python.c"] {
        fs::write(root.join("src").join("monoclr").join(shim), "/* shim */").unwrap();
    }

    let nuget_dir = root.join("tools").join("nuget");
    fs::create_dir_all(&nuget_dir).unwrap();
    fs::write(nuget_dir.join("nuget.exe"), "").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_runner_matches_in_registration_order() {
        let mut runner = MockRunner::new();
        runner.expect(
            CommandPattern::Contains("Clean".to_string()),
            ExecOutput::err(1, "boom"),
        );
        runner.expect(CommandPattern::Any, ExecOutput::ok("fine"));

        let clean = runner
            .run(&ProcessBuilder::new("xbuild").arg("/t:Clean"))
            .unwrap();
        assert!(!clean.success());

        let other = runner.run(&ProcessBuilder::new("xbuild")).unwrap();
        assert!(other.success());
        assert_eq!(runner.invocations().len(), 2);
    }
}
