//! Solution build: Clean, then Build, through the resolved build tool.

use crate::builder::errors::OrchestrationError;
use crate::core::layout::ProjectLayout;
use crate::core::profile::ToolchainProfile;
use crate::core::properties::BuildProperties;
use crate::util::process::{CommandRunner, ProcessBuilder};

pub struct SolutionBuilder<'a> {
    runner: &'a dyn CommandRunner,
    layout: &'a ProjectLayout,
    profile: &'a ToolchainProfile,
}

impl<'a> SolutionBuilder<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        layout: &'a ProjectLayout,
        profile: &'a ToolchainProfile,
    ) -> Self {
        SolutionBuilder {
            runner,
            layout,
            profile,
        }
    }

    /// Clean and build the solution. A failed Clean aborts before Build is
    /// attempted; neither target is retried.
    pub fn build(&self, props: &BuildProperties) -> Result<(), OrchestrationError> {
        std::fs::create_dir_all(&props.output_dir).map_err(|source| {
            OrchestrationError::Io {
                path: props.output_dir.clone(),
                source,
            }
        })?;

        for target in ["Clean", "Build"] {
            self.invoke(props, target)?;
        }
        Ok(())
    }

    fn invoke(&self, props: &BuildProperties, target: &str) -> Result<(), OrchestrationError> {
        let cmd = self.command(props, target);
        eprintln!("    Building {} /t:{}", self.layout.solution.display(), target);
        tracing::info!("running `{}`", cmd.display_command());

        let output = self.runner.run(&cmd).map_err(|e| OrchestrationError::Build {
            command: cmd.display_command(),
            target: target.to_string(),
            code: None,
            output: format!("{:#}", e),
        })?;

        if !output.success() {
            return Err(OrchestrationError::Build {
                command: cmd.display_command(),
                target: target.to_string(),
                code: output.code,
                output: output.merged(),
            });
        }
        Ok(())
    }

    /// Build tool invocation for one target; the other parameters are shared
    /// between Clean and Build.
    pub fn command(&self, props: &BuildProperties, target: &str) -> ProcessBuilder {
        ProcessBuilder::new(&self.profile.tool)
            .arg(&self.layout.solution)
            .arg(format!(
                "/p:Configuration={}",
                props.configuration_name(self.profile)
            ))
            .arg(format!("/p:Platform={}", props.platform))
            .arg(format!(
                "/p:DefineConstants=\"{}\"",
                props.joined_defines(self.profile)
            ))
            .arg(format!(
                "/p:{}={}",
                self.layout.output_dir_property,
                props.output_dir.display()
            ))
            .arg(format!("/verbosity:{}", props.verbosity))
            .arg(format!("/t:{}", target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::ToolchainVariant;
    use crate::core::properties::{BuildVerbosity, Configuration, PythonInterpreter};
    use crate::test_support::{CommandPattern, MockRunner};
    use crate::util::process::ExecOutput;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn props(output_dir: PathBuf) -> BuildProperties {
        let interpreter = PythonInterpreter {
            version: (2, 7),
            max_unicode: 0x10FFFF,
            link_library: None,
        };
        BuildProperties::new(
            Configuration::Release,
            &interpreter,
            "x64".to_string(),
            output_dir,
            BuildVerbosity::Minimal,
        )
    }

    fn setup(tmp: &TempDir) -> (ProjectLayout, ToolchainProfile) {
        let layout = ProjectLayout::from_config(tmp.path(), &Default::default(), None);
        let profile = ToolchainProfile::new(ToolchainVariant::Mono, PathBuf::from("xbuild"));
        (layout, profile)
    }

    #[test]
    fn test_command_shape() {
        let tmp = TempDir::new().unwrap();
        let (layout, profile) = setup(&tmp);
        let runner = MockRunner::new();
        let builder = SolutionBuilder::new(&runner, &layout, &profile);
        let props = props(tmp.path().join("build"));

        let cmd = builder.command(&props, "Build");
        let display = cmd.display_command();
        assert!(display.starts_with("xbuild"));
        assert!(display.contains("pythonnet.sln"));
        assert!(display.contains("/p:Configuration=ReleaseMono"));
        assert!(display.contains("/p:Platform=x64"));
        assert!(display.contains("/p:DefineConstants=\"PYTHON27,UCS4\""));
        assert!(display.contains("/p:PythonBuildDir="));
        assert!(display.contains("/verbosity:minimal"));
        assert!(display.ends_with("/t:Build"));
    }

    #[test]
    fn test_clean_runs_before_build() {
        let tmp = TempDir::new().unwrap();
        let (layout, profile) = setup(&tmp);
        let runner = MockRunner::new();
        let builder = SolutionBuilder::new(&runner, &layout, &profile);

        builder.build(&props(tmp.path().join("build"))).unwrap();

        let invocations = runner.invocations();
        assert_eq!(invocations.len(), 2);
        assert!(invocations[0].ends_with("/t:Clean"));
        assert!(invocations[1].ends_with("/t:Build"));
        assert!(tmp.path().join("build").is_dir());
    }

    #[test]
    fn test_clean_failure_skips_build() {
        let tmp = TempDir::new().unwrap();
        let (layout, profile) = setup(&tmp);
        let mut runner = MockRunner::new();
        runner.expect(
            CommandPattern::Contains("/t:Clean".to_string()),
            ExecOutput::err(1, "MSB1009: Project file does not exist"),
        );
        let builder = SolutionBuilder::new(&runner, &layout, &profile);

        let err = builder.build(&props(tmp.path().join("build"))).unwrap_err();
        match err {
            OrchestrationError::Build {
                target,
                code,
                output,
                ..
            } => {
                assert_eq!(target, "Clean");
                assert_eq!(code, Some(1));
                assert!(output.contains("MSB1009"));
            }
            other => panic!("unexpected error: {other}"),
        }
        // the Build target was never invoked
        assert_eq!(runner.invocations().len(), 1);
    }
}
