//! Native shim build for the Mono toolchain.
//!
//! After the solution build succeeds, this compiles the monoclr shim sources
//! twice: once into the loadable `clr` extension module, and once into the
//! standalone `npython` launcher that embeds the interpreter. Compile and
//! link flags come from pkg-config; the launcher additionally links the
//! interpreter's own link library. The module is written under the exact
//! name msbuild would produce, so installation never branches on the
//! toolchain.

use std::path::{Path, PathBuf};

use crate::builder::errors::OrchestrationError;
use crate::core::layout::ProjectLayout;
use crate::core::properties::{BuildProperties, PythonInterpreter};
use crate::util::process::{find_c_compiler, CommandRunner, ProcessBuilder};

/// Everything needed to compile and link the shim artifacts.
#[derive(Debug, Clone)]
pub struct NativeShimSpec {
    /// Discovered compiler flags, in library order.
    pub compile_flags: Vec<String>,
    /// Discovered linker flags, in library order.
    pub link_flags: Vec<String>,
    /// Translation units of the extension module.
    pub module_sources: Vec<PathBuf>,
    /// Translation units of the companion executable.
    pub executable_sources: Vec<PathBuf>,
}

/// Query pkg-config for the link and compile flags of each library, in
/// order. Each category is concatenated space-joined, preserving library
/// order, then split back into argument lists.
pub fn query_shim_flags(
    runner: &dyn CommandRunner,
    libraries: &[String],
) -> Result<(Vec<String>, Vec<String>), OrchestrationError> {
    let mut link_parts = Vec::new();
    let mut compile_parts = Vec::new();

    for library in libraries {
        link_parts.push(pkg_config(runner, library, "--libs")?);
        compile_parts.push(pkg_config(runner, library, "--cflags")?);
    }

    let split = |parts: Vec<String>| -> Vec<String> {
        parts
            .join(" ")
            .split_whitespace()
            .map(str::to_string)
            .collect()
    };
    Ok((split(compile_parts), split(link_parts)))
}

fn pkg_config(
    runner: &dyn CommandRunner,
    library: &str,
    flag: &str,
) -> Result<String, OrchestrationError> {
    let cmd = ProcessBuilder::new("pkg-config").arg(flag).arg(library);
    let output = runner.run(&cmd).map_err(|e| OrchestrationError::ToolQuery {
        library: library.to_string(),
        code: None,
        output: format!("{:#}", e),
    })?;
    if !output.success() {
        return Err(OrchestrationError::ToolQuery {
            library: library.to_string(),
            code: output.code,
            output: output.merged(),
        });
    }
    Ok(output.stdout.trim().to_string())
}

pub struct NativeShimBuilder<'a> {
    runner: &'a dyn CommandRunner,
    layout: &'a ProjectLayout,
    props: &'a BuildProperties,
    interpreter: &'a PythonInterpreter,
    /// Companion executable name from the resolved profile.
    companion_exe: &'a str,
}

impl<'a> NativeShimBuilder<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        layout: &'a ProjectLayout,
        props: &'a BuildProperties,
        interpreter: &'a PythonInterpreter,
        companion_exe: &'a str,
    ) -> Self {
        NativeShimBuilder {
            runner,
            layout,
            props,
            interpreter,
            companion_exe,
        }
    }

    /// Discover flags, then build the extension module and the companion
    /// executable into the solution output directory.
    pub fn build(&self) -> Result<(), OrchestrationError> {
        let (compile_flags, link_flags) =
            query_shim_flags(self.runner, &self.layout.shim_libraries)?;

        let spec = NativeShimSpec {
            compile_flags,
            link_flags,
            module_sources: vec![self.layout.shim.init.clone(), self.layout.shim.module.clone()],
            executable_sources: vec![
                self.layout.shim.init.clone(),
                self.layout.shim.executable.clone(),
            ],
        };

        let cc = find_c_compiler().ok_or_else(|| OrchestrationError::NativeBuild {
            message: "no C compiler found (set CC or install gcc/clang)".to_string(),
            output: String::new(),
        })?;

        self.build_module(&cc, &spec)?;
        self.build_executable(&cc, &spec)
    }

    fn build_module(&self, cc: &Path, spec: &NativeShimSpec) -> Result<(), OrchestrationError> {
        let objects = self.compile_all(cc, &spec.module_sources, &spec.compile_flags)?;

        let module = self
            .props
            .output_dir
            .join(self.layout.extension_module_file());
        eprintln!("     Linking {}", module.display());
        let cmd = ProcessBuilder::new(cc)
            .arg("-shared")
            .args(&objects)
            .arg("-o")
            .arg(&module)
            .args(&spec.link_flags);
        self.run_native(cmd, "linking extension module")
    }

    fn build_executable(&self, cc: &Path, spec: &NativeShimSpec) -> Result<(), OrchestrationError> {
        let objects = self.compile_all(cc, &spec.executable_sources, &spec.compile_flags)?;

        let exe = self.props.output_dir.join(self.companion_exe);
        eprintln!("     Linking {}", exe.display());
        let mut cmd = ProcessBuilder::new(cc)
            .args(&objects)
            .arg("-o")
            .arg(&exe)
            .args(&spec.link_flags);
        if let Some(ref bld_library) = self.interpreter.link_library {
            cmd = cmd.args(bld_library.split_whitespace());
        }
        self.run_native(cmd, "linking companion executable")
    }

    /// Compile each source into the shared object directory, returning the
    /// object paths in source order. Objects are name-keyed so the module
    /// and executable passes share the init object's slot without clashing.
    fn compile_all(
        &self,
        cc: &Path,
        sources: &[PathBuf],
        compile_flags: &[String],
    ) -> Result<Vec<PathBuf>, OrchestrationError> {
        let obj_dir = self.props.output_dir.join("obj");
        std::fs::create_dir_all(&obj_dir).map_err(|source| OrchestrationError::Io {
            path: obj_dir.clone(),
            source,
        })?;

        let mut objects = Vec::new();
        for source in sources {
            let stem = source
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "shim".to_string());
            let object = obj_dir.join(format!("{}.o", stem));

            eprintln!("   Compiling {}", source.display());
            let cmd = ProcessBuilder::new(cc)
                .arg("-c")
                .arg("-fPIC")
                .arg(source)
                .arg("-o")
                .arg(&object)
                .args(compile_flags);
            self.run_native(cmd, "compiling shim source")?;
            objects.push(object);
        }
        Ok(objects)
    }

    fn run_native(
        &self,
        cmd: ProcessBuilder,
        step: &str,
    ) -> Result<(), OrchestrationError> {
        tracing::info!("running `{}`", cmd.display_command());
        let output = self
            .runner
            .run(&cmd)
            .map_err(|e| OrchestrationError::NativeBuild {
                message: format!("{} (`{}`)", step, cmd.display_command()),
                output: format!("{:#}", e),
            })?;
        if !output.success() {
            return Err(OrchestrationError::NativeBuild {
                message: format!(
                    "{} (`{}` exited with {:?})",
                    step,
                    cmd.display_command(),
                    output.code
                ),
                output: output.merged(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{CommandPattern, MockRunner};
    use crate::util::process::ExecOutput;

    fn libs() -> Vec<String> {
        vec!["mono-2".to_string(), "glib-2.0".to_string()]
    }

    #[test]
    fn test_query_shim_flags_preserves_library_order() {
        let mut runner = MockRunner::new();
        runner.expect(
            CommandPattern::Exact("pkg-config --libs mono-2".to_string()),
            ExecOutput::ok("-lmono-2.0 -lm\n"),
        );
        runner.expect(
            CommandPattern::Exact("pkg-config --cflags mono-2".to_string()),
            ExecOutput::ok("-I/usr/include/mono-2.0\n"),
        );
        runner.expect(
            CommandPattern::Exact("pkg-config --libs glib-2.0".to_string()),
            ExecOutput::ok("-lglib-2.0\n"),
        );
        runner.expect(
            CommandPattern::Exact("pkg-config --cflags glib-2.0".to_string()),
            ExecOutput::ok("-I/usr/include/glib-2.0\n"),
        );

        let (cflags, ldflags) = query_shim_flags(&runner, &libs()).unwrap();
        assert_eq!(
            cflags,
            vec!["-I/usr/include/mono-2.0", "-I/usr/include/glib-2.0"]
        );
        assert_eq!(ldflags, vec!["-lmono-2.0", "-lm", "-lglib-2.0"]);
    }

    #[test]
    fn test_query_failure_is_tool_query_error() {
        let mut runner = MockRunner::new();
        runner.expect(
            CommandPattern::Contains("mono-2".to_string()),
            ExecOutput::err(1, "No package 'mono-2' found"),
        );

        let err = query_shim_flags(&runner, &libs()).unwrap_err();
        match err {
            OrchestrationError::ToolQuery {
                library,
                code,
                output,
            } => {
                assert_eq!(library, "mono-2");
                assert_eq!(code, Some(1));
                assert!(output.contains("No package"));
            }
            other => panic!("unexpected error: {other}"),
        }
        // the first failed query aborts before glib is consulted
        assert_eq!(runner.invocations().len(), 1);
    }
}
