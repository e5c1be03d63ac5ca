//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Slipway - build orchestration for the pythonnet solution
#[derive(Parser)]
#[command(name = "slipway")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Restore packages, build the solution, and compile the native shim
    Build(BuildArgs),

    /// Restore packages for the eligible subprojects only
    Restore(RestoreArgs),

    /// Copy recognized build artifacts into a destination directory
    Install(InstallArgs),

    /// Check the environment for the tools a build needs
    Doctor(DoctorArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// Build the Debug configuration
    #[arg(long, conflicts_with = "configuration")]
    pub debug: bool,

    /// Solution configuration (release or debug)
    #[arg(short, long)]
    pub configuration: Option<String>,

    /// Solution platform (x64 or x86; defaults to the host)
    #[arg(long)]
    pub platform: Option<String>,

    /// Build tool verbosity (quiet, minimal, normal, detailed, diagnostic)
    #[arg(long)]
    pub verbosity: Option<String>,

    /// Python interpreter to probe and embed
    #[arg(long)]
    pub python: Option<PathBuf>,

    /// Toolchain override (msbuild or xbuild)
    #[arg(long)]
    pub toolchain: Option<String>,

    /// Output directory override
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
pub struct RestoreArgs {
    /// Toolchain override (msbuild or xbuild)
    #[arg(long)]
    pub toolchain: Option<String>,
}

#[derive(Args)]
pub struct InstallArgs {
    /// Destination directory for the artifacts
    pub dest: PathBuf,

    /// Build output directory to install from (defaults to the configured one)
    #[arg(long)]
    pub build_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct DoctorArgs {
    /// Toolchain override (msbuild or xbuild)
    #[arg(long)]
    pub toolchain: Option<String>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
