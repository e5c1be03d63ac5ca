//! Build orchestration components.
//!
//! One component per pipeline step: toolchain resolution, package restore,
//! solution build, the Mono-only native shim pass, artifact installation,
//! and launcher script relocation. Each receives the resolved
//! [`ToolchainProfile`](crate::core::profile::ToolchainProfile) explicitly
//! and performs its external invocations through a
//! [`CommandRunner`](crate::util::process::CommandRunner).

pub mod backend;
pub mod errors;
pub mod install;
pub mod locate;
pub mod restore;
pub mod scripts;
pub mod shim;
pub mod solution;

pub use backend::{backend_for, ToolchainBackend};
pub use errors::OrchestrationError;
pub use install::ArtifactInstaller;
pub use locate::{resolve_profile, resolve_variant, BuildToolLocator};
pub use restore::PackageRestorer;
pub use scripts::relocate_scripts;
pub use shim::NativeShimBuilder;
pub use solution::SolutionBuilder;
