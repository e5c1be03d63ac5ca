//! Slipway - build orchestrator for the clr Python extension module
//!
//! This crate drives an external multi-project solution build (msbuild on
//! Windows, xbuild under Mono elsewhere), restores NuGet packages for the
//! eligible subprojects beforehand, compiles the monoclr shim on the Mono
//! path, and installs the recognized artifacts.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and mocks for slipway unit tests.
///
/// Only compiled for tests. Provides a mock command runner and project
/// fixtures so orchestration logic can be exercised without invoking real
/// build tools.
#[cfg(test)]
pub mod test_support;

pub use self::core::layout::{ProjectLayout, SubprojectDescriptor};
pub use self::core::profile::{ToolchainProfile, ToolchainVariant};
pub use self::core::properties::{BuildProperties, Configuration, PythonInterpreter};
pub use self::util::config::Config;
