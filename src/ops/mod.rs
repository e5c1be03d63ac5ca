//! High-level operations behind the CLI commands.

pub mod doctor;
pub mod slipway_build;
pub mod slipway_install;
