//! Core data model: toolchain profiles, build properties, project layout.

pub mod layout;
pub mod profile;
pub mod properties;
