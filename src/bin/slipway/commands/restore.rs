//! `slipway restore` command

use anyhow::Result;

use crate::cli::RestoreArgs;
use slipway::builder::locate::{locator_for, resolve_profile, resolve_variant};
use slipway::builder::{backend_for, PackageRestorer};
use slipway::util::process::SystemRunner;

pub fn execute(args: RestoreArgs) -> Result<()> {
    let (config, layout) = super::load_project(None)?;

    let toolchain = args.toolchain.or_else(|| config.build.toolchain.clone());
    let variant = resolve_variant(cfg!(windows), toolchain.as_deref())?;
    let runner = SystemRunner;
    let locator = locator_for(variant, &runner);
    let profile = resolve_profile(variant, locator.as_ref())?;
    let backend = backend_for(profile);

    let restored = PackageRestorer::new(&runner, &layout, backend.as_ref()).restore()?;

    eprintln!("    Restored packages for {} subproject(s)", restored);

    Ok(())
}
