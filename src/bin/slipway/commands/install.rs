//! `slipway install` command

use anyhow::Result;

use crate::cli::InstallArgs;
use slipway::ops::slipway_install::{install, InstallOptions};

pub fn execute(args: InstallArgs) -> Result<()> {
    let (_config, layout) = super::load_project(args.build_dir)?;

    let opts = InstallOptions {
        install_dir: args.dest.clone(),
    };
    let outcome = install(&layout, &opts)?;

    eprintln!(
        "   Installed {} artifact(s) -> {}",
        outcome.copied,
        args.dest.display()
    );
    for script in &outcome.scripts {
        eprintln!("      script {}", script.display());
    }

    Ok(())
}
