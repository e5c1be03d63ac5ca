//! `slipway build` command

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::BuildArgs;
use slipway::core::properties::{BuildVerbosity, Configuration};
use slipway::ops::slipway_build::{build, BuildOptions};
use slipway::util::process::SystemRunner;

pub fn execute(args: BuildArgs) -> Result<()> {
    let (config, layout) = super::load_project(args.out)?;

    // CLI overrides config; config overrides the defaults
    let configuration = if args.debug {
        Configuration::Debug
    } else {
        args.configuration
            .as_deref()
            .or(config.build.configuration.as_deref())
            .map(|s| s.parse::<Configuration>())
            .transpose()
            .map_err(|e| anyhow::anyhow!("{}", e))?
            .unwrap_or_default()
    };

    let verbosity = args
        .verbosity
        .as_deref()
        .or(config.build.verbosity.as_deref())
        .map(|s| s.parse::<BuildVerbosity>())
        .transpose()
        .map_err(|e| anyhow::anyhow!("{}", e))?
        .unwrap_or_default();

    let opts = BuildOptions {
        configuration,
        verbosity,
        platform: args.platform.or_else(|| config.build.platform.clone()),
        python: args
            .python
            .or_else(|| config.build.python.clone())
            .unwrap_or_else(|| PathBuf::from("python")),
        toolchain: args.toolchain.or_else(|| config.build.toolchain.clone()),
    };

    let outcome = build(&layout, &opts, &SystemRunner)?;

    eprintln!(
        "    Finished {} {} build -> {}",
        configuration,
        outcome.profile.variant,
        outcome.output_dir.display()
    );

    Ok(())
}
