//! `slipway doctor` command

use anyhow::Result;

use crate::cli::DoctorArgs;
use slipway::builder::locate::resolve_variant;
use slipway::ops::doctor::run_checks;
use slipway::util::process::SystemRunner;

pub fn execute(args: DoctorArgs) -> Result<()> {
    let (config, layout) = super::load_project(None)?;

    let toolchain = args.toolchain.or_else(|| config.build.toolchain.clone());
    let variant = resolve_variant(cfg!(windows), toolchain.as_deref())?;

    let results = run_checks(&layout, variant, &SystemRunner);

    for check in &results {
        let mark = if check.passed { "ok" } else { "FAIL" };
        match check.path {
            Some(ref path) => {
                println!("{:>4}  {:<12} {} ({})", mark, check.name, check.message, path.display())
            }
            None => println!("{:>4}  {:<12} {}", mark, check.name, check.message),
        }
    }

    if results.iter().any(|c| c.required && !c.passed) {
        std::process::exit(1);
    }

    Ok(())
}
