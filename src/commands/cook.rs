// src/commands/cook.rs

//! Plan and install commands - build cppcheck from an unpacked source tree

use super::info::print_options;
use super::parse_options;
use crate::cli::BuildArgs;
use anyhow::{Context, Result};
use cppcheck_formula::config::Config;
use cppcheck_formula::formula;
use cppcheck_formula::recipe::Kitchen;
use std::path::Path;
use tracing::info;

fn load_config(path: Option<&str>) -> Result<Config> {
    let path = path.map(Path::new);
    Config::load_optional(path).with_context(|| match path {
        Some(p) => format!("Failed to load config: {}", p.display()),
        None => "Failed to load default config".to_string(),
    })
}

/// Print the invocations a build would run
pub fn cmd_plan(args: &BuildArgs) -> Result<()> {
    let options = parse_options(&args.options.options)?;
    let config = load_config(args.config.as_deref())?;
    let layout = config.layout(args.prefix.as_deref().map(Path::new));
    let kitchen = Kitchen::new(config.kitchen_config(None));

    print_options(&options);
    let preparation = kitchen
        .prepare(&options, &layout, Path::new(&args.source))
        .with_context(|| format!("Failed to plan build of {}", formula::NAME))?;

    for dep in &preparation.located {
        println!("Dependency: {} -> {}", dep.name, dep.path.display());
    }
    for invocation in &preparation.invocations {
        println!(
            "[{}] (cd {} && {})",
            invocation.step,
            invocation.working_directory.display(),
            invocation.command_line()
        );
    }
    Ok(())
}

/// Build, install and stage into the prefix
pub fn cmd_install(args: &BuildArgs, jobs: Option<u32>) -> Result<()> {
    let options = parse_options(&args.options.options)?;
    let config = load_config(args.config.as_deref())?;
    let layout = config.layout(args.prefix.as_deref().map(Path::new));
    let kitchen = Kitchen::new(config.kitchen_config(jobs));
    let source = Path::new(&args.source);

    println!("Installing {} {} from {}", formula::NAME, formula::VERSION, source.display());
    print_options(&options);
    println!("Prefix: {}", layout.prefix.display());
    println!("Cooking with {} parallel jobs...", kitchen.config().jobs);

    let result = kitchen
        .cook(&options, &layout, source)
        .with_context(|| format!("Failed to install {}", formula::NAME))?;

    for warning in &result.warnings {
        println!("Warning: {}", warning);
    }
    info!("Build log is {} bytes", result.log.len());

    println!("\n[COMPLETE] Ran {} build step(s)", result.steps.len());
    println!("  Binary: {}", layout.binary().display());
    println!("  Addons: {} in {}", result.staged.addons.len(), layout.addons_dir().display());
    if let Some(bundle) = &result.staged.gui_bundle {
        println!("  GUI:    {}", bundle.display());
    }
    Ok(())
}
