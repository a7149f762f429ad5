// src/commands/info.rs

//! Info and deps commands - inspect the recipe without building

use super::parse_options;
use anyhow::Result;
use cppcheck_formula::formula;
use cppcheck_formula::recipe::{Feature, OptionSet, dependencies};
use strum::IntoEnumIterator;

/// Show formula metadata, options and declared dependencies
pub fn cmd_info() -> Result<()> {
    println!("{} {}", formula::NAME, formula::VERSION);
    println!("{}", formula::DESCRIPTION);
    println!("Homepage: {}", formula::HOMEPAGE);
    println!("Source:   {}", formula::SOURCE_URL);
    println!("SHA-256:  {}", formula::SOURCE_SHA256);
    println!("HEAD:     {}", formula::HEAD_URL);

    println!("\nOptions:");
    for feature in Feature::iter() {
        let default = if feature.default_enabled() { "on" } else { "off" };
        println!(
            "  {:<16} {} (default: {})",
            feature.toggle_flag().to_string(),
            feature.description(),
            default
        );
        let aliases = feature.deprecated_aliases();
        if !aliases.is_empty() {
            println!("  {:<16} deprecated: {}", "", aliases.join(", "));
        }
    }

    println!("\nDependencies:");
    for dep in dependencies::DEPENDENCIES {
        let condition = match dep.required_if {
            dependencies::Condition::Always => "always".to_string(),
            dependencies::Condition::With(feature) => format!("with {}", feature),
        };
        println!("  {:<8} {:<10} {}", dep.name, dep.kind.to_string(), condition);
    }

    Ok(())
}

/// Show the dependency set for the given flags
pub fn cmd_deps(flags: &[String]) -> Result<()> {
    let options = parse_options(flags)?;
    print_options(&options);

    let deps = dependencies::resolve(&options);
    println!("Dependencies ({}):", deps.len());
    for dep in deps {
        println!("  {} ({})", dep.name, dep.kind);
    }
    Ok(())
}

pub(super) fn print_options(options: &OptionSet) {
    let summary: Vec<String> = options
        .options()
        .iter()
        .map(|o| format!("{}={}", o.name(), if o.enabled { "yes" } else { "no" }))
        .collect();
    println!("Options: {}", summary.join(" "));
}
