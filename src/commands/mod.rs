// src/commands/mod.rs
//! Command handlers for the cppcheck-formula CLI

mod cook;
mod dump;
mod info;

// Re-export all command handlers
pub use cook::{cmd_install, cmd_plan};
pub use dump::cmd_dump_summary;
pub use info::{cmd_deps, cmd_info};
pub use test::cmd_test;

use anyhow::{Context, Result};
use cppcheck_formula::recipe::OptionSet;

/// Parse `-O` flags into an option set
pub(crate) fn parse_options(flags: &[String]) -> Result<OptionSet> {
    OptionSet::from_flags(flags).context("Invalid build options")
}
