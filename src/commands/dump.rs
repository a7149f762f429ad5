// src/commands/dump.rs

//! Dump-summary command

use anyhow::{Context, Result};
use cppcheck_formula::dump::parse_dump_file;
use std::path::Path;

pub fn cmd_dump_summary(file: &str) -> Result<()> {
    let path = Path::new(file);
    let dump = parse_dump_file(path)
        .with_context(|| format!("Failed to read dump: {}", path.display()))?;

    println!("{}: {} configuration(s)", path.display(), dump.configurations.len());
    for config in &dump.configurations {
        let name = if config.cfg.is_empty() { "<default>" } else { config.cfg.as_str() };
        println!("  [{}]", name);
        println!("    tokens:    {}", config.token_count());
        println!("    functions: {}", config.function_names());
    }
    Ok(())
}
