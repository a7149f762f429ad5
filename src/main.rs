// src/main.rs

mod cli;
mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use std::io;

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Info) => commands::cmd_info(),
        Some(Commands::Deps { options }) => commands::cmd_deps(&options.options),
        Some(Commands::Plan { build }) => commands::cmd_plan(&build),
        Some(Commands::Install { build, jobs }) => commands::cmd_install(&build, jobs),
        Some(Commands::Test {
            prefix,
            config,
            workdir,
        }) => commands::cmd_test(prefix.as_deref(), config.as_deref(), workdir.as_deref()),
        Some(Commands::DumpSummary { file }) => commands::cmd_dump_summary(&file),
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => {
            println!("cppcheck-formula v{}", env!("CARGO_PKG_VERSION"));
            println!("Run 'cppcheck-formula --help' for usage information");
            Ok(())
        }
    }
}
