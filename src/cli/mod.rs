// src/cli/mod.rs
//! CLI definitions for cppcheck-formula
//!
//! This module contains the command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.
//!
//! - `info` / `deps` / `plan` - Inspect the recipe without building
//! - `install` - Build, install and stage into a prefix
//! - `test` - Run the acceptance suite against an installed prefix
//! - `dump-summary` - Read a cppcheck dump file
//! - `completions` - Shell completion scripts

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "cppcheck-formula")]
#[command(author = "cppcheck-formula Contributors")]
#[command(version)]
#[command(about = "Build, install and acceptance-test recipe for cppcheck", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Feature flags shared by the commands that resolve options
#[derive(Args, Debug, Clone, Default)]
pub struct OptionArgs {
    /// Feature flag, e.g. with-qt or without-rules (repeatable)
    #[arg(short = 'O', long = "option", value_name = "FLAG", allow_hyphen_values = true)]
    pub options: Vec<String>,
}

/// Source tree, prefix and config file for build commands
#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    #[command(flatten)]
    pub options: OptionArgs,

    /// Unpacked cppcheck source tree
    #[arg(short, long)]
    pub source: String,

    /// Installation prefix (default: /usr/local/Cellar/cppcheck/<version>)
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Configuration file
    #[arg(short, long)]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show formula metadata, options and dependencies
    Info,

    /// Show the dependencies required for a set of options
    Deps {
        #[command(flatten)]
        options: OptionArgs,
    },

    /// Print the build invocations without running them
    Plan {
        #[command(flatten)]
        build: BuildArgs,
    },

    /// Build, install and stage cppcheck into a prefix
    Install {
        #[command(flatten)]
        build: BuildArgs,

        /// Number of parallel jobs (default: available CPUs)
        #[arg(short, long)]
        jobs: Option<u32>,
    },

    /// Run the acceptance test against an installed prefix
    Test {
        /// Installation prefix (default: /usr/local/Cellar/cppcheck/<version>)
        #[arg(short, long)]
        prefix: Option<String>,

        /// Configuration file
        #[arg(short, long)]
        config: Option<String>,

        /// Directory for fixtures (default: a temporary directory)
        #[arg(short, long)]
        workdir: Option<String>,
    },

    /// Summarize a cppcheck dump file
    DumpSummary {
        /// Path to the .dump file
        file: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
