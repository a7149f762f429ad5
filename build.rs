// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: repeatable feature flag
fn option_arg() -> Arg {
    Arg::new("option")
        .short('O')
        .long("option")
        .value_name("FLAG")
        .action(ArgAction::Append)
        .allow_hyphen_values(true)
        .help("Feature flag, e.g. with-qt or without-rules (repeatable)")
}

/// Common argument: installation prefix
fn prefix_arg() -> Arg {
    Arg::new("prefix")
        .short('p')
        .long("prefix")
        .help("Installation prefix (default: /usr/local/Cellar/cppcheck/<version>)")
}

/// Common argument: configuration file
fn config_arg() -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .help("Configuration file")
}

fn source_arg() -> Arg {
    Arg::new("source")
        .short('s')
        .long("source")
        .required(true)
        .help("Unpacked cppcheck source tree")
}

fn build_cli() -> Command {
    Command::new("cppcheck-formula")
        .version(env!("CARGO_PKG_VERSION"))
        .author("cppcheck-formula Contributors")
        .about("Build, install and acceptance-test recipe for cppcheck")
        .subcommand_required(false)
        .subcommand(Command::new("info").about("Show formula metadata, options and dependencies"))
        .subcommand(
            Command::new("deps")
                .about("Show the dependencies required for a set of options")
                .arg(option_arg()),
        )
        .subcommand(
            Command::new("plan")
                .about("Print the build invocations without running them")
                .arg(option_arg())
                .arg(source_arg())
                .arg(prefix_arg())
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("install")
                .about("Build, install and stage cppcheck into a prefix")
                .arg(option_arg())
                .arg(source_arg())
                .arg(prefix_arg())
                .arg(config_arg())
                .arg(
                    Arg::new("jobs")
                        .short('j')
                        .long("jobs")
                        .help("Number of parallel jobs (default: available CPUs)"),
                ),
        )
        .subcommand(
            Command::new("test")
                .about("Run the acceptance test against an installed prefix")
                .arg(prefix_arg())
                .arg(config_arg())
                .arg(
                    Arg::new("workdir")
                        .short('w')
                        .long("workdir")
                        .help("Directory for fixtures (default: a temporary directory)"),
                ),
        )
        .subcommand(
            Command::new("dump-summary")
                .about("Summarize a cppcheck dump file")
                .arg(Arg::new("file").required(true).help("Path to the .dump file")),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .required(true)
                        .value_parser(["bash", "elvish", "fish", "powershell", "zsh"])
                        .help("Shell type"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("cppcheck-formula.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
