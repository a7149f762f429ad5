// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.
//!
//! External tools are replaced by [`FakeRunner`], which records every command
//! and answers with a scripted [`ProcessOutput`]. The `simulate_*` handlers
//! mimic the side effects the real tools have on disk.

#![allow(dead_code)]

use cppcheck_formula::Result;
use cppcheck_formula::recipe::kitchen::{CommandSpec, ProcessOutput, ProcessRunner};
use cppcheck_formula::recipe::{DependencyLocator, DependencySpec, InstallationLayout, LocatedDependency};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Addon scripts `make install` drops next to the binary
pub const ADDONS: &[&str] = &["cert.py", "cppcheckdata.py", "misra.py"];

/// Dump of the smoke-test program, trimmed to what the addon check reads
pub const SAMPLE_DUMP: &str = r#"<?xml version="1.0"?>
<dumps>
  <dump cfg="">
    <tokenlist>
      <token id="0x1" str="int" linenr="4"/>
      <token id="0x2" str="main" linenr="4"/>
      <token id="0x3" str="(" linenr="4"/>
      <token id="0x4" str=")" linenr="4"/>
    </tokenlist>
    <scopes>
      <scope id="0x10" type="Global">
        <functionList>
          <function id="0x20" name="main"/>
        </functionList>
      </scope>
      <scope id="0x11" type="Class" className="Example">
        <functionList>
          <function id="0x21" name="GetNumber"/>
          <function id="0x22" name="Example"/>
        </functionList>
      </scope>
    </scopes>
  </dump>
</dumps>
"#;

type Handler = Box<dyn Fn(&CommandSpec) -> ProcessOutput>;

/// Process runner that records commands and answers from a handler
pub struct FakeRunner {
    handler: Handler,
    calls: Mutex<Vec<CommandSpec>>,
}

impl FakeRunner {
    pub fn new(handler: impl Fn(&CommandSpec) -> ProcessOutput + 'static) -> Arc<Self> {
        Arc::new(Self {
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    /// Command lines in the order they ran
    pub fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(|c| c.to_string()).collect()
    }
}

impl ProcessRunner for FakeRunner {
    fn run(&self, command: &CommandSpec) -> Result<ProcessOutput> {
        self.calls.lock().unwrap().push(command.clone());
        Ok((self.handler)(command))
    }
}

pub fn ok(stdout: &str) -> ProcessOutput {
    ProcessOutput {
        exit_code: Some(0),
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

pub fn fail(code: i32, stderr: &str) -> ProcessOutput {
    ProcessOutput {
        exit_code: Some(code),
        stdout: String::new(),
        stderr: stderr.to_string(),
    }
}

fn param<'a>(cmd: &'a CommandSpec, key: &str) -> Option<&'a str> {
    cmd.args.iter().find_map(|a| a.strip_prefix(key))
}

/// Side effects of the upstream makefiles and the GUI build
pub fn simulate_build(cmd: &CommandSpec) -> ProcessOutput {
    let cwd = cmd.current_dir.clone().unwrap_or_default();

    if cmd.args.iter().any(|a| a == "install") {
        let bin = PathBuf::from(param(cmd, "BIN=").unwrap());
        fs::create_dir_all(&bin).unwrap();
        fs::write(bin.join("cppcheck"), "#!/bin/sh\n").unwrap();
        for addon in ADDONS {
            fs::write(bin.join(addon), "# addon\n").unwrap();
        }

        let destdir = PathBuf::from(param(cmd, "DESTDIR=").unwrap());
        let cfgdir = param(cmd, "CFGDIR=").unwrap().trim_start_matches('/');
        let cfg = destdir.join(cfgdir);
        fs::create_dir_all(&cfg).unwrap();
        fs::write(cfg.join("std.cfg"), "<def/>\n").unwrap();
        return ok("install -d /cfg\n");
    }

    if cmd.program == "make" && cmd.args.is_empty() && cwd.ends_with("gui") {
        let macos = cwd.join("cppcheck-gui.app/Contents/MacOS");
        fs::create_dir_all(&macos).unwrap();
        fs::write(macos.join("cppcheck-gui"), "gui").unwrap();
    }

    ok("")
}

/// Output of the installed analyzer and the sample addon
pub fn simulate_analyzer(cmd: &CommandSpec) -> ProcessOutput {
    let cwd = cmd.current_dir.clone().unwrap_or_default();
    let args: Vec<&str> = cmd.args.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["--dump", file] => {
            fs::write(cwd.join(format!("{}.dump", file)), SAMPLE_DUMP).unwrap();
            ok(&format!("Checking {} ...\n", file))
        }
        ["testcheck.cpp"] => ProcessOutput {
            exit_code: Some(0),
            stdout: "Checking testcheck.cpp ...\n".to_string(),
            stderr: "[testcheck.cpp:4]: (error) Array 'a[10]' accessed at index 10, which is out of bounds.\n"
                .to_string(),
        },
        [script, _dump] if script.ends_with(".py") => ok("main,GetNumber,Example\n55\n"),
        [file] => ok(&format!("Checking {} ...\n", file)),
        _ => fail(1, "unexpected invocation"),
    }
}

/// Locator that places every dependency under a fixed root
pub struct FixedLocator {
    pub root: PathBuf,
}

impl DependencyLocator for FixedLocator {
    fn locate(&self, dep: &DependencySpec) -> Result<Option<LocatedDependency>> {
        Ok(Some(LocatedDependency {
            name: dep.name.to_string(),
            path: self.root.join(dep.name),
        }))
    }
}

/// Locator that reports one dependency as missing
pub struct MissingLocator {
    pub missing: &'static str,
}

impl DependencyLocator for MissingLocator {
    fn locate(&self, dep: &DependencySpec) -> Result<Option<LocatedDependency>> {
        if dep.name == self.missing {
            return Ok(None);
        }
        Ok(Some(LocatedDependency {
            name: dep.name.to_string(),
            path: PathBuf::from("/opt").join(dep.name),
        }))
    }
}

/// Create an unpacked source tree with a top-level Makefile and a GUI project.
///
/// Returns (TempDir, source_dir, layout) - keep the TempDir alive to prevent cleanup.
pub fn setup_source_tree() -> (TempDir, PathBuf, InstallationLayout) {
    let temp = tempfile::tempdir().unwrap();
    let source = temp.path().join("cppcheck-1.80");
    fs::create_dir_all(source.join("gui")).unwrap();
    fs::write(source.join("Makefile"), "all:\n").unwrap();
    fs::write(source.join("gui/gui.pro"), "TEMPLATE = app\n").unwrap();

    let layout = InstallationLayout::new(temp.path().join("Cellar/cppcheck/1.80"));
    (temp, source, layout)
}

/// Create a prefix that already has the analyzer installed
pub fn setup_installed_prefix() -> (TempDir, InstallationLayout) {
    let temp = tempfile::tempdir().unwrap();
    let layout = InstallationLayout::new(temp.path().join("prefix"));
    fs::create_dir_all(&layout.bin_dir).unwrap();
    fs::write(layout.binary(), "#!/bin/sh\n").unwrap();
    (temp, layout)
}

pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}
