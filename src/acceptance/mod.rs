// src/acceptance/mod.rs

//! Post-install acceptance test
//!
//! Runs the installed analyzer against small fixture programs and checks
//! that the addon data module can read its dump output. Checks run in order
//! and the first failure aborts the suite.

pub mod checks;
pub mod fixtures;

pub use checks::{AcceptanceCheck, CheckKind, Expectation, Invocation, Program, evaluate};

use crate::dump;
use crate::error::{Error, Result};
use crate::recipe::kitchen::{CommandSpec, ProcessRunner};
use crate::recipe::layout::InstallationLayout;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of one passed check
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub kind: CheckKind,
    /// Command lines that ran
    pub commands: Vec<String>,
}

/// Outcome of a full suite run
#[derive(Debug, Clone, Default)]
pub struct TestReport {
    pub results: Vec<CheckResult>,
}

impl TestReport {
    pub fn passed(&self) -> usize {
        self.results.len()
    }
}

/// The acceptance suite for one installed prefix
pub struct AcceptanceSuite {
    runner: Arc<dyn ProcessRunner>,
    binary: PathBuf,
    addons_dir: PathBuf,
    workdir: PathBuf,
    python: String,
}

impl AcceptanceSuite {
    /// Test the installation described by `layout`, writing fixtures to `workdir`
    pub fn new(
        runner: Arc<dyn ProcessRunner>,
        layout: &InstallationLayout,
        workdir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            runner,
            binary: layout.binary(),
            addons_dir: layout.addons_dir(),
            workdir: workdir.into(),
            python: "python3".to_string(),
        }
    }

    /// Use a different Python interpreter for the addon check
    pub fn with_python(mut self, python: impl Into<String>) -> Self {
        self.python = python.into();
        self
    }

    /// The checks in execution order
    pub fn checks(&self) -> Vec<AcceptanceCheck> {
        vec![
            AcceptanceCheck::smoke(),
            AcceptanceCheck::defect_detection(),
            AcceptanceCheck::addon_integration(&self.addons_dir),
        ]
    }

    /// Run every check, stopping at the first failure
    pub fn run(&self) -> Result<TestReport> {
        if !self.binary.is_file() {
            return Err(Error::NotFound(format!(
                "Installed binary not found: {}",
                self.binary.display()
            )));
        }
        fs::create_dir_all(&self.workdir)?;

        let mut report = TestReport::default();
        for check in self.checks() {
            info!("Running {} check", check.kind);
            report.results.push(self.run_check(&check)?);
        }

        info!("All {} acceptance checks passed", report.passed());
        Ok(report)
    }

    fn run_check(&self, check: &AcceptanceCheck) -> Result<CheckResult> {
        for (name, contents) in &check.fixture_files {
            fs::write(self.workdir.join(name), contents)?;
            debug!("Wrote fixture {}", name);
        }

        let mut commands = Vec::with_capacity(check.invocations.len());
        for invocation in &check.invocations {
            let program = match invocation.program {
                Program::Analyzer => self.binary.to_string_lossy().into_owned(),
                Program::Python => self.python.clone(),
            };
            let command = CommandSpec::new(program)
                .args(invocation.args.iter().cloned())
                .current_dir(&self.workdir);

            let output = self.runner.run(&command)?;
            debug!("{} exited with {:?}", command, output.exit_code);
            evaluate(check.kind, &invocation.expect, &output, &self.workdir)?;

            if let Expectation::FileExists(path) = &invocation.expect {
                self.log_dump_summary(&self.workdir.join(path));
            }
            commands.push(command.to_string());
        }

        Ok(CheckResult {
            kind: check.kind,
            commands,
        })
    }

    fn log_dump_summary(&self, path: &Path) {
        if path.extension().is_none_or(|ext| ext != "dump") {
            return;
        }
        match dump::parse_dump_file(path).and_then(|d| d.primary().cloned()) {
            Ok(config) => info!(
                "{}: functions [{}], {} tokens",
                path.display(),
                config.function_names(),
                config.token_count()
            ),
            Err(e) => warn!("Could not summarize {}: {}", path.display(), e),
        }
    }
}
