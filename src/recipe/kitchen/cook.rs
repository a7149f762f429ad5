// src/recipe/kitchen/cook.rs

//! Cook: a single build of the formula

use super::Kitchen;
use super::config::StepRecord;
use super::stage::{self, StagedFiles};
use crate::error::{Error, Result};
use crate::recipe::layout::InstallationLayout;
use crate::recipe::steps::BuildInvocation;
use std::path::Path;
use tracing::{debug, info, warn};

/// A cook in progress
pub(super) struct Cook<'a> {
    pub(super) kitchen: &'a Kitchen,
    pub(super) layout: &'a InstallationLayout,
    /// Invocations that completed
    pub(super) steps: Vec<StepRecord>,
    /// Build log accumulator
    pub(super) log: String,
    /// Warnings
    pub(super) warnings: Vec<String>,
}

impl<'a> Cook<'a> {
    pub(super) fn new(kitchen: &'a Kitchen, layout: &'a InstallationLayout) -> Self {
        Self {
            kitchen,
            layout,
            steps: Vec::new(),
            log: String::new(),
            warnings: Vec::new(),
        }
    }

    /// Simmer: run every planned invocation in order, stopping at the first failure
    pub(super) fn simmer(&mut self, invocations: &[BuildInvocation]) -> Result<()> {
        if self.layout.addons_dir().exists() {
            let warning = format!(
                "{} already exists; staging over a previous install is not supported",
                self.layout.addons_dir().display()
            );
            warn!("{}", warning);
            self.warnings.push(warning);
        }

        for invocation in invocations {
            self.run_build_step(invocation)?;
        }
        Ok(())
    }

    fn run_build_step(&mut self, invocation: &BuildInvocation) -> Result<()> {
        let command = invocation.to_command();
        let command_line = command.to_string();
        info!("Running {} phase: {}", invocation.step, command_line);
        debug!("Working directory: {}", invocation.working_directory.display());

        let output = self.kitchen.runner.run(&command)?;
        self.log_build_output(
            &invocation.step.to_string(),
            &command_line,
            &output.stdout,
            &output.stderr,
        );

        if !output.success() {
            return Err(Error::BuildFailure {
                step: invocation.step.to_string(),
                command: command_line,
                code: output.exit_code,
                output: output.combined(),
            });
        }

        self.steps.push(StepRecord {
            step: invocation.step,
            command: command_line,
            output: output.combined(),
        });
        Ok(())
    }

    /// Plate: move the build outputs into their final layout
    pub(super) fn plate(&mut self, gui_dir: Option<&Path>) -> Result<StagedFiles> {
        let staged = stage::stage(self.layout, gui_dir)?;

        for addon in &staged.addons {
            self.log_line(&format!("Staged addon: {}", addon.display()));
        }
        if let Some(bundle) = &staged.gui_bundle {
            self.log_line(&format!("Installed GUI bundle: {}", bundle.display()));
        }
        Ok(staged)
    }

    fn log_line(&mut self, line: &str) {
        self.log.push_str(line);
        self.log.push('\n');
    }

    /// Log build step output (stdout/stderr) with a phase header
    fn log_build_output(&mut self, phase: &str, command: &str, stdout: &str, stderr: &str) {
        self.log_line(&format!("=== {} ===", phase));
        self.log_line(&format!("$ {}", command));
        if !stdout.is_empty() {
            self.log.push_str(stdout);
            self.log.push('\n');
        }
        if !stderr.is_empty() {
            self.log.push_str(stderr);
            self.log.push('\n');
        }
    }
}
