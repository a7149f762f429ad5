// src/recipe/steps.rs

//! Build step planning
//!
//! Turns an option set and a layout into the ordered list of external tool
//! invocations. Planning is pure; the kitchen runs the result.

use crate::error::{Error, Result};
use crate::recipe::dependencies::LocatedDependency;
use crate::recipe::kitchen::ToolConfig;
use crate::recipe::kitchen::runner::CommandSpec;
use crate::recipe::layout::InstallationLayout;
use crate::recipe::options::{Feature, OptionSet};
use std::path::{Path, PathBuf};
use strum_macros::{Display, EnumIter};

/// Phases of the build, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum Step {
    /// Compile the analyzer with the config directory baked in
    PrimaryBuild,
    /// `make install` into the prefix
    InstallStep,
    /// qmake and make in the GUI subdirectory
    SecondaryGuiBuild,
}

/// Subdirectory of the source tree holding the GUI project
pub const GUI_SUBDIR: &str = "gui";

/// A single external tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInvocation {
    pub step: Step,
    pub program: String,
    pub parameters: Vec<String>,
    pub working_directory: PathBuf,
    pub env: Vec<(String, String)>,
}

impl BuildInvocation {
    pub fn to_command(&self) -> CommandSpec {
        let mut cmd = CommandSpec::new(self.program.clone())
            .args(self.parameters.iter().cloned())
            .current_dir(&self.working_directory);
        for (key, value) in &self.env {
            cmd = cmd.env(key.clone(), value.clone());
        }
        cmd
    }

    pub fn command_line(&self) -> String {
        self.to_command().to_string()
    }
}

fn have_rules(options: &OptionSet) -> String {
    let value = if options.with(Feature::Rules) { "yes" } else { "no" };
    format!("HAVE_RULES={}", value)
}

/// Parameters for the compile step
pub fn primary_build_parameters(options: &OptionSet, layout: &InstallationLayout) -> Vec<String> {
    vec![
        have_rules(options),
        format!("CFGDIR={}", layout.build_config_dir().display()),
    ]
}

/// Parameters for `make install`
///
/// Independent of the option set. CFGDIR is root-relative here because the
/// makefile prepends DESTDIR to it.
pub fn install_parameters(layout: &InstallationLayout) -> Vec<String> {
    vec![
        format!("DESTDIR={}", layout.prefix.display()),
        format!("BIN={}", layout.bin_dir.display()),
        format!("CFGDIR={}", layout.install_config_dir()),
        "install".to_string(),
    ]
}

/// Parameters for qmake in the GUI subdirectory
///
/// With rules enabled the GUI links against the located pattern-matching
/// library, so its location is required.
pub fn gui_configure_parameters(
    options: &OptionSet,
    pcre: Option<&LocatedDependency>,
) -> Result<Vec<String>> {
    let mut params = vec![have_rules(options)];
    if options.with(Feature::Rules) {
        let pcre = pcre.ok_or_else(|| {
            Error::MissingDependency("pcre location is required for the GUI build".to_string())
        })?;
        params.push(format!("INCLUDEPATH+={}", pcre.include_dir().display()));
        params.push(format!("LIBS+=-L{}", pcre.lib_dir().display()));
    }
    Ok(params)
}

/// Everything the planner reads
#[derive(Debug, Clone, Copy)]
pub struct PlanInputs<'a> {
    pub options: &'a OptionSet,
    pub layout: &'a InstallationLayout,
    pub source_dir: &'a Path,
    pub tools: &'a ToolConfig,
    /// Parallel make jobs, 0 leaves MAKEFLAGS unset
    pub jobs: u32,
    /// C++11 compiler, exported as CXX when known
    pub compiler: Option<&'a Path>,
    pub pcre: Option<&'a LocatedDependency>,
}

impl PlanInputs<'_> {
    fn env(&self, make: bool) -> Vec<(String, String)> {
        let mut env = Vec::new();
        if let Some(compiler) = self.compiler {
            env.push((
                "CXX".to_string(),
                format!("{} -std=c++11", compiler.display()),
            ));
        }
        if make && self.jobs > 0 {
            env.push(("MAKEFLAGS".to_string(), format!("-j{}", self.jobs)));
        }
        env
    }
}

/// Plan every invocation for a build, in execution order
///
/// The compile and install steps are always present. The GUI steps are
/// appended only when Qt is enabled.
pub fn plan(inputs: &PlanInputs<'_>) -> Result<Vec<BuildInvocation>> {
    let mut steps = vec![
        BuildInvocation {
            step: Step::PrimaryBuild,
            program: inputs.tools.make.clone(),
            parameters: primary_build_parameters(inputs.options, inputs.layout),
            working_directory: inputs.source_dir.to_path_buf(),
            env: inputs.env(true),
        },
        BuildInvocation {
            step: Step::InstallStep,
            program: inputs.tools.make.clone(),
            parameters: install_parameters(inputs.layout),
            working_directory: inputs.source_dir.to_path_buf(),
            env: inputs.env(true),
        },
    ];

    if inputs.options.with(Feature::Qt) {
        let gui_dir = inputs.source_dir.join(GUI_SUBDIR);
        steps.push(BuildInvocation {
            step: Step::SecondaryGuiBuild,
            program: inputs.tools.qmake.clone(),
            parameters: gui_configure_parameters(inputs.options, inputs.pcre)?,
            working_directory: gui_dir.clone(),
            env: inputs.env(false),
        });
        steps.push(BuildInvocation {
            step: Step::SecondaryGuiBuild,
            program: inputs.tools.make.clone(),
            parameters: Vec::new(),
            working_directory: gui_dir,
            env: inputs.env(true),
        });
    }

    Ok(steps)
}
