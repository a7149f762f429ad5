// src/recipe/kitchen/config.rs

//! Configuration types for the Kitchen

use crate::formula;
use crate::recipe::dependencies::LocatedDependency;
use crate::recipe::kitchen::stage::StagedFiles;
use crate::recipe::steps::Step;
use serde::Deserialize;
use std::path::PathBuf;

/// Program names for the external tools the recipe drives
///
/// Bare names are looked up on `PATH` by the runner; absolute paths are used
/// as given.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub make: String,
    pub qmake: String,
    /// Interpreter for the addon check
    pub python: String,
    /// C++ compilers to try, in order of preference
    pub compilers: Vec<String>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            make: "make".to_string(),
            qmake: "qmake".to_string(),
            python: "python3".to_string(),
            compilers: vec!["c++".to_string(), "clang++".to_string(), "g++".to_string()],
        }
    }
}

/// Configuration for the Kitchen
#[derive(Debug, Clone)]
pub struct KitchenConfig {
    /// Number of parallel make jobs
    pub jobs: u32,
    /// Root under which the client links installed dependencies
    pub opt_root: PathBuf,
    /// Verify that dependencies exist before building
    ///
    /// When false, libraries are assumed to live at `{opt_root}/{name}` and
    /// the first configured compiler is used without probing it.
    pub check_dependencies: bool,
    pub tools: ToolConfig,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        let jobs = std::thread::available_parallelism()
            .map(|n| n.get() as u32)
            .unwrap_or(4);

        Self {
            jobs,
            opt_root: PathBuf::from(formula::DEFAULT_OPT_ROOT),
            check_dependencies: true,
            tools: ToolConfig::default(),
        }
    }
}

/// One build invocation that ran to completion
#[derive(Debug, Clone)]
pub struct StepRecord {
    pub step: Step,
    pub command: String,
    pub output: String,
}

/// Result of cooking the formula
#[derive(Debug)]
pub struct CookResult {
    /// Where each resolved dependency was found
    pub dependencies: Vec<LocatedDependency>,
    /// Invocations in the order they ran
    pub steps: Vec<StepRecord>,
    /// Files moved or copied by the stager
    pub staged: StagedFiles,
    /// Full build log
    pub log: String,
    /// Warnings encountered during the build
    pub warnings: Vec<String>,
}
