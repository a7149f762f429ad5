// src/recipe/kitchen/mod.rs

//! Kitchen: where the formula is cooked
//!
//! The Kitchen drives a build end to end:
//! - Resolving dependencies for the selected options and locating them
//! - Planning the make/qmake invocations
//! - Running them in order through a [`ProcessRunner`]
//! - Staging addons and the GUI bundle into the prefix

mod config;
mod cook;
pub mod runner;
pub mod stage;

pub use config::{CookResult, KitchenConfig, StepRecord, ToolConfig};
pub use runner::{CommandSpec, ProcessOutput, ProcessRunner, SystemRunner};
pub use stage::StagedFiles;

use crate::error::{Error, Result};
use crate::recipe::dependencies::{
    self, CXX11, DependencyLocator, DependencySpec, HostLocator, LocatedDependency, PCRE,
};
use crate::recipe::layout::InstallationLayout;
use crate::recipe::options::{Feature, OptionSet};
use crate::recipe::steps::{self, BuildInvocation, GUI_SUBDIR, PlanInputs};
use cook::Cook;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Everything decided before the first tool runs
#[derive(Debug, Clone)]
pub struct Preparation {
    /// Dependencies required by the option set
    pub dependencies: Vec<DependencySpec>,
    /// Where each of them was found
    pub located: Vec<LocatedDependency>,
    /// Invocations in execution order
    pub invocations: Vec<BuildInvocation>,
}

/// The Kitchen: where the formula is cooked
pub struct Kitchen {
    pub(crate) config: KitchenConfig,
    runner: Arc<dyn ProcessRunner>,
    /// Optional locator overriding the host lookup
    locator: Option<Arc<dyn DependencyLocator>>,
}

impl Kitchen {
    /// Create a new Kitchen that runs tools on the host
    pub fn new(config: KitchenConfig) -> Self {
        Self::with_runner(config, Arc::new(SystemRunner))
    }

    /// Create a new Kitchen with a custom process runner
    pub fn with_runner(config: KitchenConfig, runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            config,
            runner,
            locator: None,
        }
    }

    /// Create a Kitchen with default configuration
    pub fn with_defaults() -> Self {
        Self::new(KitchenConfig::default())
    }

    /// Set the dependency locator
    pub fn set_locator(&mut self, locator: Arc<dyn DependencyLocator>) {
        self.locator = Some(locator);
    }

    pub fn config(&self) -> &KitchenConfig {
        &self.config
    }

    fn locator(&self) -> Arc<dyn DependencyLocator> {
        if let Some(locator) = &self.locator {
            return Arc::clone(locator);
        }

        let host = HostLocator::new(
            self.config.opt_root.clone(),
            self.config.tools.compilers.clone(),
            Arc::clone(&self.runner),
        );
        if self.config.check_dependencies {
            Arc::new(host)
        } else {
            Arc::new(host.assume_installed())
        }
    }

    /// Resolve, locate and plan without running anything
    pub fn prepare(
        &self,
        options: &OptionSet,
        layout: &InstallationLayout,
        source_dir: &Path,
    ) -> Result<Preparation> {
        layout.validate()?;

        if !source_dir.join("Makefile").is_file() {
            return Err(Error::NotFound(format!(
                "No Makefile in source directory: {}",
                source_dir.display()
            )));
        }

        let dependencies = dependencies::resolve(options);
        info!(
            "Required dependencies: {}",
            dependencies
                .iter()
                .map(|d| d.name)
                .collect::<Vec<_>>()
                .join(", ")
        );

        let located = dependencies::locate_all(self.locator().as_ref(), &dependencies)?;
        let find = |name: &str| located.iter().find(|d| d.name == name);

        let compiler = find(CXX11.name).map(|d| d.path.as_path());
        let inputs = PlanInputs {
            options,
            layout,
            source_dir,
            tools: &self.config.tools,
            jobs: self.config.jobs,
            compiler,
            pcre: find(PCRE.name),
        };
        let invocations = steps::plan(&inputs)?;
        debug!("Planned {} invocation(s)", invocations.len());

        Ok(Preparation {
            dependencies,
            located,
            invocations,
        })
    }

    /// Cook the formula: build, install and stage into the layout's prefix
    pub fn cook(
        &self,
        options: &OptionSet,
        layout: &InstallationLayout,
        source_dir: &Path,
    ) -> Result<CookResult> {
        info!("Cooking {} into {}", crate::formula::NAME, layout.prefix.display());

        let preparation = self.prepare(options, layout, source_dir)?;
        let mut cook = Cook::new(self, layout);

        info!("Simmering: running build...");
        cook.simmer(&preparation.invocations)?;

        info!("Plating: staging outputs...");
        let gui_dir = options
            .with(Feature::Qt)
            .then(|| source_dir.join(GUI_SUBDIR));
        let staged = cook.plate(gui_dir.as_deref())?;

        Ok(CookResult {
            dependencies: preparation.located,
            steps: cook.steps,
            staged,
            log: cook.log,
            warnings: cook.warnings,
        })
    }
}
