// src/recipe/mod.rs

//! The cppcheck build recipe
//!
//! The recipe turns a handful of boolean feature flags into everything the
//! build needs:
//! - A dependency set ([`dependencies`])
//! - Parameters for the upstream makefiles and the GUI's qmake project ([`steps`])
//! - A layout for the installed files ([`layout`])
//!
//! # Culinary Terminology
//!
//! - **Kitchen**: Runs the external tools on behalf of the recipe
//! - **Cook**: A single build from source to staged prefix
//! - **Simmer**: Running the planned make/qmake invocations
//! - **Plate**: Staging addons and the GUI bundle
//!
//! # Example
//!
//! ```no_run
//! use cppcheck_formula::recipe::{InstallationLayout, Kitchen, OptionSet};
//! use std::path::Path;
//!
//! let options = OptionSet::from_flags(["with-qt"])?;
//! let layout = InstallationLayout::default();
//! let result = Kitchen::with_defaults().cook(&options, &layout, Path::new("cppcheck-1.80"))?;
//! println!("{} addon(s) staged", result.staged.addons.len());
//! # Ok::<(), cppcheck_formula::Error>(())
//! ```

pub mod dependencies;
pub mod kitchen;
pub mod layout;
pub mod options;
pub mod steps;

pub use dependencies::{DependencyKind, DependencyLocator, DependencySpec, LocatedDependency};
pub use kitchen::{CookResult, Kitchen, KitchenConfig, Preparation, ToolConfig};
pub use layout::InstallationLayout;
pub use options::{Feature, FeatureOption, Flag, OptionSet};
pub use steps::{BuildInvocation, Step};
