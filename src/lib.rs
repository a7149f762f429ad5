// src/lib.rs

//! cppcheck formula
//!
//! Build-and-install recipe for the cppcheck static analyzer, executed on
//! behalf of a package-management client.
//!
//! # Architecture
//!
//! - Options: `with-`/`without-` feature flags, retired aliases resolved at parse time
//! - Dependencies: derived from the options, located through a pluggable locator
//! - Kitchen: runs make/qmake through a `ProcessRunner` and stages the outputs
//! - Acceptance: exercises the installed binary and its Python addons end to end

pub mod acceptance;
pub mod config;
pub mod dump;
mod error;
pub mod formula;
pub mod recipe;

pub use acceptance::{AcceptanceSuite, TestReport};
pub use config::Config;
pub use error::{Error, Result};
pub use recipe::{CookResult, InstallationLayout, Kitchen, KitchenConfig, OptionSet};
