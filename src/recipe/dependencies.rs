// src/recipe/dependencies.rs

//! Dependency declarations and resolution
//!
//! The recipe only declares what it needs; installing those packages is the
//! client's job. [`resolve`] turns an option set into the concrete list, and a
//! [`DependencyLocator`] reports where the client put each one so build
//! parameters can point at it.

use crate::error::{Error, Result};
use crate::recipe::kitchen::runner::{CommandSpec, ProcessRunner};
use crate::recipe::options::{Feature, OptionSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use strum_macros::Display;
use tracing::{debug, info};

/// What role a dependency plays in the build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[strum(serialize_all = "lowercase")]
pub enum DependencyKind {
    /// Library linked into the primary binary
    Library,
    /// Toolkit needed only by the GUI build
    Gui,
    /// Compiler capability required by every build step
    Toolchain,
}

/// When a dependency applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Condition {
    Always,
    With(Feature),
}

impl Condition {
    pub fn holds(&self, options: &OptionSet) -> bool {
        match self {
            Self::Always => true,
            Self::With(feature) => options.with(*feature),
        }
    }
}

/// A declared dependency and the predicate that makes it required
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DependencySpec {
    pub name: &'static str,
    pub kind: DependencyKind,
    pub required_if: Condition,
}

/// Pattern-matching library backing rule support
pub const PCRE: DependencySpec = DependencySpec {
    name: "pcre",
    kind: DependencyKind::Library,
    required_if: Condition::With(Feature::Rules),
};

/// GUI toolkit
pub const QT: DependencySpec = DependencySpec {
    name: "qt",
    kind: DependencyKind::Gui,
    required_if: Condition::With(Feature::Qt),
};

/// C++11-capable compiler
pub const CXX11: DependencySpec = DependencySpec {
    name: "cxx11",
    kind: DependencyKind::Toolchain,
    required_if: Condition::Always,
};

/// Every dependency the recipe can ask for, in declaration order
pub const DEPENDENCIES: &[DependencySpec] = &[PCRE, QT, CXX11];

/// Compute the dependencies required by an option set
///
/// Total over every combination of options; never fails.
pub fn resolve(options: &OptionSet) -> Vec<DependencySpec> {
    DEPENDENCIES
        .iter()
        .filter(|dep| dep.required_if.holds(options))
        .copied()
        .collect()
}

/// Where the client installed a resolved dependency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedDependency {
    pub name: String,
    /// Install prefix for libraries and toolkits, the compiler for toolchains
    pub path: PathBuf,
}

impl LocatedDependency {
    pub fn include_dir(&self) -> PathBuf {
        self.path.join("include")
    }

    pub fn lib_dir(&self) -> PathBuf {
        self.path.join("lib")
    }
}

/// Trait for finding resolved dependencies on the host
///
/// This keeps the recipe decoupled from how the client installs packages.
pub trait DependencyLocator {
    /// Locate a dependency, or return `None` if it is not installed
    fn locate(&self, dep: &DependencySpec) -> Result<Option<LocatedDependency>>;
}

/// Locate every dependency, failing on the first one that is missing
pub fn locate_all(
    locator: &dyn DependencyLocator,
    deps: &[DependencySpec],
) -> Result<Vec<LocatedDependency>> {
    let mut located = Vec::with_capacity(deps.len());
    for dep in deps {
        match locator.locate(dep)? {
            Some(found) => {
                debug!("{} ({}) found at {}", dep.name, dep.kind, found.path.display());
                located.push(found);
            }
            None => {
                return Err(Error::MissingDependency(format!(
                    "{} ({}) is required but was not found",
                    dep.name, dep.kind
                )));
            }
        }
    }
    Ok(located)
}

/// Host locator: packages under an opt root, compilers on `PATH`
pub struct HostLocator {
    opt_root: PathBuf,
    compilers: Vec<String>,
    runner: Arc<dyn ProcessRunner>,
    /// When false, packages are assumed present under the opt root
    verify: bool,
}

impl HostLocator {
    pub fn new(
        opt_root: impl Into<PathBuf>,
        compilers: Vec<String>,
        runner: Arc<dyn ProcessRunner>,
    ) -> Self {
        Self {
            opt_root: opt_root.into(),
            compilers,
            runner,
            verify: true,
        }
    }

    /// Skip existence checks and trust the opt root layout
    pub fn assume_installed(mut self) -> Self {
        self.verify = false;
        self
    }

    fn locate_package(&self, name: &str) -> Option<LocatedDependency> {
        let path = self.opt_root.join(name);
        if self.verify && !path.is_dir() {
            return None;
        }
        Some(LocatedDependency {
            name: name.to_string(),
            path,
        })
    }

    fn locate_compiler(&self) -> Result<Option<LocatedDependency>> {
        for candidate in &self.compilers {
            let path = if Path::new(candidate).is_absolute() {
                PathBuf::from(candidate)
            } else {
                match which::which(candidate) {
                    Ok(path) => path,
                    Err(_) => continue,
                }
            };

            if !self.verify {
                return Ok(Some(LocatedDependency {
                    name: CXX11.name.to_string(),
                    path,
                }));
            }

            if !path.is_file() {
                debug!("{} does not exist, trying next compiler", path.display());
                continue;
            }

            // Syntax-check an empty translation unit (stdin is closed) in C++11 mode
            let check = CommandSpec::new(path.to_string_lossy())
                .args(["-std=c++11", "-x", "c++", "-fsyntax-only", "-"]);
            match self.runner.run(&check) {
                Ok(output) if output.success() => {
                    info!("Using C++11 compiler: {}", path.display());
                    return Ok(Some(LocatedDependency {
                        name: CXX11.name.to_string(),
                        path,
                    }));
                }
                Ok(_) => debug!("{} rejected -std=c++11, trying next compiler", path.display()),
                Err(e) => {
                    debug!("{} could not be run ({}), trying next compiler", path.display(), e)
                }
            }
        }
        Ok(None)
    }
}

impl DependencyLocator for HostLocator {
    fn locate(&self, dep: &DependencySpec) -> Result<Option<LocatedDependency>> {
        match dep.kind {
            DependencyKind::Toolchain => self.locate_compiler(),
            DependencyKind::Library | DependencyKind::Gui => Ok(self.locate_package(dep.name)),
        }
    }
}
