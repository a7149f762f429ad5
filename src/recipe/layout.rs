// src/recipe/layout.rs

//! Installation layout under a versioned prefix
//!
//! The config directory is stored relative to the prefix and rendered two
//! ways. The compile step bakes the absolute location into the binary
//! (`{prefix}/cfg`), while `make install` prepends `DESTDIR` on its own and
//! must be given the root-relative form (`/cfg`). Mixing them up installs the
//! data files to `{prefix}/{prefix}/cfg` or leaves the binary looking in `/cfg`.

use crate::error::{Error, Result};
use crate::formula;
use serde::{Deserialize, Serialize};
use std::path::{Component, PathBuf};

/// Where each part of the installation lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallationLayout {
    /// Versioned installation prefix
    pub prefix: PathBuf,
    /// Executables
    pub bin_dir: PathBuf,
    /// Analyzer configuration files, relative to `prefix`
    pub config_dir: PathBuf,
    /// Package-private shared data
    pub shared_data_dir: PathBuf,
}

impl InstallationLayout {
    /// Standard layout: `bin/`, `cfg/` and `share/<name>/` under the prefix
    pub fn new(prefix: impl Into<PathBuf>) -> Self {
        let prefix = prefix.into();
        Self {
            bin_dir: prefix.join("bin"),
            config_dir: PathBuf::from("cfg"),
            shared_data_dir: prefix.join("share").join(formula::NAME),
            prefix,
        }
    }

    /// Use a different prefix-relative config directory
    pub fn with_config_dir(mut self, config_dir: impl Into<PathBuf>) -> Self {
        self.config_dir = config_dir.into();
        self
    }

    /// Check the invariants the build relies on
    pub fn validate(&self) -> Result<()> {
        if !self.prefix.is_absolute() {
            return Err(Error::ParseError(format!(
                "Installation prefix must be absolute: {}",
                self.prefix.display()
            )));
        }

        let relative = self
            .config_dir
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !relative || self.config_dir.as_os_str().is_empty() {
            return Err(Error::ParseError(format!(
                "Config directory must be a plain path relative to the prefix: {}",
                self.config_dir.display()
            )));
        }

        Ok(())
    }

    /// CFGDIR for the compile step: the absolute location under the prefix
    pub fn build_config_dir(&self) -> PathBuf {
        self.prefix.join(&self.config_dir)
    }

    /// CFGDIR for `make install`, which prepends DESTDIR itself
    pub fn install_config_dir(&self) -> String {
        format!("/{}", self.config_dir.display())
    }

    /// The analyzer binary once installed
    pub fn binary(&self) -> PathBuf {
        self.bin_dir.join(formula::BINARY)
    }

    /// Destination for the Python addons
    pub fn addons_dir(&self) -> PathBuf {
        self.shared_data_dir.join("addons")
    }

    /// Destination for the GUI bundle
    pub fn gui_bundle(&self) -> PathBuf {
        self.prefix.join(formula::GUI_BUNDLE)
    }
}

impl Default for InstallationLayout {
    fn default() -> Self {
        Self::new(formula::default_prefix())
    }
}
