// src/config.rs

//! Optional TOML configuration file
//!
//! ```toml
//! [layout]
//! prefix = "/opt/cppcheck/1.80"
//! config_dir = "cfg"
//!
//! [kitchen]
//! jobs = 8
//! opt_root = "/opt/homebrew/opt"
//! check_dependencies = true
//!
//! [tools]
//! qmake = "qmake-qt5"
//! python = "python3"
//! ```
//!
//! Every key is optional. Command-line flags override file values.

use crate::error::{Error, Result};
use crate::recipe::{InstallationLayout, KitchenConfig, ToolConfig};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutSection {
    pub prefix: Option<PathBuf>,
    pub config_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KitchenSection {
    pub jobs: Option<u32>,
    pub opt_root: Option<PathBuf>,
    pub check_dependencies: Option<bool>,
}

/// Parsed configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub layout: LayoutSection,
    pub kitchen: KitchenSection,
    pub tools: ToolConfig,
}

impl Config {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ParseError(format!("Invalid config: {}", e)))
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::IoError(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Load a file when given, defaults otherwise
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Installation layout, with `prefix` taking precedence over the file
    pub fn layout(&self, prefix: Option<&Path>) -> InstallationLayout {
        let layout = match prefix.or(self.layout.prefix.as_deref()) {
            Some(prefix) => InstallationLayout::new(prefix),
            None => InstallationLayout::default(),
        };
        match &self.layout.config_dir {
            Some(dir) => layout.with_config_dir(dir),
            None => layout,
        }
    }

    /// Kitchen settings, with `jobs` taking precedence over the file
    pub fn kitchen_config(&self, jobs: Option<u32>) -> KitchenConfig {
        let mut config = KitchenConfig {
            tools: self.tools.clone(),
            ..KitchenConfig::default()
        };
        if let Some(jobs) = jobs.or(self.kitchen.jobs) {
            config.jobs = jobs;
        }
        if let Some(root) = &self.kitchen.opt_root {
            config.opt_root = root.clone();
        }
        if let Some(check) = self.kitchen.check_dependencies {
            config.check_dependencies = check;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.layout(None), InstallationLayout::default());
    }

    #[test]
    fn test_full_config() {
        let config = Config::parse(
            r#"
[layout]
prefix = "/opt/cppcheck/1.80"
config_dir = "share/cfg"

[kitchen]
jobs = 3
opt_root = "/opt/homebrew/opt"
check_dependencies = false

[tools]
qmake = "qmake-qt5"
"#,
        )
        .unwrap();

        let layout = config.layout(None);
        assert_eq!(layout.prefix, PathBuf::from("/opt/cppcheck/1.80"));
        assert_eq!(layout.install_config_dir(), "/share/cfg");

        let kitchen = config.kitchen_config(None);
        assert_eq!(kitchen.jobs, 3);
        assert_eq!(kitchen.opt_root, PathBuf::from("/opt/homebrew/opt"));
        assert!(!kitchen.check_dependencies);
        assert_eq!(kitchen.tools.qmake, "qmake-qt5");
        assert_eq!(kitchen.tools.make, "make");
    }

    #[test]
    fn test_flags_override_file() {
        let config = Config::parse("[layout]\nprefix = \"/a\"\n[kitchen]\njobs = 3\n").unwrap();
        assert_eq!(config.layout(Some(Path::new("/b"))).prefix, PathBuf::from("/b"));
        assert_eq!(config.kitchen_config(Some(12)).jobs, 12);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(matches!(
            Config::parse("[kitchen]\nthreads = 4\n"),
            Err(Error::ParseError(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            Config::load(Path::new("/nonexistent/cppcheck-formula.toml")),
            Err(Error::IoError(_))
        ));
    }
}
