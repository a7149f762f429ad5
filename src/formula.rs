// src/formula.rs

//! Static metadata for the packaged tool
//!
//! Fetching and checksum verification belong to the package-management
//! client; the values here are what it needs to do that, plus the names the
//! rest of the recipe derives paths from.

use std::path::PathBuf;

/// Package name, also used for the shared-data directory
pub const NAME: &str = "cppcheck";

/// Packaged upstream version
pub const VERSION: &str = "1.80";

/// One-line description
pub const DESCRIPTION: &str = "Static analysis of C and C++ code";

pub const HOMEPAGE: &str = "https://sourceforge.net/projects/cppcheck/";

/// Release tarball
pub const SOURCE_URL: &str = "https://github.com/danmar/cppcheck/archive/1.80.tar.gz";

pub const SOURCE_SHA256: &str =
    "20863db018d69c33648bdedcdc9d81d818b9064cc4333f0d4dc45e114bd0f000";

/// Development head
pub const HEAD_URL: &str = "https://github.com/danmar/cppcheck.git";

/// Name of the binary installed into `bin/`
pub const BINARY: &str = "cppcheck";

/// macOS bundle produced by the GUI build
pub const GUI_BUNDLE: &str = "cppcheck-gui.app";

/// Root of versioned installation prefixes
pub const DEFAULT_CELLAR: &str = "/usr/local/Cellar";

/// Root of the stable per-package dependency links
pub const DEFAULT_OPT_ROOT: &str = "/usr/local/opt";

/// Python module shipped with the addons that parses dump files
pub fn addon_module() -> String {
    format!("{}data", NAME)
}

/// Versioned prefix used when the caller does not choose one
pub fn default_prefix() -> PathBuf {
    PathBuf::from(DEFAULT_CELLAR).join(NAME).join(VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addon_module_name() {
        assert_eq!(addon_module(), "cppcheckdata");
    }

    #[test]
    fn test_default_prefix_is_versioned() {
        assert_eq!(
            default_prefix(),
            PathBuf::from("/usr/local/Cellar/cppcheck/1.80")
        );
    }
}
