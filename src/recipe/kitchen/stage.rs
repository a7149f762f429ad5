// src/recipe/kitchen/stage.rs

//! Post-install staging
//!
//! `make install` leaves the Python addons next to the binary. They are moved
//! into the package's shared data directory, and the GUI bundle (when built)
//! is copied into the prefix.

use crate::error::{Error, Result};
use crate::formula;
use crate::recipe::layout::InstallationLayout;
use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Files placed by the stager
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagedFiles {
    /// Addon scripts at their final location
    pub addons: Vec<PathBuf>,
    /// Copied GUI bundle, if the GUI was built
    pub gui_bundle: Option<PathBuf>,
}

/// Stage build outputs into their final layout
///
/// `gui_dir` is the GUI build directory and is only passed when the GUI was
/// built. Staging into a prefix that was already staged is not supported.
pub fn stage(layout: &InstallationLayout, gui_dir: Option<&Path>) -> Result<StagedFiles> {
    let addons = relocate_addons(layout)?;

    let gui_bundle = match gui_dir {
        Some(dir) => Some(install_gui_bundle(dir, layout)?),
        None => None,
    };

    Ok(StagedFiles { addons, gui_bundle })
}

fn relocate_addons(layout: &InstallationLayout) -> Result<Vec<PathBuf>> {
    if !layout.bin_dir.is_dir() {
        return Err(Error::StagingFailure(format!(
            "Binary directory does not exist: {}",
            layout.bin_dir.display()
        )));
    }

    let pattern = Pattern::new("*.py").map_err(|e| Error::ParseError(e.to_string()))?;
    let mut scripts = Vec::new();
    for entry in fs::read_dir(&layout.bin_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if entry.file_type()?.is_file() && pattern.matches(&name.to_string_lossy()) {
            scripts.push(entry.path());
        }
    }
    scripts.sort();

    if scripts.is_empty() {
        return Err(Error::StagingFailure(format!(
            "No addon scripts found in {}",
            layout.bin_dir.display()
        )));
    }

    let addons_dir = layout.addons_dir();
    fs::create_dir_all(&addons_dir)?;

    let mut moved = Vec::with_capacity(scripts.len());
    for script in scripts {
        let Some(name) = script.file_name() else {
            continue;
        };
        let dest = addons_dir.join(name);
        move_file(&script, &dest)?;
        debug!("Moved {} -> {}", script.display(), dest.display());
        moved.push(dest);
    }

    info!("Staged {} addon(s) into {}", moved.len(), addons_dir.display());
    Ok(moved)
}

/// Rename, falling back to copy and delete across filesystems
fn move_file(from: &Path, to: &Path) -> Result<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }
    fs::copy(from, to).map_err(|e| {
        Error::StagingFailure(format!("Failed to move {}: {}", from.display(), e))
    })?;
    fs::remove_file(from)?;
    Ok(())
}

fn install_gui_bundle(gui_dir: &Path, layout: &InstallationLayout) -> Result<PathBuf> {
    let source = gui_dir.join(formula::GUI_BUNDLE);
    let dest = layout.gui_bundle();

    if source.is_file() {
        fs::copy(&source, &dest)?;
    } else if source.is_dir() {
        copy_tree(&source, &dest)?;
    } else {
        return Err(Error::StagingFailure(format!(
            "GUI bundle was not produced: {}",
            source.display()
        )));
    }

    info!("Installed GUI bundle to {}", dest.display());
    Ok(dest)
}

fn copy_tree(source: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(source) {
        let entry = entry.map_err(|e| Error::IoError(e.to_string()))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| Error::IoError(e.to_string()))?;
        let target = dest.join(relative);

        let file_type = entry.file_type();
        if file_type.is_dir() {
            fs::create_dir_all(&target)?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn copy_symlink(source: &Path, target: &Path) -> Result<()> {
    let link = fs::read_link(source)?;
    std::os::unix::fs::symlink(link, target)?;
    Ok(())
}

#[cfg(not(unix))]
fn copy_symlink(source: &Path, target: &Path) -> Result<()> {
    fs::copy(source, target)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn installed_prefix() -> (TempDir, InstallationLayout) {
        let temp = TempDir::new().unwrap();
        let layout = InstallationLayout::new(temp.path().join("prefix"));
        fs::create_dir_all(&layout.bin_dir).unwrap();
        fs::write(layout.binary(), b"#!/bin/sh\n").unwrap();
        fs::write(layout.bin_dir.join("cppcheckdata.py"), b"# data\n").unwrap();
        fs::write(layout.bin_dir.join("misra.py"), b"# misra\n").unwrap();
        (temp, layout)
    }

    #[test]
    fn test_addons_are_moved() {
        let (_temp, layout) = installed_prefix();
        let staged = stage(&layout, None).unwrap();

        assert_eq!(staged.addons.len(), 2);
        assert!(layout.addons_dir().join("cppcheckdata.py").is_file());
        assert!(layout.addons_dir().join("misra.py").is_file());
        assert!(!layout.bin_dir.join("cppcheckdata.py").exists());
        assert!(!layout.bin_dir.join("misra.py").exists());
        // Non-Python files stay put
        assert!(layout.binary().is_file());
        assert!(staged.gui_bundle.is_none());
    }

    #[test]
    fn test_missing_bin_dir() {
        let temp = TempDir::new().unwrap();
        let layout = InstallationLayout::new(temp.path().join("prefix"));
        assert!(matches!(stage(&layout, None), Err(Error::StagingFailure(_))));
    }

    #[test]
    fn test_no_addons() {
        let temp = TempDir::new().unwrap();
        let layout = InstallationLayout::new(temp.path().join("prefix"));
        fs::create_dir_all(&layout.bin_dir).unwrap();
        fs::write(layout.binary(), b"").unwrap();
        assert!(matches!(stage(&layout, None), Err(Error::StagingFailure(_))));
    }

    #[test]
    fn test_gui_bundle_copied() {
        let (temp, layout) = installed_prefix();
        let gui_dir = temp.path().join("src/gui");
        let macos = gui_dir.join("cppcheck-gui.app/Contents/MacOS");
        fs::create_dir_all(&macos).unwrap();
        fs::write(macos.join("cppcheck-gui"), b"bin").unwrap();

        let staged = stage(&layout, Some(&gui_dir)).unwrap();
        assert_eq!(staged.gui_bundle, Some(layout.gui_bundle()));
        assert!(layout.gui_bundle().join("Contents/MacOS/cppcheck-gui").is_file());
        // Copied, not moved
        assert!(macos.join("cppcheck-gui").is_file());
    }

    #[test]
    fn test_missing_gui_bundle() {
        let (temp, layout) = installed_prefix();
        let gui_dir = temp.path().join("src/gui");
        fs::create_dir_all(&gui_dir).unwrap();
        let err = stage(&layout, Some(&gui_dir)).unwrap_err();
        assert!(matches!(err, Error::StagingFailure(ref m) if m.contains("cppcheck-gui.app")));
    }
}
