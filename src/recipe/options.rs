// src/recipe/options.rs

//! Feature options and flag resolution
//!
//! Options follow the `with-<feature>` / `without-<feature>` convention. Each
//! feature declares the flag that moves it away from its default, and a small
//! table maps retired flag names onto current ones. All of this is resolved
//! once, while the user's flags are parsed; nothing downstream ever looks at
//! flag strings again.

use crate::error::{Error, Result};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use tracing::warn;

/// A user-toggleable build feature
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumString, AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Feature {
    /// Rule support, backed by the pcre pattern-matching library
    Rules,
    /// The Qt graphical frontend
    Qt,
}

impl Feature {
    /// Whether the feature is on when no flag mentions it
    pub fn default_enabled(self) -> bool {
        match self {
            Self::Rules => true,
            Self::Qt => false,
        }
    }

    /// The declared flag that flips this feature away from its default
    pub fn toggle_flag(self) -> Flag {
        Flag {
            feature: self,
            enabled: !self.default_enabled(),
        }
    }

    /// Help text for the declared flag
    pub fn description(self) -> &'static str {
        match self {
            Self::Rules => "Build without rules (no pcre dependency)",
            Self::Qt => "Build the cppcheck GUI (requires Qt)",
        }
    }

    /// Retired flag names that still resolve to this feature
    pub fn deprecated_aliases(self) -> Vec<&'static str> {
        DEPRECATED_ALIASES
            .iter()
            .filter(|(_, canonical)| {
                resolve_canonical(canonical).is_some_and(|flag| flag.feature == self)
            })
            .map(|(alias, _)| *alias)
            .collect()
    }
}

/// Retired flag names and the canonical flag each one maps to
pub const DEPRECATED_ALIASES: &[(&str, &str)] = &[
    ("no-rules", "without-rules"),
    ("with-gui", "with-qt"),
    ("with-qt5", "with-qt"),
];

/// A canonical flag: one feature switched on or off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Flag {
    pub feature: Feature,
    pub enabled: bool,
}

impl Flag {
    /// Canonical spelling, e.g. `without-rules`
    pub fn canonical_name(&self) -> String {
        let prefix = if self.enabled { "with" } else { "without" };
        format!("{}-{}", prefix, self.feature)
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "--{}", self.canonical_name())
    }
}

impl FromStr for Flag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        resolve(s)
    }
}

fn resolve_canonical(name: &str) -> Option<Flag> {
    let (enabled, feature) = if let Some(rest) = name.strip_prefix("without-") {
        (false, rest)
    } else if let Some(rest) = name.strip_prefix("with-") {
        (true, rest)
    } else {
        return None;
    };

    Feature::from_str(feature)
        .ok()
        .map(|feature| Flag { feature, enabled })
}

/// Resolve a flag name, current or retired, to its canonical flag
///
/// A leading `--` is ignored. Fails with [`Error::UnknownOption`] when the
/// name matches neither a feature flag nor a known alias.
pub fn resolve(flag_name: &str) -> Result<Flag> {
    let name = flag_name.trim();
    let name = name.strip_prefix("--").unwrap_or(name);

    let canonical = match DEPRECATED_ALIASES.iter().find(|(alias, _)| *alias == name) {
        Some((alias, canonical)) => {
            warn!("Option --{} is deprecated, use --{} instead", alias, canonical);
            *canonical
        }
        None => name,
    };

    resolve_canonical(canonical).ok_or_else(|| Error::UnknownOption(flag_name.to_string()))
}

/// The value of one feature in a resolved option set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureOption {
    pub feature: Feature,
    pub enabled: bool,
}

impl FeatureOption {
    pub fn name(&self) -> &str {
        self.feature.as_ref()
    }

    pub fn deprecated_aliases(&self) -> Vec<&'static str> {
        self.feature.deprecated_aliases()
    }
}

/// The user's feature selection
///
/// Built once from the flags the client passes in and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSet {
    enabled: BTreeSet<Feature>,
}

impl Default for OptionSet {
    fn default() -> Self {
        Self {
            enabled: Feature::iter().filter(|f| f.default_enabled()).collect(),
        }
    }
}

impl OptionSet {
    /// Build an option set from raw flag names
    ///
    /// Flags are applied in order on top of the defaults, so a later flag
    /// for the same feature wins.
    pub fn from_flags<I, S>(flags: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for flag in flags {
            let flag = resolve(flag.as_ref())?;
            set = set.with_feature(flag.feature, flag.enabled);
        }
        Ok(set)
    }

    /// Return a copy with one feature set explicitly
    pub fn with_feature(mut self, feature: Feature, enabled: bool) -> Self {
        if enabled {
            self.enabled.insert(feature);
        } else {
            self.enabled.remove(&feature);
        }
        self
    }

    /// Whether a feature is enabled for this build
    pub fn with(&self, feature: Feature) -> bool {
        self.enabled.contains(&feature)
    }

    /// Every feature with its current value, in declaration order
    pub fn options(&self) -> Vec<FeatureOption> {
        Feature::iter()
            .map(|feature| FeatureOption {
                feature,
                enabled: self.with(feature),
            })
            .collect()
    }

    /// Canonical flags for the features that differ from their defaults
    pub fn used_flags(&self) -> Vec<Flag> {
        self.options()
            .into_iter()
            .filter(|o| o.enabled != o.feature.default_enabled())
            .map(|o| Flag {
                feature: o.feature,
                enabled: o.enabled,
            })
            .collect()
    }
}
