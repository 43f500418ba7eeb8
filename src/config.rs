//! Tunable constants for the identifier and the sample-file loader.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::IdentError;

fn default_tolerance() -> f64 {
    1e-11
}

fn default_max_iter() -> usize {
    1000
}

fn default_fmin() -> f64 {
    0.0
}

fn default_fmax() -> f64 {
    f64::INFINITY
}

/// Tunables that the identifier and sample loader fall back to when a
/// caller does not specify them explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default = "default_max_iter")]
    pub default_max_iter: usize,
    #[serde(default = "default_fmin")]
    pub default_fmin: f64,
    #[serde(default = "default_fmax")]
    pub default_fmax: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            tolerance: default_tolerance(),
            default_max_iter: default_max_iter(),
            default_fmin: default_fmin(),
            default_fmax: default_fmax(),
        }
    }
}

impl Settings {
    /// Default path `~/.dzident/settings.toml`, mirroring this codebase's
    /// usual per-user config file convention.
    pub fn default_path() -> Option<PathBuf> {
        dirs_next::home_dir().map(|h| h.join(".dzident").join("settings.toml"))
    }

    /// Loads settings from a TOML file, filling any field the file omits
    /// with the hard-coded default. Fails with `FileOpen` if the file
    /// cannot be read, or `ConfigFormat` if it cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Settings, IdentError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| IdentError::FileOpen {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| IdentError::ConfigFormat {
            path: path.display().to_string(),
            source,
        })
    }
}
