//! Run configuration and path resolution.
//!
//! A run is configured by two optional paths:
//!
//! - `in` — the content directory, relative to the working directory
//!   (defaults to the working directory itself)
//! - `out` — the output directory, relative to the content directory
//!   (defaults to `build`; an absolute path stands alone)
//!
//! Values come from an optional `blogpress.toml` in the working directory,
//! with CLI flags taking precedence. Beyond resolving both to non-empty
//! absolute paths there is no validation — a missing content directory
//! surfaces as an I/O error once traversal starts.

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the optional configuration file, looked up in the working directory.
pub const CONFIG_FILE: &str = "blogpress.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid {CONFIG_FILE}: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("source root does not resolve to an absolute path: {0}")]
    InvalidSourceRoot(PathBuf),
    #[error("target root does not resolve to an absolute path: {0}")]
    InvalidTargetRoot(PathBuf),
}

/// Raw run configuration, before path resolution.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Config {
    /// Content directory, relative to the working directory
    #[serde(default, rename = "in")]
    pub in_dir: Option<PathBuf>,
    /// Output directory, relative to the content directory
    #[serde(default, rename = "out")]
    pub out_dir: Option<PathBuf>,
}

/// Resolved absolute roots for one publish run.
#[derive(Debug, Clone)]
pub struct Roots {
    pub source: PathBuf,
    pub target: PathBuf,
}

impl Config {
    /// Load `blogpress.toml` from the working directory.
    ///
    /// A missing file is not an error — it yields the default (empty)
    /// configuration. A present but malformed file is.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(cwd.join(CONFIG_FILE)) {
            Ok(text) => Ok(toml::from_str(&text)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    /// Resolve the configuration against a working directory.
    ///
    /// Fails fast when either root comes out empty or relative; nothing has
    /// touched the filesystem at that point.
    pub fn resolve(&self, cwd: &Path) -> Result<Roots, ConfigError> {
        let source = match &self.in_dir {
            Some(dir) => cwd.join(dir),
            None => cwd.to_path_buf(),
        };
        if source.as_os_str().is_empty() || !source.is_absolute() {
            return Err(ConfigError::InvalidSourceRoot(source));
        }

        let target = match &self.out_dir {
            Some(dir) => source.join(dir),
            None => source.join("build"),
        };
        if target.as_os_str().is_empty() || !target.is_absolute() {
            return Err(ConfigError::InvalidTargetRoot(target));
        }

        Ok(Roots { source, target })
    }
}
