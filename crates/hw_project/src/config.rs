// crates/hw_project/src/config.rs

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the optional project config file at the project root.
pub const CFG_FILENAME: &str = ".hwconfig.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("malformed {}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Contents of `.hwconfig.json`. Every key is optional and unknown keys are ignored.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct HwConfig {
    /// Executable overrides keyed by conventional name, e.g. `"cmake"`.
    #[serde(default)]
    pub executables: HashMap<String, String>,
    /// Staging directory, relative to the directory the tools run in.
    #[serde(default)]
    pub stage_dir: Option<PathBuf>,
}

impl HwConfig {
    /// Parses the config at `path`. A blank file is an empty config.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `<project_root>/.hwconfig.json`, or the default config if it does not exist.
    pub fn load_from_root(project_root: &Path) -> Result<Self, ConfigError> {
        let path = project_root.join(CFG_FILENAME);
        if !path.is_file() {
            tracing::debug!("no {} under {}; using defaults", CFG_FILENAME, project_root.display());
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Returns the configured executable for `name`, or `name` itself.
    pub fn resolve_executable(&self, name: &str) -> String {
        match self.executables.get(name) {
            Some(exe) if !exe.trim().is_empty() => exe.clone(),
            _ => name.to_string(),
        }
    }
}
