//! Runtime configuration.
//!
//! The only setting is the identity (Raw Input interface path) of the touchpad to
//! translate. Sources, highest precedence first:
//! 1. `--device <identity>` on the command line
//! 2. `device = "..."` in a TOML file (`--config <path>`, or `touchpad-scroll.toml`
//!    next to the executable)
//! 3. [`DEFAULT_DEVICE_IDENTITY`]
//!
//! # Example file
//! ```toml
//! device = '\\?\HID#VID_0C45&PID_8101&MI_01#7&290539a9&0&0000#{378de44c-56ef-11d1-bc8c-00a0c91405dd}'
//! ```

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Built-in touchpad identity.
pub const DEFAULT_DEVICE_IDENTITY: &str =
    r"\\?\HID#VID_0C45&PID_8101&MI_01#7&290539a9&0&0000#{378de44c-56ef-11d1-bc8c-00a0c91405dd}";

/// File name looked up next to the executable.
pub const CONFIG_FILE_NAME: &str = "touchpad-scroll.toml";

/// On-disk representation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Raw Input interface path of the touchpad.
    pub device: Option<String>,
}

impl FileConfig {
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read `path`. A missing file is only an error when `required`.
    pub fn read(path: &Path, required: bool) -> Result<Option<Self>, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text, path).map(Some),
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// Effective configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Exact interface path the resolver compares against.
    pub device_identity: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device_identity: DEFAULT_DEVICE_IDENTITY.to_owned(),
        }
    }
}

impl Config {
    /// Merge file and command-line sources.
    ///
    /// `explicit` is a user-named config file and must exist; otherwise
    /// `fallback` is tried and silently skipped when absent.
    pub fn load(
        explicit: Option<&Path>,
        fallback: Option<&Path>,
        device_override: Option<String>,
    ) -> Result<Self, ConfigError> {
        let file = match (explicit, fallback) {
            (Some(path), _) => FileConfig::read(path, true)?,
            (None, Some(path)) => FileConfig::read(path, false)?,
            (None, None) => None,
        };
        Ok(Self::merge(file.unwrap_or_default(), device_override))
    }

    pub fn merge(file: FileConfig, device_override: Option<String>) -> Self {
        let device_identity = device_override
            .or(file.device)
            .unwrap_or_else(|| DEFAULT_DEVICE_IDENTITY.to_owned());
        Self { device_identity }
    }
}

/// `touchpad-scroll.toml` in the executable's directory.
pub fn default_config_path() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    Some(exe.parent()?.join(CONFIG_FILE_NAME))
}
