//! Configuration file for the proddata CLI
//!
//! JSON, every field optional:
//!
//! ```json
//! {
//!   "device_path": "/dev/mtd1",
//!   "serial_path": "/dev/mtd0",
//!   "serial_offset": 0,
//!   "log_level": "warn"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::access::FileAccess;
use crate::observability::Severity;

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Device node or image file holding the registers
    #[serde(default = "default_device_path")]
    pub device_path: PathBuf,

    /// Factory region holding the serial number (optional)
    #[serde(default)]
    pub serial_path: Option<PathBuf>,

    /// Offset of the serial number inside `serial_path`
    #[serde(default)]
    pub serial_offset: u64,

    /// Minimum log severity written to stderr
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_device_path() -> PathBuf {
    PathBuf::from("/dev/mtd1")
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device_path: default_device_path(),
            serial_path: None,
            serial_offset: 0,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        if self.device_path.as_os_str().is_empty() {
            return Err(CliError::config_error("device_path must not be empty"));
        }

        if let Some(ref serial_path) = self.serial_path {
            if serial_path.as_os_str().is_empty() {
                return Err(CliError::config_error("serial_path must not be empty"));
            }
        }

        self.severity()?;

        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse::<Severity>()
            .map_err(|e| CliError::config_error(format!("Invalid log_level: {}", e)))
    }

    /// Opens the configured device
    pub fn open_device(&self) -> CliResult<FileAccess> {
        let access = FileAccess::open(&self.device_path)?;
        Ok(match self.serial_path {
            Some(ref serial_path) => access.with_serial(serial_path, self.serial_offset),
            None => access,
        })
    }
}
