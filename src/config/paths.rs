//! Path management for payplan
//!
//! Provides XDG-compliant path resolution for configuration and data.
//!
//! ## Path Resolution Order
//!
//! 1. `PAYPLAN_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/payplan` or `~/.config/payplan`
//! 3. Windows: `%APPDATA%\payplan`

use std::path::PathBuf;

use crate::error::PayplanError;

/// Manages all paths used by payplan
#[derive(Debug, Clone)]
pub struct PayplanPaths {
    /// Base directory for all payplan data
    base_dir: PathBuf,
}

impl PayplanPaths {
    /// Create a new PayplanPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, PayplanError> {
        let base_dir = if let Ok(custom) = std::env::var("PAYPLAN_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create PayplanPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/payplan/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/payplan/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to envelopes.json
    pub fn envelopes_file(&self) -> PathBuf {
        self.data_dir().join("envelopes.json")
    }

    /// Get the path to incomes.json
    pub fn incomes_file(&self) -> PathBuf {
        self.data_dir().join("incomes.json")
    }

    /// Get the path to debts.json
    pub fn debts_file(&self) -> PathBuf {
        self.data_dir().join("debts.json")
    }

    /// Get the path to transfers.json
    pub fn transfers_file(&self) -> PathBuf {
        self.data_dir().join("transfers.json")
    }

    /// Get the path to projections.json
    pub fn projections_file(&self) -> PathBuf {
        self.data_dir().join("projections.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), PayplanError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| PayplanError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| PayplanError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if payplan has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, PayplanError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
    Ok(config_base.join("payplan"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, PayplanError> {
    // Windows: Use APPDATA
    let appdata = std::env::var("APPDATA")
        .map_err(|_| PayplanError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("payplan"))
}
