//! User settings for payplan
//!
//! Manages user preferences: the pay cycle every contribution is expressed
//! in, display formatting, and the rounding tolerance used by balance
//! comparisons.

use serde::{Deserialize, Serialize};

use super::paths::PayplanPaths;
use crate::error::PayplanError;
use crate::models::{Money, PayCycle};
use crate::storage::file_io::{read_json, write_json_atomic};

/// User settings for payplan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// The user's recurring income interval
    #[serde(default)]
    pub pay_cycle: PayCycle,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Slack for balance comparisons, in cents
    #[serde(default = "default_tolerance_cents")]
    pub tolerance_cents: i64,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_tolerance_cents() -> i64 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            pay_cycle: PayCycle::default(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            tolerance_cents: default_tolerance_cents(),
        }
    }
}

impl Settings {
    /// The balance comparison tolerance as a Money amount
    pub fn tolerance(&self) -> Money {
        Money::from_cents(self.tolerance_cents)
    }

    /// Load settings from disk, creating defaults if the file doesn't exist
    pub fn load_or_create(paths: &PayplanPaths) -> Result<Self, PayplanError> {
        let path = paths.settings_file();
        if path.exists() {
            read_json(&path)
        } else {
            let settings = Self::default();
            settings.save(paths)?;
            Ok(settings)
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PayplanPaths) -> Result<(), PayplanError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.pay_cycle, PayCycle::Monthly);
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.tolerance().cents(), 1);
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PayplanPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings.schema_version, 1);
        assert!(paths.settings_file().exists());
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PayplanPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.pay_cycle = PayCycle::Fortnightly;
        settings.currency_symbol = "€".into();
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.pay_cycle, PayCycle::Fortnightly);
        assert_eq!(loaded.currency_symbol, "€");
    }
}
