//! Storage initialization
//!
//! Creates directories, default settings and empty data files for a fresh
//! budget.

use crate::config::paths::PayplanPaths;
use crate::config::settings::Settings;
use crate::error::{PayplanError, PayplanResult};

use super::Storage;

/// Initialize a fresh payplan data directory
///
/// Fails if the directory already holds an initialized budget.
pub fn initialize_storage(paths: &PayplanPaths) -> PayplanResult<Storage> {
    if paths.is_initialized() {
        return Err(PayplanError::Config(format!(
            "Already initialized at {}",
            paths.base_dir().display()
        )));
    }

    paths.ensure_directories()?;
    Settings::default().save(paths)?;

    let storage = Storage::new(paths.clone())?;
    storage.save_all()?;

    Ok(storage)
}
