mod config;
pub mod favorites;
pub mod kv;

pub use config::{Config, ShareConfig, ShuffleSection, StorageConfig};
pub use favorites::{FavoritesStore, SAVED_PROMPTS_KEY};
pub use kv::{FileStorage, KeyValueStorage, MemoryStorage, UnavailableStorage};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/drift[-dev]/` based on DRIFT_ENV.
///
/// Set DRIFT_ENV=dev to use development data directory. DRIFT_DATA_DIR
/// overrides both.
///
/// # Errors
/// Returns an error if creating the data directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("DRIFT_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("DRIFT_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("drift-dev")
            } else {
                base_dir.join("drift")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
