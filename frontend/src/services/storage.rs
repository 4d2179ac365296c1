use gloo::storage::{LocalStorage, Storage};
use shared::FilterConfig;

/// Local storage key holding the last used filter.
pub const CONFIG_STORAGE_KEY: &str = "config";

pub struct ConfigStore;

impl ConfigStore {
    /// Restore the saved filter, or the defaults when there is none or it is unusable.
    pub fn load() -> FilterConfig {
        let raw = match LocalStorage::raw().get_item(CONFIG_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::info!("No saved filter, using defaults");
                return FilterConfig::default();
            }
            Err(e) => {
                tracing::warn!("Failed to read saved filter, using defaults: {:?}", e);
                return FilterConfig::default();
            }
        };

        match FilterConfig::from_json(&raw) {
            Ok(config) => {
                tracing::debug!("Restored filter {:?}", config);
                config
            }
            Err(e) => {
                tracing::warn!("Saved filter unusable, using defaults: {}", e);
                FilterConfig::default()
            }
        }
    }

    pub fn save(config: &FilterConfig) {
        let raw = match config.to_json() {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to encode filter: {}", e);
                return;
            }
        };
        if let Err(e) = LocalStorage::raw().set_item(CONFIG_STORAGE_KEY, &raw) {
            tracing::warn!("Failed to save filter: {:?}", e);
        }
    }
}
