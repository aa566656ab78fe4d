// region:    --- Imports
use std::path::PathBuf;
use std::time::Duration;

// endregion: --- Imports

// region:    --- Constants

/// Blanket timeout applied to every backend request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Auction detail refresh interval.
pub const POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Countdown recompute interval.
pub const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

/// Platform fee charged on each order, as a fraction of the item price.
pub const PLATFORM_FEE_RATE: f64 = 0.05;

// endregion: --- Constants

// region:    --- StoreConfig

/// Runtime configuration for the storefront.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the REST backend.
    pub api_base_url: String,
    /// Directory for the browser-local-storage equivalent.
    pub storage_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api".to_string(),
            storage_dir: PathBuf::from(".purple-dog"),
        }
    }
}

impl StoreConfig {
    /// Build configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: std::env::var("PURPLE_DOG_API_URL")
                .unwrap_or(defaults.api_base_url),
            storage_dir: std::env::var("PURPLE_DOG_STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_dir),
        }
    }
}

// endregion: --- StoreConfig
