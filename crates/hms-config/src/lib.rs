pub mod config;
pub mod manager;

pub use config::{AiConfig, BackendConfig, Config, ConfigError, ConfigResult};
pub use manager::ConfigManager;

use std::path::PathBuf;

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &str) -> Option<PathBuf> {
    if let Some(stripped) = path.strip_prefix("~/") {
        return dirs::home_dir().map(|home| home.join(stripped));
    }
    if path == "~" {
        return dirs::home_dir();
    }
    Some(PathBuf::from(path))
}
