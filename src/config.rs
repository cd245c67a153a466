//! Runtime configuration
//!
//! Loaded from an optional JSON file, with fallback to defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::world::FOV_RADIUS;

/// Game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Replace procedural generation with a single fixed room and disable
    /// the fog-of-war entirely
    pub enable_debug_mode: bool,
    /// Map dimensions in tiles
    pub map_width: i32,
    pub map_height: i32,
    /// Light radius around the player
    pub fov_radius: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enable_debug_mode: false,
            map_width: 80,
            map_height: 50,
            fov_radius: FOV_RADIUS,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file, falling back to defaults when
    /// the file is missing or malformed.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("malformed config {}: {}; using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load("definitely/not/a/real/path.json");
        assert!(!config.enable_debug_mode);
        assert_eq!(config.map_width, 80);
        assert_eq!(config.fov_radius, 7);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"enable_debug_mode": true}"#).unwrap();
        assert!(config.enable_debug_mode);
        assert_eq!(config.map_height, 50);
    }
}
