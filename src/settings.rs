//! Host settings with persistence
//!
//! Settings are read from `~/.config/celery/settings.toml`. Every section is
//! optional; missing keys take their defaults.

use std::fs;
use std::path::PathBuf;

use celery_core::Viewport;
use celery_driver::DriverConfig;
use celery_link::LinkConfig;
use celery_render::CameraConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Serial device used when neither the command line nor the settings file
/// names one
pub const DEFAULT_PORT: &str = "/dev/ttyUSB0";

/// All host settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Serial device, or `file:<path>` to capture the stream
    pub port: String,
    pub link: LinkConfig,
    pub driver: DriverConfig,
    pub camera: CameraConfig,
    pub viewport: Viewport,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT.to_string(),
            link: LinkConfig::default(),
            driver: DriverConfig::default(),
            camera: CameraConfig::default(),
            viewport: Viewport::default(),
        }
    }
}

impl Settings {
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("celery"))
    }

    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match Self::parse(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Apply a port given on the command line
    pub fn with_port(mut self, port: Option<String>) -> Self {
        if let Some(port) = port {
            self.port = port;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_round_trip() {
        let settings = Settings::default();
        let text = toml::to_string_pretty(&settings).unwrap();
        assert_eq!(Settings::parse(&text).unwrap(), settings);
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Settings::parse("").unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_sections() {
        let settings = Settings::parse(
            r#"
            port = "/dev/ttyACM0"

            [link]
            baud_rate = 921600

            [driver]
            max_frames = 120
            "#,
        )
        .unwrap();

        assert_eq!(settings.port, "/dev/ttyACM0");
        assert_eq!(settings.link.baud_rate, 921600);
        assert_eq!(settings.link.read_timeout_ms, 1000);
        assert_eq!(settings.driver.max_frames, Some(120));
        assert_eq!(settings.driver.min_frame_interval_ms, 150);
        assert_eq!(settings.viewport, Viewport::default());
    }

    #[test]
    fn test_command_line_port_wins() {
        let settings = Settings::default().with_port(Some("file:out.bin".to_string()));
        assert_eq!(settings.port, "file:out.bin");
        assert_eq!(Settings::default().with_port(None).port, DEFAULT_PORT);
    }

    #[test]
    fn test_invalid_flags_rejected() {
        let result = Settings::parse("[driver]\nrender_flags = 240\n");
        assert!(result.is_err());
    }
}
