use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Frames per second of the output sequence
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// Display name of the generated sequence
    #[serde(default = "default_sequence_name")]
    pub sequence_name: String,

    /// Extension of the numbered image files (without the dot)
    #[serde(default = "default_image_extension")]
    pub image_extension: String,

    /// Sequence width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Sequence height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_fps() -> u32 {
    24
}

fn default_sequence_name() -> String {
    "Generated Sequence".to_string()
}

fn default_image_extension() -> String {
    "png".to_string()
}

fn default_width() -> u32 {
    1920
}

fn default_height() -> u32 {
    1080
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.fps == 0 {
            return Err(anyhow!("Frame rate must be a positive integer"));
        }

        if self.image_extension.is_empty() || self.image_extension.starts_with('.') {
            return Err(anyhow!(
                "Image extension must be non-empty and given without a leading dot, got '{}'",
                self.image_extension
            ));
        }

        if self.width == 0 || self.height == 0 {
            return Err(anyhow!("Sequence dimensions must be positive"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            fps: default_fps(),
            sequence_name: default_sequence_name(),
            image_extension: default_image_extension(),
            width: default_width(),
            height: default_height(),
            log_level: LogLevel::default(),
        }
    }
}
