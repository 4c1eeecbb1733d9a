use std::fs;
use std::path::Path;

use egui::Color32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming an optional JSON configuration file
pub const CONFIG_ENV: &str = "WHITEBOARD_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Invalid config data: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

/// Startup settings for a drawing session.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// RGBA, unmultiplied
    pub background: [u8; 4],
    pub brush_color: [u8; 4],
    pub brush_size: u32,
    /// Pixel height of placed text
    pub text_size: f32,
    /// Whether new rectangles and dots start filled
    pub fill_shapes: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 600,
            background: [255, 255, 255, 255],
            brush_color: [0, 0, 0, 255],
            brush_size: 5,
            text_size: 18.0,
            fill_shapes: true,
        }
    }
}

impl EditorConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file named by [`CONFIG_ENV`] if set, falling back to defaults
    /// when it is unset or unusable.
    pub fn from_env() -> Self {
        let Ok(path) = std::env::var(CONFIG_ENV) else {
            return Self::default();
        };
        match Self::load(Path::new(&path)) {
            Ok(config) => {
                log::info!("Loaded config from {}", path);
                config
            }
            Err(err) => {
                log::warn!("Ignoring config {}: {}", path, err);
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.brush_size == 0 {
            return Err(ConfigError::InvalidValue("brush_size must be at least 1".into()));
        }
        if !(self.text_size.is_finite() && self.text_size > 0.0) {
            return Err(ConfigError::InvalidValue("text_size must be positive".into()));
        }
        Ok(())
    }

    pub fn background_color(&self) -> Color32 {
        let [r, g, b, a] = self.background;
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }

    pub fn brush_color(&self) -> Color32 {
        let [r, g, b, a] = self.brush_color;
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }
}
