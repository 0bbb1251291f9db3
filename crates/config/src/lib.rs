//! Shared configuration for Quill
//!
//! This crate provides the single source of truth for drawing board
//! dimensions, oversampling, layer interpolation and export mode.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default logical board width in pixels
pub const DEFAULT_WIDTH: u32 = 300;

/// Default logical board height in pixels
pub const DEFAULT_HEIGHT: u32 = 300;

/// Default oversampling factor between logical and layer resolution
pub const DEFAULT_RENDER_RATIO: u32 = 3;

/// Default smoothing of the persisted layer's pixel sampling
pub const DEFAULT_INTERPOLATION: bool = true;

/// Errors raised while validating or parsing configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Render ratio must be at least 1, got {0}")]
    InvalidRenderRatio(u32),

    #[error("Board size must be non-zero, got {width}x{height}")]
    EmptyBoard { width: u32, height: u32 },

    #[error("Unknown export mode: {0:?} (expected \"png\" or \"ink\")")]
    UnknownMode(String),
}

/// Export format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportMode {
    #[default]
    Png,
    Ink,
}

impl ExportMode {
    pub const ALL: [ExportMode; 2] = [ExportMode::Png, ExportMode::Ink];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportMode::Png => "png",
            ExportMode::Ink => "ink",
        }
    }
}

impl fmt::Display for ExportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownMode(s.to_string()))
    }
}

/// Drawing board configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardConfig {
    /// Board width in logical pixels
    pub width: u32,
    /// Board height in logical pixels
    pub height: u32,
    /// Layer pixels per logical pixel
    pub render_ratio: u32,
    /// Whether the persisted layer smooths its pixel sampling.
    /// The active layer never does.
    pub interpolation: bool,
    /// Export format selection
    pub mode: ExportMode,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            render_ratio: DEFAULT_RENDER_RATIO,
            interpolation: DEFAULT_INTERPOLATION,
            mode: ExportMode::default(),
        }
    }
}

impl BoardConfig {
    /// Create a new board config with the given logical dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_render_ratio(mut self, render_ratio: u32) -> Self {
        self.render_ratio = render_ratio;
        self
    }

    pub fn with_interpolation(mut self, interpolation: bool) -> Self {
        self.interpolation = interpolation;
        self
    }

    pub fn with_mode(mut self, mode: ExportMode) -> Self {
        self.mode = mode;
        self
    }

    /// Check the configuration before a board is built from it
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.render_ratio < 1 {
            return Err(ConfigError::InvalidRenderRatio(self.render_ratio));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyBoard {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Get width as f32 for calculations
    pub fn width_f32(&self) -> f32 {
        self.width as f32
    }

    /// Get height as f32 for calculations
    pub fn height_f32(&self) -> f32 {
        self.height as f32
    }

    /// Render ratio as f32 for calculations
    pub fn ratio_f32(&self) -> f32 {
        self.render_ratio as f32
    }

    /// Layer width in physical pixels
    pub fn layer_width(&self) -> u32 {
        self.width * self.render_ratio
    }

    /// Layer height in physical pixels
    pub fn layer_height(&self) -> u32 {
        self.height * self.render_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BoardConfig::default();
        assert_eq!(config.render_ratio, 3);
        assert!(config.interpolation);
        assert_eq!(config.mode, ExportMode::Png);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_layer_dimensions() {
        let config = BoardConfig::new(200, 100).with_render_ratio(2);
        assert_eq!(config.layer_width(), 400);
        assert_eq!(config.layer_height(), 200);
    }

    #[test]
    fn test_zero_ratio_rejected() {
        let config = BoardConfig::new(200, 200).with_render_ratio(0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidRenderRatio(0)));
    }

    #[test]
    fn test_empty_board_rejected() {
        let config = BoardConfig::new(0, 200);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyBoard { width: 0, height: 200 })
        ));
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("ink".parse::<ExportMode>(), Ok(ExportMode::Ink));
        assert_eq!("png".parse::<ExportMode>(), Ok(ExportMode::Png));
        assert_eq!(
            "svg".parse::<ExportMode>(),
            Err(ConfigError::UnknownMode("svg".to_string()))
        );
    }

    #[test]
    fn test_deserialize_partial() {
        let config: BoardConfig =
            serde_json::from_str(r#"{"width": 200, "height": 150, "mode": "ink"}"#).unwrap();
        assert_eq!(config.width, 200);
        assert_eq!(config.height, 150);
        assert_eq!(config.render_ratio, DEFAULT_RENDER_RATIO);
        assert_eq!(config.mode, ExportMode::Ink);
    }

    #[test]
    fn test_deserialize_unknown_mode_fails() {
        let result: Result<BoardConfig, _> = serde_json::from_str(r#"{"mode": "svg"}"#);
        assert!(result.is_err());
    }
}
