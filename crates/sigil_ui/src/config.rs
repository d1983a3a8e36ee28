//! Session configuration.
//!
//! Loaded once at startup, usually from a TOML file shipped with the game:
//!
//! ```toml
//! virtual_resolution = 720.0
//! drag_start_threshold = 12
//! ellipsis = "…"
//!
//! [text_color]
//! r = 0.9
//! g = 0.9
//! b = 0.9
//! ```
//!
//! Missing keys fall back to the toolkit defaults.

use crate::error::ConfigError;
use crate::style::{Color, Style};
use serde::{Deserialize, Serialize};
use sigil_shared::constants::{
    DEFAULT_CARET_BLINK_PERIOD, DEFAULT_DRAG_START_THRESHOLD, DEFAULT_ELLIPSIS,
    DEFAULT_LINE_HEIGHT_SCALE, DEFAULT_SCROLL_SPEED_DRAG, DEFAULT_SCROLL_SPEED_GAMEPAD,
    DEFAULT_SCROLL_SPEED_WHEEL, DEFAULT_SLIDER_STEP, DEFAULT_VIRTUAL_RESOLUTION,
};
use std::path::Path;

/// Settings that live for the whole session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Virtual size of the smallest screen dimension.
    pub virtual_resolution: f32,
    /// Pointer travel before a press becomes a drag (physical pixels).
    pub drag_start_threshold: i32,
    /// Scroll distance per pixel of drag.
    pub scroll_speed_drag: f32,
    /// Scroll distance per wheel notch.
    pub scroll_speed_wheel: f32,
    /// Window fraction scrolled per second of held direction key.
    pub scroll_speed_gamepad: f32,
    /// Slider change per direction key press.
    pub slider_step: f32,
    /// Line advance as a multiple of the font size.
    pub line_height_scale: f32,
    /// Marker appended to truncated labels.
    pub ellipsis: String,
    /// Seconds between caret visibility toggles.
    pub caret_blink_period: f32,
    /// Label and edit text color.
    pub text_color: Color,
    /// Edit box caret color.
    pub caret_color: Color,
    /// Tint for images.
    pub image_color: Color,
    /// Background of hovered stock widgets.
    pub hover_color: Color,
    /// Background of pressed stock widgets.
    pub click_color: Color,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            virtual_resolution: DEFAULT_VIRTUAL_RESOLUTION,
            drag_start_threshold: DEFAULT_DRAG_START_THRESHOLD,
            scroll_speed_drag: DEFAULT_SCROLL_SPEED_DRAG,
            scroll_speed_wheel: DEFAULT_SCROLL_SPEED_WHEEL,
            scroll_speed_gamepad: DEFAULT_SCROLL_SPEED_GAMEPAD,
            slider_step: DEFAULT_SLIDER_STEP,
            line_height_scale: DEFAULT_LINE_HEIGHT_SCALE,
            ellipsis: DEFAULT_ELLIPSIS.to_owned(),
            caret_blink_period: DEFAULT_CARET_BLINK_PERIOD,
            text_color: Color::WHITE,
            caret_color: Color::WHITE,
            image_color: Color::WHITE,
            hover_color: Color::HOVER,
            click_color: Color::CLICK,
        }
    }
}

impl UiConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML and
    /// `ConfigError::Invalid` for out-of-range values.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, otherwise the
    /// errors of [`UiConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::info!("Loaded UI config from {}", path.display());
        Ok(config)
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.virtual_resolution > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "virtual_resolution must be positive, got {}",
                self.virtual_resolution
            )));
        }
        if self.drag_start_threshold < 0 {
            return Err(ConfigError::Invalid(format!(
                "drag_start_threshold must not be negative, got {}",
                self.drag_start_threshold
            )));
        }
        if !(self.line_height_scale > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "line_height_scale must be positive, got {}",
                self.line_height_scale
            )));
        }
        if !(self.caret_blink_period > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "caret_blink_period must be positive, got {}",
                self.caret_blink_period
            )));
        }
        if !(0.0..=1.0).contains(&self.slider_step) {
            return Err(ConfigError::Invalid(format!(
                "slider_step must be within [0, 1], got {}",
                self.slider_step
            )));
        }
        Ok(())
    }

    /// Builds the style block a pass starts from.
    #[must_use]
    pub fn style(&self) -> Style {
        Style {
            text_color: self.text_color,
            caret_color: self.caret_color,
            image_color: self.image_color,
            hover_color: self.hover_color,
            click_color: self.click_color,
            line_height_scale: self.line_height_scale,
            ellipsis: self.ellipsis.clone(),
            scroll_speed_drag: self.scroll_speed_drag,
            scroll_speed_wheel: self.scroll_speed_wheel,
            scroll_speed_gamepad: self.scroll_speed_gamepad,
            drag_start_threshold: self.drag_start_threshold,
            slider_step: self.slider_step,
        }
    }
}
