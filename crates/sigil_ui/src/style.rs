//! Colors and the per-pass style block.

use serde::{Deserialize, Serialize};

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Color {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Solid black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    /// Translucent grey drawn behind hovered controls.
    pub const HOVER: Self = Self::rgba(0.5, 0.5, 0.5, 0.5);
    /// Translucent white drawn behind pressed controls.
    pub const CLICK: Self = Self::rgba(1.0, 1.0, 1.0, 0.5);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from RGB values (0-1) with full alpha.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Creates a color from hex value (0xRRGGBBAA).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hex(hex: u32) -> Self {
        let r = ((hex >> 24) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let b = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let a = (hex & 0xFF) as f32 / 255.0;
        Self::rgba(r, g, b, a)
    }

    /// Returns a new color with different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Converts to array format.
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Settings the declaration procedure may change while it runs.
///
/// Each pass starts from a fresh copy built from `UiConfig`, so a setter
/// called halfway through the procedure affects the same declarations in
/// both passes.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    /// Label and edit text color.
    pub text_color: Color,
    /// Edit box caret color.
    pub caret_color: Color,
    /// Tint for `image`.
    pub image_color: Color,
    /// Background of hovered stock widgets.
    pub hover_color: Color,
    /// Background of pressed stock widgets.
    pub click_color: Color,
    /// Line advance as a multiple of the font size.
    pub line_height_scale: f32,
    /// Marker appended to truncated labels.
    pub ellipsis: String,
    /// Scroll distance per pixel of drag.
    pub scroll_speed_drag: f32,
    /// Scroll distance per wheel notch.
    pub scroll_speed_wheel: f32,
    /// Window fraction scrolled per second of held direction key.
    pub scroll_speed_gamepad: f32,
    /// Pointer travel before a press becomes a drag (physical pixels).
    pub drag_start_threshold: i32,
    /// Slider change per direction key press.
    pub slider_step: f32,
}
