//! # Toolkit Defaults
//!
//! Values a fresh session starts from. Every one of them can be overridden
//! through `UiConfig` or from inside a declaration procedure.

// =============================================================================
// COORDINATES
// =============================================================================

/// Virtual size of the smallest screen dimension.
pub const DEFAULT_VIRTUAL_RESOLUTION: f32 = 1000.0;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Id used by `start_group` when the caller does not name the group.
pub const DEFAULT_GROUP_ID: &str = "__group_id__";

/// Id used by `image` when the caller does not name the image.
pub const DEFAULT_IMAGE_ID: &str = "__image_id__";

// =============================================================================
// INTERACTION
// =============================================================================

/// Pointer travel (physical pixels) before a press turns into a drag.
pub const DEFAULT_DRAG_START_THRESHOLD: i32 = 8;

/// Scroll distance per pixel of pointer drag.
pub const DEFAULT_SCROLL_SPEED_DRAG: f32 = 1.0;

/// Scroll distance per wheel notch.
pub const DEFAULT_SCROLL_SPEED_WHEEL: f32 = 16.0;

/// Fraction of the scroll window covered per second of held direction key.
pub const DEFAULT_SCROLL_SPEED_GAMEPAD: f32 = 1.0;

/// Slider value change per direction key press.
pub const DEFAULT_SLIDER_STEP: f32 = 0.1;

/// Seconds between caret visibility toggles.
pub const DEFAULT_CARET_BLINK_PERIOD: f32 = 0.5;

// =============================================================================
// TEXT
// =============================================================================

/// Multiplier applied to the font size to get the line advance.
pub const DEFAULT_LINE_HEIGHT_SCALE: f32 = 1.2;

/// Appended to the last visible line of a truncated label.
pub const DEFAULT_ELLIPSIS: &str = "...";
