//! Buttons.

use crate::context::Frame;
use crate::interaction::Event;
use crate::layout::{Layout, Margin};
use crate::render::TextureHandle;

/// Button options (bitfield).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonProperty(u8);

impl ButtonProperty {
    /// No options.
    pub const NONE: Self = Self(0);
    /// Button ignores input.
    pub const DISABLED: Self = Self(1);
    /// Image left of the text.
    pub const IMAGE_LEFT: Self = Self(2);
    /// Image right of the text.
    pub const IMAGE_RIGHT: Self = Self(4);

    /// Returns true if the flag is set.
    #[inline]
    #[must_use]
    pub const fn has(self, flag: Self) -> bool {
        (self.0 & flag.0) != 0
    }
}

impl std::ops::BitOr for ButtonProperty {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Fills the current group with the click or hover color for `event`.
pub fn event_background(frame: &mut Frame<'_>, event: Event) {
    if event.has(Event::IS_DOWN) {
        let color = frame.style().click_color;
        frame.color_background(color);
    } else if event.has(Event::HOVER) {
        let color = frame.style().hover_color;
        frame.color_background(color);
    }
}

/// Clickable image.
pub fn image_button(
    frame: &mut Frame<'_>,
    texture: &TextureHandle,
    size: f32,
    margin: Margin,
    id: &str,
) -> Event {
    frame.start_group(Layout::VERTICAL_LEFT, size, id);
    frame.set_margin(margin);
    let event = frame.check_event();
    event_background(frame, event);
    frame.image(texture, size);
    frame.end_group();
    event
}

/// Image button showing `down` while pressed.
pub fn toggle_image_button(
    frame: &mut Frame<'_>,
    up: &TextureHandle,
    down: &TextureHandle,
    size: f32,
    margin: Margin,
    id: &str,
) -> Event {
    frame.start_group(Layout::VERTICAL_LEFT, size, id);
    frame.set_margin(margin);
    let event = frame.check_event();
    event_background(frame, event);
    frame.image(if event.has(Event::IS_DOWN) { down } else { up }, size);
    frame.end_group();
    event
}

/// Button with a text label, identified by its text.
pub fn text_button(frame: &mut Frame<'_>, text: &str, size: f32, margin: Margin) -> Event {
    frame.start_group(Layout::VERTICAL_LEFT, size, text);
    frame.set_margin(margin);
    let event = frame.check_event();
    event_background(frame, event);
    frame.label(text, size);
    frame.end_group();
    event
}

fn show_texture(frame: &mut Frame<'_>, texture: &TextureHandle, margin: Margin, size: f32) {
    frame.start_group(Layout::VERTICAL_LEFT, size, "__texture__");
    frame.set_margin(margin);
    frame.image(texture, size);
    frame.end_group();
}

/// Text button with an image on either side.
pub fn text_button_with_image(
    frame: &mut Frame<'_>,
    texture: &TextureHandle,
    texture_margin: Margin,
    text: &str,
    size: f32,
    text_margin: Margin,
    property: ButtonProperty,
) -> Event {
    frame.start_group(Layout::HORIZONTAL_CENTER, 0.0, text);
    let mut event = Event::NONE;
    if !property.has(ButtonProperty::DISABLED) {
        event = frame.check_event();
        event_background(frame, event);
    }

    if property.has(ButtonProperty::IMAGE_LEFT) {
        show_texture(frame, texture, texture_margin, size);
    }

    frame.start_group(Layout::VERTICAL_LEFT, size, "__text__");
    frame.set_margin(text_margin);
    frame.label(text, size);
    frame.end_group();

    if property.has(ButtonProperty::IMAGE_RIGHT) {
        show_texture(frame, texture, texture_margin, size);
    }

    frame.end_group();
    event
}
