//! Slider and scrollbar.

use super::button::event_background;
use crate::context::Frame;
use crate::interaction::Event;
use crate::layout::{Direction, Layout};
use crate::render::TextureHandle;
use sigil_shared::{HashedId, Vec2, Vec2i, Vec4};

const STRETCH_CENTER: Vec4 = Vec4::new(0.5, 0.5, 0.5, 0.5);

/// Horizontal slider: a nine-patch bar with a square knob. `value` is in
/// `[0, 1]`.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn slider(
    frame: &mut Frame<'_>,
    bar: &TextureHandle,
    knob: &TextureHandle,
    size: Vec2,
    bar_height: f32,
    id: &str,
    value: &mut f32,
) -> Event {
    frame.start_group(Layout::HORIZONTAL_BOTTOM, 0.0, id);
    frame.start_slider(Direction::Horizontal, size.y * 0.5, value);
    let event = frame.check_event();
    if !frame.is_last_event_pointer_type() {
        event_background(frame, event);
    }

    let current = *value;
    frame.custom_element_id(size, HashedId::from_parts(&[id, "/knob"]), |painter, pos, size| {
        let bar_pos = pos + Vec2i::new(size.y / 2, (size.y as f32 * (1.0 - bar_height) / 2.0) as i32);
        let bar_size = Vec2i::new((size.x - size.y).max(0), (size.y as f32 * bar_height) as i32);
        painter.nine_patch(bar, STRETCH_CENTER, bar_pos, bar_size);

        let knob_pos = pos + Vec2i::new((current * (size.x - size.y) as f32) as i32, 0);
        painter.texture(knob, knob_pos, Vec2i::new(size.y, size.y));
    });

    frame.end_slider();
    frame.end_group();
    event
}

/// Scrollbar for a scroll group. Its direction follows the longer side of
/// `size`; `bar_size` is the thumb length as a fraction of the track.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn scrollbar(
    frame: &mut Frame<'_>,
    background: &TextureHandle,
    foreground: &TextureHandle,
    size: Vec2,
    bar_size: f32,
    id: &str,
    scroll_value: &mut f32,
) -> Event {
    frame.start_group(Layout::HORIZONTAL_BOTTOM, 0.0, id);
    let (direction, axis) = if size.y < size.x {
        (Direction::Horizontal, 0)
    } else {
        (Direction::Vertical, 1)
    };
    let margin = size[axis] * bar_size * 0.5;
    frame.start_slider(direction, margin, scroll_value);

    let event = frame.check_event();
    if !frame.is_last_event_pointer_type() {
        event_background(frame, event);
    }

    let current = *scroll_value;
    let margin_px = margin * frame.scale();
    frame.custom_element_id(size, HashedId::from_parts(&[id, "/thumb"]), |painter, pos, size| {
        let mut thumb_pos = pos;
        thumb_pos[axis] += (current * (size[axis] as f32 - margin_px * 2.0)) as i32;
        let mut thumb_size = size;
        thumb_size[axis] = (size[axis] as f32 * bar_size) as i32;

        painter.nine_patch(background, STRETCH_CENTER, pos, size);
        painter.nine_patch(foreground, STRETCH_CENTER, thumb_pos, thumb_size);
    });

    frame.end_slider();
    frame.end_group();
    event
}
