use crate::context::Frame;
use crate::interaction::Event;
use crate::layout::{Layout, Margin};
use crate::render::TextureHandle;

/// Checkbox with a label. Toggles `is_checked` on release, after the
/// current state has been drawn.
pub fn checkbox(
    frame: &mut Frame<'_>,
    checked: &TextureHandle,
    unchecked: &TextureHandle,
    label: &str,
    size: f32,
    margin: Margin,
    is_checked: &mut bool,
) -> Event {
    frame.start_group(Layout::HORIZONTAL_BOTTOM, 0.0, label);
    let event = frame.check_event();
    frame.image(if *is_checked { checked } else { unchecked }, size);
    frame.set_margin(margin);
    frame.label(label, size);
    if event.has(Event::WENT_UP) {
        *is_checked = !*is_checked;
    }
    frame.end_group();
    event
}
