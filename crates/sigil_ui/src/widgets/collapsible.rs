use super::button::text_button;
use crate::context::Frame;
use crate::interaction::Event;
use crate::layout::{Layout, Margin};

/// Header button that shows `contents` while `expand` is set. Clicking the
/// header flips `expand`.
pub fn collapsible_group<F>(
    frame: &mut Frame<'_>,
    label: &str,
    ysize: f32,
    margin: Margin,
    id: &str,
    expand: &mut bool,
    contents: F,
) -> Event
where
    F: FnOnce(&mut Frame<'_>),
{
    frame.start_group(Layout::VERTICAL_LEFT, 0.0, id);
    frame.set_margin(margin);
    let event = text_button(frame, label, ysize, margin);
    if event.has(Event::WENT_UP) {
        *expand = !*expand;
    }
    frame.end_group();

    if *expand {
        contents(frame);
    }
    event
}
