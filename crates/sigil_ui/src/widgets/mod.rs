//! Stock widgets.
//!
//! Composites built only from the public `Frame` API. They double as
//! examples of how to write controls on top of the core.

mod button;
mod checkbox;
mod collapsible;
mod slider;

pub use button::{
    event_background, image_button, text_button, text_button_with_image, toggle_image_button,
    ButtonProperty,
};
pub use checkbox::checkbox;
pub use collapsible::collapsible_group;
pub use slider::{scrollbar, slider};
