//! Data-driven declarations.
//!
//! A [`UiDocument`] is a tree of widget nodes loaded from TOML. [`declare`]
//! walks it through a [`Frame`] in both passes, exactly as hand-written
//! declaration code would. Values a widget edits live in [`Bindings`],
//! keyed by node id, and textures are looked up by name:
//!
//! ```toml
//! [[nodes]]
//! type = "group"
//! id = "options"
//! layout = { direction = "vertical", alignment = "center" }
//! spacing = 8.0
//! position = { horizontal = "center", vertical = "center" }
//!
//! [[nodes.children]]
//! type = "label"
//! id = "title"
//! text = "Options"
//! ysize = 30.0
//!
//! [[nodes.children]]
//! type = "slider"
//! id = "volume"
//! bar = "slider_bar"
//! knob = "slider_knob"
//! size = [200.0, 20.0]
//! bar_size = 0.4
//! ```

use crate::context::{Frame, Pass};
use crate::error::DocumentError;
use crate::interaction::Event;
use crate::layout::{Alignment, Layout, Margin};
use crate::render::TextureHandle;
use crate::text::TextAlignment;
use crate::widgets;
use serde::{Deserialize, Serialize};
use sigil_shared::Vec2;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Where a group sits on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Horizontal alignment.
    pub horizontal: Alignment,
    /// Vertical alignment.
    pub vertical: Alignment,
    /// Offset after alignment, in virtual units.
    #[serde(default)]
    pub offset: [f32; 2],
}

/// One declaration in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// `Frame::start_group` around `children`.
    Group {
        /// Group id.
        id: String,
        /// Direction and alignment.
        #[serde(default)]
        layout: Layout,
        /// Space between children.
        #[serde(default)]
        spacing: f32,
        /// Canvas placement.
        #[serde(default)]
        position: Option<Placement>,
        /// Blocks everything declared before the group.
        #[serde(default)]
        modal: bool,
        /// Nested declarations.
        #[serde(default)]
        children: Vec<Node>,
    },
    /// Text label. Without `text` the label shows its text binding.
    Label {
        /// Binding key.
        id: String,
        /// Static text.
        #[serde(default)]
        text: Option<String>,
        /// Font size.
        ysize: f32,
        /// Wrap box; zero width keeps one line.
        #[serde(default)]
        size: [f32; 2],
    },
    /// Image.
    Image {
        /// Image id.
        id: String,
        /// Texture name.
        texture: String,
        /// Height.
        ysize: f32,
    },
    /// `widgets::text_button`.
    TextButton {
        /// Handler key.
        id: String,
        /// Label, also the button's id.
        text: String,
        /// Font size.
        size: f32,
        /// Inner margin.
        #[serde(default)]
        margin: Margin,
    },
    /// `widgets::image_button`.
    ImageButton {
        /// Button id.
        id: String,
        /// Texture name.
        texture: String,
        /// Image height.
        size: f32,
        /// Inner margin.
        #[serde(default)]
        margin: Margin,
    },
    /// `widgets::checkbox`. Needs a bool binding.
    CheckBox {
        /// Binding key.
        id: String,
        /// Label.
        text: String,
        /// Texture name when checked.
        checked: String,
        /// Texture name when unchecked.
        unchecked: String,
        /// Image and font size.
        size: f32,
        /// Label margin.
        #[serde(default)]
        margin: Margin,
    },
    /// `widgets::slider`. Needs a float binding.
    Slider {
        /// Slider id and binding key.
        id: String,
        /// Bar texture name.
        bar: String,
        /// Knob texture name.
        knob: String,
        /// Slider size.
        size: [f32; 2],
        /// Bar height as a fraction of `size[1]`.
        bar_size: f32,
    },
    /// `widgets::scrollbar`. Needs a float binding.
    ScrollBar {
        /// Scrollbar id and binding key.
        id: String,
        /// Track texture name.
        background: String,
        /// Thumb texture name.
        foreground: String,
        /// Scrollbar size.
        size: [f32; 2],
        /// Thumb length as a fraction of the track.
        bar_size: f32,
    },
    /// `Frame::edit`. Needs a text binding.
    Edit {
        /// Edit id and binding key.
        id: String,
        /// Font size.
        ysize: f32,
        /// Box size; zero width grows with the text.
        #[serde(default)]
        size: [f32; 2],
    },
    /// `Frame::set_virtual_resolution`.
    VirtualResolution {
        /// Node id.
        id: String,
        /// Virtual size of the smallest screen dimension.
        value: f32,
    },
}

impl Node {
    /// Id of the node.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Group { id, .. }
            | Self::Label { id, .. }
            | Self::Image { id, .. }
            | Self::TextButton { id, .. }
            | Self::ImageButton { id, .. }
            | Self::CheckBox { id, .. }
            | Self::Slider { id, .. }
            | Self::ScrollBar { id, .. }
            | Self::Edit { id, .. }
            | Self::VirtualResolution { id, .. } => id,
        }
    }
}

/// A declaration tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiDocument {
    /// Top-level nodes, in declaration order.
    pub nodes: Vec<Node>,
}

impl UiDocument {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Parse` for malformed TOML, `Empty` when there
    /// are no nodes and `DuplicateId` when two nodes share an id.
    pub fn from_toml_str(source: &str) -> Result<Self, DocumentError> {
        let document: Self =
            toml::from_str(source).map_err(|e| DocumentError::Parse(e.to_string()))?;
        document.validate()?;
        Ok(document)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Io` if the file cannot be read, otherwise the
    /// errors of [`UiDocument::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| DocumentError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let document = Self::from_toml_str(&source)?;
        tracing::info!("Loaded UI document from {}", path.display());
        Ok(document)
    }

    /// Checks that the tree is non-empty and ids are unique.
    ///
    /// # Errors
    ///
    /// See [`UiDocument::from_toml_str`].
    pub fn validate(&self) -> Result<(), DocumentError> {
        if self.nodes.is_empty() {
            return Err(DocumentError::Empty);
        }
        let mut seen = HashSet::new();
        let mut stack: Vec<&Node> = self.nodes.iter().collect();
        while let Some(node) = stack.pop() {
            if !seen.insert(node.id()) {
                return Err(DocumentError::DuplicateId(node.id().to_owned()));
            }
            if let Node::Group { children, .. } = node {
                stack.extend(children);
            }
        }
        Ok(())
    }
}

/// A value a document node reads or edits.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// Slider and scrollbar position.
    Float(f32),
    /// Checkbox state.
    Bool(bool),
    /// Label or edit text.
    Text(String),
}

/// Host-owned values, keyed by node id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    values: HashMap<String, Binding>,
}

impl Bindings {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `value` to node `id`, replacing any earlier value.
    pub fn set(&mut self, id: impl Into<String>, value: Binding) {
        self.values.insert(id.into(), value);
    }

    /// Value bound to `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Binding> {
        self.values.get(id)
    }

    /// Float bound to `id`.
    #[must_use]
    pub fn float(&self, id: &str) -> Option<f32> {
        match self.values.get(id) {
            Some(Binding::Float(v)) => Some(*v),
            _ => None,
        }
    }

    /// Bool bound to `id`.
    #[must_use]
    pub fn bool(&self, id: &str) -> Option<bool> {
        match self.values.get(id) {
            Some(Binding::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    /// Text bound to `id`.
    #[must_use]
    pub fn text(&self, id: &str) -> Option<&str> {
        match self.values.get(id) {
            Some(Binding::Text(v)) => Some(v),
            _ => None,
        }
    }
}

/// Resolves texture names used in documents.
pub trait TextureSource {
    /// Texture called `name`, if the host has it.
    fn texture(&self, name: &str) -> Option<TextureHandle>;
}

impl TextureSource for HashMap<String, TextureHandle> {
    fn texture(&self, name: &str) -> Option<TextureHandle> {
        self.get(name).copied()
    }
}

struct Declarer<'a, H> {
    textures: &'a dyn TextureSource,
    bindings: &'a mut Bindings,
    handler: H,
}

impl<H: FnMut(&str, Event)> Declarer<'_, H> {
    fn texture(&self, frame: &Frame<'_>, id: &str, name: &str) -> Option<TextureHandle> {
        let texture = self.textures.texture(name);
        if texture.is_none() && frame.pass() == Pass::Layout {
            tracing::warn!("Node {id:?} uses unknown texture {name:?}");
        }
        texture
    }

    fn missing_binding(frame: &Frame<'_>, id: &str, kind: &str) {
        if frame.pass() == Pass::Layout {
            tracing::warn!("Node {id:?} needs a {kind} binding; skipped");
        }
    }

    fn report(&mut self, frame: &Frame<'_>, id: &str, event: Event) {
        if frame.pass() == Pass::Interaction && !event.is_empty() {
            (self.handler)(id, event);
        }
    }

    fn node(&mut self, frame: &mut Frame<'_>, node: &Node) {
        match node {
            Node::Group {
                id,
                layout,
                spacing,
                position,
                modal,
                children,
            } => {
                frame.start_group(*layout, *spacing, id);
                if let Some(p) = position {
                    frame.position_group(p.horizontal, p.vertical, Vec2::new(p.offset[0], p.offset[1]));
                }
                if *modal {
                    frame.modal_group();
                }
                for child in children {
                    self.node(frame, child);
                }
                frame.end_group();
            }
            Node::Label { id, text, ysize, size } => {
                let text = match text {
                    Some(text) => text.as_str(),
                    None => match self.bindings.text(id) {
                        Some(text) => text,
                        None => return Self::missing_binding(frame, id, "text"),
                    },
                };
                if size[0] > 0.0 {
                    frame.label_sized(text, *ysize, Vec2::new(size[0], size[1]), TextAlignment::Left);
                } else {
                    frame.label(text, *ysize);
                }
            }
            Node::Image { id, texture, ysize } => {
                if let Some(texture) = self.texture(frame, id, texture) {
                    frame.image_with_id(&texture, *ysize, id);
                }
            }
            Node::TextButton { id, text, size, margin } => {
                let event = widgets::text_button(frame, text, *size, *margin);
                self.report(frame, id, event);
            }
            Node::ImageButton { id, texture, size, margin } => {
                if let Some(texture) = self.texture(frame, id, texture) {
                    let event = widgets::image_button(frame, &texture, *size, *margin, id);
                    self.report(frame, id, event);
                }
            }
            Node::CheckBox {
                id,
                text,
                checked,
                unchecked,
                size,
                margin,
            } => {
                let (Some(on), Some(off)) = (self.texture(frame, id, checked), self.texture(frame, id, unchecked))
                else {
                    return;
                };
                let Some(Binding::Bool(value)) = self.bindings.values.get_mut(id) else {
                    return Self::missing_binding(frame, id, "bool");
                };
                let event = widgets::checkbox(frame, &on, &off, text, *size, *margin, value);
                self.report(frame, id, event);
            }
            Node::Slider {
                id,
                bar,
                knob,
                size,
                bar_size,
            } => {
                let (Some(bar), Some(knob)) = (self.texture(frame, id, bar), self.texture(frame, id, knob)) else {
                    return;
                };
                let Some(Binding::Float(value)) = self.bindings.values.get_mut(id) else {
                    return Self::missing_binding(frame, id, "float");
                };
                let size = Vec2::new(size[0], size[1]);
                let event = widgets::slider(frame, &bar, &knob, size, *bar_size, id, value);
                self.report(frame, id, event);
            }
            Node::ScrollBar {
                id,
                background,
                foreground,
                size,
                bar_size,
            } => {
                let (Some(bg), Some(fg)) = (self.texture(frame, id, background), self.texture(frame, id, foreground))
                else {
                    return;
                };
                let Some(Binding::Float(value)) = self.bindings.values.get_mut(id) else {
                    return Self::missing_binding(frame, id, "float");
                };
                let size = Vec2::new(size[0], size[1]);
                let event = widgets::scrollbar(frame, &bg, &fg, size, *bar_size, id, value);
                self.report(frame, id, event);
            }
            Node::Edit { id, ysize, size } => {
                let Some(Binding::Text(text)) = self.bindings.values.get_mut(id) else {
                    return Self::missing_binding(frame, id, "text");
                };
                let response = frame.edit(*ysize, Vec2::new(size[0], size[1]), id, text);
                self.report(frame, id, response.event);
            }
            Node::VirtualResolution { value, .. } => frame.set_virtual_resolution(*value),
        }
    }
}

/// Declares every node of `document` on `frame`. Call it from the frame
/// procedure so it runs in both passes. `handler` receives the node id and
/// events of interactive nodes during the interaction pass.
///
/// Nodes whose binding or texture is missing are skipped, with a warning
/// in the layout pass.
pub fn declare<H>(
    frame: &mut Frame<'_>,
    document: &UiDocument,
    textures: &dyn TextureSource,
    bindings: &mut Bindings,
    handler: H,
) where
    H: FnMut(&str, Event),
{
    let mut declarer = Declarer {
        textures,
        bindings,
        handler,
    };
    for node in &document.nodes {
        declarer.node(frame, node);
    }
}
