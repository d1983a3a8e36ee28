//! # Sigil UI
//!
//! Immediate-mode GUI toolkit. The caller describes the whole UI every
//! frame with a plain procedure; the toolkit runs it twice.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        ONE FRAME                             │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Layout pass:       declare → measure groups → registry      │
//! │                                    ↓                         │
//! │  after_layout:      stale captures, focus navigation         │
//! │                                    ↓                         │
//! │  Interaction pass:  declare → position → hit test → draw     │
//! │                                    ↓                         │
//! │  flush:             UiBatch list → RenderSink                │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing about the widget hierarchy survives the frame. Focus, hover,
//! drags and pointer captures are keyed by [`HashedId`] and live in
//! [`InteractionState`].
//!
//! ## Usage
//!
//! ```no_run
//! use sigil_ui::{widgets, InputState, Layout, Margin, MonospaceFont, Ui, UiBatch, UiConfig};
//! use sigil_ui::Event;
//! use sigil_shared::Vec2i;
//!
//! let mut ui = Ui::new(UiConfig::default(), Box::new(MonospaceFont::default()))?;
//! let input = InputState::new();
//! let mut batches: Vec<UiBatch> = Vec::new();
//! ui.run(Vec2i::new(1280, 720), &input, &mut batches, |frame| {
//!     frame.start_group(Layout::VERTICAL_CENTER, 10.0, "menu");
//!     if widgets::text_button(frame, "Play", 40.0, Margin::all(8.0)).has(Event::WENT_UP) {
//!         // start the game
//!     }
//!     frame.end_group();
//! })?;
//! # Ok::<(), sigil_ui::UiError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod animation;
pub mod config;
pub mod context;
pub mod coords;
pub mod document;
pub mod edit;
pub mod error;
pub mod frame;
pub mod input;
pub mod interaction;
pub mod layout;
pub mod registry;
pub mod render;
pub mod style;
pub mod text;
pub mod widgets;

pub use animation::{AnimCurve, AnimKind, Animator, EasedAnimator, Easing};
pub use config::UiConfig;
pub use context::{Frame, GlobalListener, Pass};
pub use coords::CoordMapper;
pub use document::{declare, Binding, Bindings, Node, Placement, TextureSource, UiDocument};
pub use edit::{EditResponse, EditStatus};
pub use error::{ConfigError, DocumentError, FontError, UiError, UiResult};
pub use frame::{FrameStats, Ui};
pub use input::{InputState, Key, PointerState, TextInput};
pub use interaction::{Event, InteractionState};
pub use layout::{Alignment, Direction, Insets, Layout, Margin};
pub use registry::{ElementKind, ElementNode, ElementRegistry};
pub use render::{
    nine_patch, tessellate, DrawList, Mesh, Painter, RenderCommand, RenderSink, TextureHandle,
    UiBatch, UiVertex,
};
pub use sigil_shared::HashedId;
pub use style::{Color, Style};
pub use text::{
    layout_text, FontProvider, MonospaceFont, TextAlignment, TextBlock, TextLayout, TextLine,
};
