//! Group layout.
//!
//! A group grows while its children are declared in the layout pass and
//! hands out child positions in the interaction pass. Both passes walk the
//! same declarations, so the arithmetic here is all the engine needs.

use crate::coords::CoordMapper;
use crate::interaction::Event;
use serde::{Deserialize, Serialize};
use sigil_shared::Vec2i;

/// Layout direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Horizontal (left to right).
    #[default]
    Horizontal,
    /// Vertical (top to bottom).
    Vertical,
    /// Children stacked on top of each other.
    Overlay,
}

/// Cross-axis alignment. Overlay groups align on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// Align to start (left/top).
    #[default]
    Start,
    /// Align to center.
    Center,
    /// Align to end (right/bottom).
    End,
}

impl Alignment {
    /// Offset of a child that leaves `space` unused on its axis.
    #[must_use]
    pub fn offset(self, space: i32) -> i32 {
        match self {
            Self::Start => 0,
            Self::Center => space / 2,
            Self::End => space,
        }
    }
}

/// Direction plus alignment of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Primary axis.
    pub direction: Direction,
    /// Placement on the cross axis.
    pub alignment: Alignment,
}

impl Layout {
    /// Row, children aligned to the top.
    pub const HORIZONTAL_TOP: Self = Self::new(Direction::Horizontal, Alignment::Start);
    /// Row, children centered vertically.
    pub const HORIZONTAL_CENTER: Self = Self::new(Direction::Horizontal, Alignment::Center);
    /// Row, children aligned to the bottom.
    pub const HORIZONTAL_BOTTOM: Self = Self::new(Direction::Horizontal, Alignment::End);
    /// Column, children aligned left.
    pub const VERTICAL_LEFT: Self = Self::new(Direction::Vertical, Alignment::Start);
    /// Column, children centered horizontally.
    pub const VERTICAL_CENTER: Self = Self::new(Direction::Vertical, Alignment::Center);
    /// Column, children aligned right.
    pub const VERTICAL_RIGHT: Self = Self::new(Direction::Vertical, Alignment::End);
    /// Stack, children centered on both axes.
    pub const OVERLAY_CENTER: Self = Self::new(Direction::Overlay, Alignment::Center);

    /// Creates a layout.
    #[must_use]
    pub const fn new(direction: Direction, alignment: Alignment) -> Self {
        Self { direction, alignment }
    }
}

/// Space inside a group's edges, in virtual units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Right edge.
    pub right: f32,
    /// Bottom edge.
    pub bottom: f32,
}

impl Margin {
    /// Same margin on every side.
    #[must_use]
    pub const fn all(m: f32) -> Self {
        Self::new(m, m, m, m)
    }

    /// `x` on left and right, `y` on top and bottom.
    #[must_use]
    pub const fn symmetric(x: f32, y: f32) -> Self {
        Self::new(x, y, x, y)
    }

    /// Margin from four edges.
    #[must_use]
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Converts to physical pixels. Negative edges become zero.
    #[must_use]
    pub fn to_physical(&self, mapper: &CoordMapper) -> Insets {
        Insets {
            left: mapper.scalar_to_physical(self.left).max(0),
            top: mapper.scalar_to_physical(self.top).max(0),
            right: mapper.scalar_to_physical(self.right).max(0),
            bottom: mapper.scalar_to_physical(self.bottom).max(0),
        }
    }
}

/// Margin in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Insets {
    /// Left edge.
    pub left: i32,
    /// Top edge.
    pub top: i32,
    /// Right edge.
    pub right: i32,
    /// Bottom edge.
    pub bottom: i32,
}

impl Insets {
    /// Top-left offset.
    #[must_use]
    pub const fn top_left(&self) -> Vec2i {
        Vec2i::new(self.left, self.top)
    }

    /// Combined horizontal and vertical margin.
    #[must_use]
    pub const fn total(&self) -> Vec2i {
        Vec2i::new(self.left + self.right, self.top + self.bottom)
    }
}

/// Scroll window state carried by a group between `start_scroll` and
/// `end_scroll`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ScrollWindow {
    /// Window size in physical pixels.
    pub window: Vec2i,
    /// Interaction pass: a clip rect was pushed for this window.
    pub clipped: bool,
}

/// One open group on the frame's group stack.
#[derive(Debug, Clone)]
pub(crate) struct GroupState {
    pub direction: Direction,
    pub alignment: Alignment,
    /// Physical spacing between children.
    pub spacing: i32,
    /// Registry node of this group. `None` for the root and for groups
    /// the interaction pass could not match.
    pub element_idx: Option<usize>,
    /// Top-left of the group. Fixed once the group is placed.
    pub origin: Vec2i,
    /// Running placement point for the next child.
    pub cursor: Vec2i,
    /// Layout pass: accumulated content size. Interaction pass: final size.
    pub size: Vec2i,
    /// Interaction pass: scrollable content beyond `size`.
    pub extra: Vec2i,
    pub margin: Insets,
    pub child_count: usize,
    pub scroll: Option<ScrollWindow>,
    pub slider: bool,
    /// Event computed for this group this pass, returned on repeat checks.
    pub event: Option<Event>,
}

impl GroupState {
    pub fn new(layout: Layout, spacing: i32, element_idx: Option<usize>) -> Self {
        Self {
            direction: layout.direction,
            alignment: layout.alignment,
            spacing: spacing.max(0),
            element_idx,
            origin: Vec2i::ZERO,
            cursor: Vec2i::ZERO,
            size: Vec2i::ZERO,
            extra: Vec2i::ZERO,
            margin: Insets::default(),
            child_count: 0,
            scroll: None,
            slider: false,
            event: None,
        }
    }

    /// Places the group at `origin` with its final `size`.
    pub fn place(&mut self, origin: Vec2i, size: Vec2i) {
        self.origin = origin;
        self.cursor = origin;
        self.size = size.clamp_non_negative();
    }

    fn gap(&self) -> i32 {
        if self.child_count > 0 {
            self.spacing
        } else {
            0
        }
    }

    /// Layout pass: grows the group to hold one more child.
    pub fn extend(&mut self, child: Vec2i) {
        let child = child.clamp_non_negative();
        match self.direction {
            Direction::Horizontal => {
                self.size.x += child.x + self.gap();
                self.size.y = self.size.y.max(child.y);
            }
            Direction::Vertical => {
                self.size.x = self.size.x.max(child.x);
                self.size.y += child.y + self.gap();
            }
            Direction::Overlay => {
                self.size = self.size.max(child);
            }
        }
        self.child_count += 1;
    }

    /// Layout pass: final size with margins.
    pub fn measured_size(&self) -> Vec2i {
        self.size + self.margin.total()
    }

    /// Interaction pass: top-left of the next child of size `child`.
    pub fn child_position(&self, child: Vec2i) -> Vec2i {
        let space = self.size + self.extra - child - self.margin.total();
        let mut pos = self.cursor + self.margin.top_left();
        match self.direction {
            Direction::Horizontal => pos.y += self.alignment.offset(space.y),
            Direction::Vertical => pos.x += self.alignment.offset(space.x),
            Direction::Overlay => {
                pos.x += self.alignment.offset(space.x);
                pos.y += self.alignment.offset(space.y);
            }
        }
        pos
    }

    /// Interaction pass: moves the cursor past a child.
    pub fn advance(&mut self, child: Vec2i) {
        let child = child.clamp_non_negative();
        match self.direction {
            Direction::Horizontal => self.cursor.x += child.x + self.spacing,
            Direction::Vertical => self.cursor.y += child.y + self.spacing,
            Direction::Overlay => {}
        }
        self.child_count += 1;
    }
}
