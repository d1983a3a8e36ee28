//! Declaration API.
//!
//! A [`Frame`] is what the caller's declaration procedure talks to. The
//! same procedure runs once per pass: in [`Pass::Layout`] every call only
//! measures, in [`Pass::Interaction`] the same calls are placed, hit-tested
//! and drawn.

use crate::animation::{AnimCurve, Animator};
use crate::coords::CoordMapper;
use crate::edit::{EditResponse, EditSession, EditStatus};
use crate::error::UiError;
use crate::input::{InputState, Key};
use crate::interaction::{Event, HitTarget, InteractionState};
use crate::layout::{Alignment, Direction, GroupState, Layout, Margin, ScrollWindow};
use crate::registry::{ElementKind, ElementRegistry};
use crate::render::{nine_patch, DrawList, Painter, RenderCommand, TextureHandle};
use crate::style::{Color, Style};
use crate::text::{layout_text, FontProvider, TextAlignment, TextBlock, TextLayout};
use sigil_shared::{HashedId, Rect, Vec2, Vec2i, Vec4, DEFAULT_IMAGE_ID};

/// Which pass the declaration procedure is running in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// Sizes only.
    Layout,
    /// Positions, events and drawing.
    Interaction,
}

/// Callback receiving every non-empty event of a frame.
pub type GlobalListener = Box<dyn FnMut(HashedId, Event)>;

/// Host services owned by the session.
pub(crate) struct Collaborators {
    pub fonts: Box<dyn FontProvider>,
    pub animator: Option<Box<dyn Animator>>,
    pub listener: Option<GlobalListener>,
}

/// Session pieces a frame borrows for one pass.
pub(crate) struct FrameParts<'a> {
    pub pass: Pass,
    pub style: Style,
    pub mapper: &'a mut CoordMapper,
    pub input: &'a InputState,
    pub interaction: &'a mut InteractionState,
    pub registry: &'a mut ElementRegistry,
    pub draw: &'a mut DrawList,
    pub collab: &'a mut Collaborators,
}

/// Placement of a leaf element.
#[derive(Debug, Clone, Copy)]
struct Slot {
    idx: usize,
    position: Vec2i,
    size: Vec2i,
}

/// Handle the declaration procedure uses to describe the UI.
pub struct Frame<'a> {
    pass: Pass,
    style: Style,
    mapper: &'a mut CoordMapper,
    input: &'a InputState,
    interaction: &'a mut InteractionState,
    registry: &'a mut ElementRegistry,
    draw: &'a mut DrawList,
    collab: &'a mut Collaborators,
    groups: Vec<GroupState>,
    /// Interaction pass: next registry index to match against.
    cursor: usize,
    skipped: usize,
    error: Option<UiError>,
}

impl<'a> Frame<'a> {
    pub(crate) fn new(parts: FrameParts<'a>) -> Self {
        let mut root = GroupState::new(Layout::VERTICAL_LEFT, 0, None);
        if parts.pass == Pass::Interaction {
            root.place(Vec2i::ZERO, parts.mapper.canvas_size());
        }
        Self {
            pass: parts.pass,
            style: parts.style,
            mapper: parts.mapper,
            input: parts.input,
            interaction: parts.interaction,
            registry: parts.registry,
            draw: parts.draw,
            collab: parts.collab,
            groups: vec![root],
            cursor: 0,
            skipped: 0,
            error: None,
        }
    }

    /// Closes the pass, reporting the first usage error or the number of
    /// declarations the interaction pass could not match.
    pub(crate) fn finish(mut self) -> Result<usize, UiError> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        if self.groups.len() > 1 {
            return Err(UiError::UnbalancedGroups {
                open: self.groups.len() - 1,
            });
        }
        Ok(self.skipped)
    }

    fn fail(&mut self, err: UiError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    /// The pass being run.
    #[must_use]
    pub fn pass(&self) -> Pass {
        self.pass
    }

    /// This frame's input.
    #[must_use]
    pub fn input(&self) -> &InputState {
        self.input
    }

    /// Current style settings.
    #[must_use]
    pub fn style(&self) -> &Style {
        &self.style
    }

    fn current(&self) -> &GroupState {
        // root is never popped
        &self.groups[self.groups.len() - 1]
    }

    fn current_mut(&mut self) -> &mut GroupState {
        let last = self.groups.len() - 1;
        &mut self.groups[last]
    }

    /// Index of the innermost user group, or an error naming `call`.
    fn open_group(&mut self, call: &'static str) -> Option<usize> {
        if self.groups.len() > 1 {
            Some(self.groups.len() - 1)
        } else {
            self.fail(UiError::NoOpenGroup { call });
            None
        }
    }

    /// Finds the next node declared with `id` in the interaction pass.
    fn match_element(&mut self, id: HashedId) -> Option<usize> {
        match self.registry.find_from(self.cursor, id) {
            Some(idx) => {
                self.cursor = idx + 1;
                Some(idx)
            }
            None => {
                self.skipped += 1;
                tracing::debug!("No layout for element {id}; skipped");
                None
            }
        }
    }

    /// Declares a leaf of `size` physical pixels in the current group.
    fn element(&mut self, id: HashedId, size: Vec2i, kind: ElementKind) -> Option<Slot> {
        match self.pass {
            Pass::Layout => {
                let parent = self.current().element_idx;
                let idx = self.registry.push(id, size, parent, kind);
                self.current_mut().extend(size);
                Some(Slot {
                    idx,
                    position: Vec2i::ZERO,
                    size,
                })
            }
            Pass::Interaction => {
                let idx = self.match_element(id)?;
                let size = self.registry.node(idx)?.size;
                let group = self.current_mut();
                let position = group.child_position(size);
                group.advance(size);
                if let Some(node) = self.registry.node_mut(idx) {
                    node.position = position;
                }
                Some(Slot { idx, position, size })
            }
        }
    }

    fn emit(&mut self, id: HashedId, event: Event) {
        if event.is_empty() {
            return;
        }
        if let Some(listener) = self.collab.listener.as_mut() {
            listener(id, event);
        }
    }

    // -------------------------------------------------------------------------
    // Elements
    // -------------------------------------------------------------------------

    fn text_block(&mut self, text: &str, ysize: i32, box_size: Vec2i) -> Option<TextBlock> {
        let params = TextLayout {
            ysize,
            max_width: (box_size.x > 0).then_some(box_size.x),
            max_height: (box_size.y > 0).then_some(box_size.y),
            line_height_scale: self.style.line_height_scale,
            ellipsis: &self.style.ellipsis,
        };
        match layout_text(self.collab.fonts.as_mut(), text, &params) {
            Ok(block) => Some(block),
            Err(err) => {
                if self.pass == Pass::Layout {
                    tracing::warn!("Cannot lay out label {text:?}: {err}");
                }
                None
            }
        }
    }

    /// Single-line label `ysize` virtual units tall.
    pub fn label(&mut self, text: &str, ysize: f32) {
        self.label_sized(text, ysize, Vec2::ZERO, TextAlignment::Left);
    }

    /// Label wrapped to `size.x`. `size.x == 0` keeps it on one line,
    /// `size.y == 0` leaves the height unconstrained; text that does not
    /// fit the height ends with the ellipsis.
    pub fn label_sized(&mut self, text: &str, ysize: f32, size: Vec2, alignment: TextAlignment) {
        let id = HashedId::of(text);
        let ysize = self.mapper.scalar_to_physical(ysize).max(0);
        let box_size = self.mapper.virtual_to_physical(size).clamp_non_negative();

        let block = self.text_block(text, ysize, box_size);
        let measured = block.as_ref().map_or(Vec2i::ZERO, |b| {
            Vec2i::new(
                if box_size.x > 0 { box_size.x } else { b.width },
                if box_size.y > 0 { box_size.y } else { b.height },
            )
        });

        let Some(slot) = self.element(id, measured, ElementKind::Label) else {
            return;
        };
        let (Pass::Interaction, Some(block)) = (self.pass, block) else {
            return;
        };

        let color = self.style.text_color;
        let mut y = slot.position.y;
        for line in block.lines {
            let x = slot.position.x + alignment.offset(slot.size.x, line.width);
            self.draw.push(RenderCommand::Text {
                text: line.text,
                position: Vec2i::new(x, y),
                ysize,
                color,
            });
            y += block.line_advance;
        }
    }

    /// Texture `ysize` virtual units tall, width from its aspect ratio.
    pub fn image(&mut self, texture: &TextureHandle, ysize: f32) {
        self.image_with_id(texture, ysize, DEFAULT_IMAGE_ID);
    }

    /// Like [`Frame::image`] with an explicit id.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn image_with_id(&mut self, texture: &TextureHandle, ysize: f32, id: &str) {
        let size = if texture.is_loaded() {
            let height = self.mapper.scalar_to_physical(ysize).max(0);
            let width = (height as f32 * texture.size.x as f32 / texture.size.y as f32).round() as i32;
            Vec2i::new(width, height)
        } else {
            if self.pass == Pass::Layout {
                tracing::warn!("Image {id:?} uses unloaded texture {}", texture.id);
            }
            Vec2i::ZERO
        };

        let Some(slot) = self.element(HashedId::of(id), size, ElementKind::Image) else {
            return;
        };
        if self.pass == Pass::Interaction && texture.is_loaded() {
            self.draw.push(RenderCommand::Texture {
                bounds: Rect::from_pos_size(slot.position, slot.size),
                texture_id: texture.id,
                uv: [0.0, 0.0, 1.0, 1.0],
                color: self.style.image_color,
            });
        }
    }

    /// Fixed-size element drawn by `renderer` with its physical position
    /// and size.
    pub fn custom_element<F>(&mut self, size: Vec2, id: &str, renderer: F)
    where
        F: FnOnce(&mut Painter<'_>, Vec2i, Vec2i),
    {
        self.custom_element_id(size, HashedId::of(id), renderer);
    }

    /// `custom_element` keyed by a prehashed id.
    pub fn custom_element_id<F>(&mut self, size: Vec2, hash: HashedId, renderer: F)
    where
        F: FnOnce(&mut Painter<'_>, Vec2i, Vec2i),
    {
        let size = self.mapper.virtual_to_physical(size).clamp_non_negative();
        let Some(slot) = self.element(hash, size, ElementKind::Custom) else {
            return;
        };
        if self.pass == Pass::Interaction {
            let mut painter = Painter::new(self.draw, self.style.image_color);
            renderer(&mut painter, slot.position, slot.size);
        }
    }

    /// Left-aligned single-line edit box.
    pub fn edit(&mut self, ysize: f32, size: Vec2, id: &str, text: &mut String) -> EditResponse {
        self.edit_aligned(ysize, size, TextAlignment::Left, id, text)
    }

    /// Single-line edit box. `size.x == 0` grows with the text,
    /// `size.y == 0` uses `ysize`.
    pub fn edit_aligned(
        &mut self,
        ysize: f32,
        size: Vec2,
        alignment: TextAlignment,
        id: &str,
        text: &mut String,
    ) -> EditResponse {
        let hash = HashedId::of(id);
        let ysize = self.mapper.scalar_to_physical(ysize).max(0);
        let requested = self.mapper.virtual_to_physical(size).clamp_non_negative();
        let caret_width = (ysize / 10).max(1);

        let text_width = match self.collab.fonts.text_width(text, ysize) {
            Ok(w) => w,
            Err(err) => {
                if self.pass == Pass::Layout {
                    tracing::warn!("Cannot measure edit box {id:?}: {err}");
                }
                0
            }
        };
        let measured = Vec2i::new(
            if requested.x > 0 { requested.x } else { text_width + caret_width },
            if requested.y > 0 { requested.y } else { ysize },
        );

        let Some(slot) = self.element(hash, measured, ElementKind::Edit) else {
            return EditResponse::default();
        };
        if self.pass == Pass::Layout {
            if let Some(node) = self.registry.node_mut(slot.idx) {
                node.interactive = true;
            }
            return EditResponse::default();
        }

        let rect = Rect::from_pos_size(slot.position, slot.size);
        let event = self.evaluate(hash, slot.idx, rect, false);
        let status = self.update_edit(hash, rect, event, text);

        let clip = Rect::from_pos_size(slot.position, slot.size);
        self.draw.push_clip(clip);
        let text_x = slot.position.x + alignment.offset(slot.size.x, text_width);
        let text_y = slot.position.y + (slot.size.y - ysize).max(0) / 2;
        self.draw.push(RenderCommand::Text {
            text: text.clone(),
            position: Vec2i::new(text_x, text_y),
            ysize,
            color: self.style.text_color,
        });
        if self.interaction.caret_visible() {
            if let Some(session) = self.interaction.edit.as_ref().filter(|s| s.id() == hash) {
                let before = session.before_caret(text);
                let offset = self.collab.fonts.text_width(before, ysize).unwrap_or(0);
                self.draw.push(RenderCommand::Rect {
                    bounds: Rect::new(text_x + offset, text_y, caret_width, ysize),
                    color: self.style.caret_color,
                });
            }
        }
        self.draw.pop_clip();

        EditResponse { event, status }
    }

    fn update_edit(&mut self, id: HashedId, rect: Rect, event: Event, text: &mut String) -> EditStatus {
        let active = self.interaction.editing() == Some(id);
        if active {
            let pressed_elsewhere = self
                .input
                .pointers()
                .iter()
                .any(|p| p.went_down && !rect.contains(p.position));
            let status = if self.interaction.focus() != Some(id) || pressed_elsewhere {
                EditStatus::Finished
            } else {
                match self.interaction.edit.as_mut() {
                    Some(session) => session.apply(text, self.input.text_input()),
                    None => EditStatus::None,
                }
            };
            if matches!(status, EditStatus::Finished | EditStatus::Canceled) {
                tracing::debug!("Edit session on {id} ended: {status:?}");
                self.interaction.edit = None;
            }
            return status;
        }

        let selected = self.interaction.focus() == Some(id)
            && !self.interaction.is_last_event_pointer_type()
            && self.input.key_pressed(Key::Select);
        if event.has(Event::WENT_UP) || selected {
            self.interaction.set_focus(Some(id));
            self.interaction.edit = Some(EditSession::start(id, text));
            return EditStatus::InEdit;
        }
        EditStatus::None
    }

    // -------------------------------------------------------------------------
    // Groups
    // -------------------------------------------------------------------------

    /// Opens a group with `spacing` virtual units between children.
    pub fn start_group(&mut self, layout: Layout, spacing: f32, id: &str) {
        self.start_group_id(layout, spacing, HashedId::of(id));
    }

    /// Opens a group keyed by a prehashed id, e.g. one built with
    /// `HashedId::from_sequence` for groups declared in a loop.
    pub fn start_group_id(&mut self, layout: Layout, spacing: f32, hash: HashedId) {
        let spacing = self.mapper.scalar_to_physical(spacing);
        match self.pass {
            Pass::Layout => {
                let parent = self.current().element_idx;
                let idx = self.registry.push(hash, Vec2i::ZERO, parent, ElementKind::Group);
                self.groups.push(GroupState::new(layout, spacing, Some(idx)));
            }
            Pass::Interaction => {
                let matched = self.match_element(hash);
                let size = matched
                    .and_then(|idx| self.registry.node(idx))
                    .map_or(Vec2i::ZERO, |n| n.size);
                let parent = self.current_mut();
                let position = parent.child_position(size);
                if matched.is_some() {
                    parent.advance(size);
                }
                if let Some(node) = matched.and_then(|idx| self.registry.node_mut(idx)) {
                    node.position = position;
                }
                let mut group = GroupState::new(layout, spacing, matched);
                group.place(position, size);
                self.groups.push(group);
            }
        }
    }

    /// Closes the innermost group.
    pub fn end_group(&mut self) {
        if self.groups.len() <= 1 {
            self.fail(UiError::GroupUnderflow);
            return;
        }
        if self.current().scroll.is_some() {
            tracing::debug!("Group closed with an open scroll window");
            self.close_scroll();
        }
        let Some(group) = self.groups.pop() else {
            return;
        };
        if self.pass == Pass::Layout {
            let size = group.measured_size();
            if let Some(node) = group.element_idx.and_then(|idx| self.registry.node_mut(idx)) {
                node.size = size;
            }
            self.current_mut().extend(size);
        }
    }

    /// Sets the margin of the current group. Call before its children.
    pub fn set_margin(&mut self, margin: Margin) {
        if let Some(g) = self.open_group("set_margin") {
            self.groups[g].margin = margin.to_physical(self.mapper);
        }
    }

    fn group_rect(&self, g: usize) -> Rect {
        let group = &self.groups[g];
        Rect::from_pos_size(group.origin, group.size)
    }

    /// Fills the current group with `color`.
    pub fn color_background(&mut self, color: Color) {
        let Some(g) = self.open_group("color_background") else {
            return;
        };
        if self.pass == Pass::Interaction {
            let bounds = self.group_rect(g);
            self.draw.push(RenderCommand::Rect { bounds, color });
        }
    }

    /// Stretches `texture` over the current group.
    pub fn image_background(&mut self, texture: &TextureHandle) {
        let Some(g) = self.open_group("image_background") else {
            return;
        };
        if self.pass != Pass::Interaction {
            return;
        }
        if !texture.is_loaded() {
            tracing::warn!("Background texture {} is not loaded", texture.id);
            return;
        }
        let bounds = self.group_rect(g);
        self.draw.push(RenderCommand::Texture {
            bounds,
            texture_id: texture.id,
            uv: [0.0, 0.0, 1.0, 1.0],
            color: self.style.image_color,
        });
    }

    /// Draws `texture` as a nine-patch behind the current group. `patch`
    /// is the stretchable area `(x0, y0, x1, y1)` in UV space.
    pub fn image_background_nine_patch(&mut self, texture: &TextureHandle, patch: Vec4) {
        let Some(g) = self.open_group("image_background_nine_patch") else {
            return;
        };
        if self.pass != Pass::Interaction {
            return;
        }
        if !texture.is_loaded() {
            tracing::warn!("Nine-patch texture {} is not loaded", texture.id);
            return;
        }
        let bounds = self.group_rect(g);
        for command in nine_patch(texture, patch, bounds, self.style.image_color) {
            self.draw.push(command);
        }
    }

    /// Places the current top-level group on the canvas.
    pub fn position_group(&mut self, horizontal: Alignment, vertical: Alignment, offset: Vec2) {
        let Some(g) = self.open_group("position_group") else {
            return;
        };
        if self.pass != Pass::Interaction {
            return;
        }
        let canvas = self.mapper.canvas_size();
        let offset = self.mapper.virtual_to_physical(offset);
        let group = &mut self.groups[g];
        let position = Vec2i::new(
            horizontal.offset(canvas.x - group.size.x),
            vertical.offset(canvas.y - group.size.y),
        ) + offset;
        let size = group.size;
        group.place(position, size);
        if let Some(node) = group.element_idx.and_then(|idx| self.registry.node_mut(idx)) {
            node.position = position;
        }
    }

    // -------------------------------------------------------------------------
    // Scrolling and sliders
    // -------------------------------------------------------------------------

    /// Turns the current group into a `size` window over its children,
    /// scrolled by `offset` (virtual units). Call right after `start_group`.
    pub fn start_scroll(&mut self, size: Vec2, offset: &mut Vec2) {
        let Some(g) = self.open_group("start_scroll") else {
            return;
        };
        let window = self.mapper.virtual_to_physical(size).clamp_non_negative();
        self.groups[g].scroll = Some(ScrollWindow {
            window,
            clipped: false,
        });

        let event = self.check_group_event(g, true);
        if self.pass != Pass::Interaction {
            return;
        }
        let Some(idx) = self.groups[g].element_idx else {
            return;
        };
        let hash = self.registry.node(idx).map_or(HashedId::NULL, |n| n.hash);
        let extra = self.registry.node(idx).map_or(Vec2i::ZERO, |n| n.extra_size);
        let rect = self.group_rect(g);

        if event.has(Event::START_DRAG | Event::IS_DRAGGING) {
            if let Some(pointer) = self
                .interaction
                .pointer_captured_by(hash)
                .and_then(|i| self.input.pointer(i))
            {
                let delta = self.mapper.physical_to_virtual(pointer.delta());
                *offset -= delta * self.style.scroll_speed_drag;
            }
        }

        let wheel = self.input.scroll_delta;
        if wheel != Vec2::ZERO {
            let hovered = self.input.pointer(0).is_some_and(|p| {
                rect.contains(p.position)
                    && self.draw.current_clip().map_or(true, |c| c.contains(p.position))
            });
            if hovered {
                *offset -= wheel * self.style.scroll_speed_wheel;
            }
        }

        let focus_inside = self
            .interaction
            .focus()
            .and_then(|f| self.registry.find(f))
            .is_some_and(|f| self.registry.is_ancestor(idx, f));
        if focus_inside {
            let held = |k: Key| if self.input.key_held(k) { 1.0 } else { 0.0 };
            let dir = Vec2::new(held(Key::Right) - held(Key::Left), held(Key::Down) - held(Key::Up));
            let window_virtual = self.mapper.physical_to_virtual(window);
            let step = self.style.scroll_speed_gamepad * self.input.delta_time;
            offset.x += dir.x * window_virtual.x * step;
            offset.y += dir.y * window_virtual.y * step;
        }

        let max = self.mapper.physical_to_virtual(extra);
        offset.x = offset.x.clamp(0.0, max.x);
        offset.y = offset.y.clamp(0.0, max.y);

        self.draw.push_clip(rect);
        let shift = self.mapper.virtual_to_physical(*offset);
        let group = &mut self.groups[g];
        group.extra = extra;
        group.cursor -= shift;
        if let Some(scroll) = group.scroll.as_mut() {
            scroll.clipped = true;
        }
    }

    /// Ends the scroll window of the current group. Call right before
    /// `end_group`.
    pub fn end_scroll(&mut self) {
        let Some(g) = self.open_group("end_scroll") else {
            return;
        };
        if self.groups[g].scroll.is_none() {
            self.fail(UiError::ScrollNotStarted);
            return;
        }
        self.close_scroll();
    }

    fn close_scroll(&mut self) {
        let pass = self.pass;
        let g = self.groups.len() - 1;
        let group = &mut self.groups[g];
        let Some(scroll) = group.scroll.take() else {
            return;
        };
        match pass {
            Pass::Layout => {
                let content = group.measured_size();
                let extra = (content - scroll.window).clamp_non_negative();
                group.size = (scroll.window - group.margin.total()).clamp_non_negative();
                if let Some(node) = group.element_idx.and_then(|idx| self.registry.node_mut(idx)) {
                    node.extra_size = extra;
                }
            }
            Pass::Interaction => {
                if scroll.clipped {
                    self.draw.pop_clip();
                }
            }
        }
    }

    /// Turns the current group into a slider along `direction`. `value`
    /// follows the pointer within the group minus `margin` virtual units
    /// at each end. Call right after `start_group`.
    pub fn start_slider(&mut self, direction: Direction, margin: f32, value: &mut f32) {
        let Some(g) = self.open_group("start_slider") else {
            return;
        };
        self.groups[g].slider = true;

        let event = self.check_group_event(g, false);
        if self.pass != Pass::Interaction {
            return;
        }
        let Some(hash) = self.groups[g]
            .element_idx
            .and_then(|idx| self.registry.node(idx))
            .map(|n| n.hash)
        else {
            return;
        };

        let axis = usize::from(direction == Direction::Vertical);
        let pressed = Event::WENT_DOWN | Event::WENT_UP | Event::IS_DOWN | Event::START_DRAG | Event::IS_DRAGGING;
        let driver = self.interaction.pointer_driving(hash);
        if let (true, Some(index)) = (event.has(pressed), driver) {
            if event.has(Event::WENT_DOWN | Event::IS_DOWN | Event::IS_DRAGGING) {
                self.interaction.capture_pointer_index(index, hash);
            }
            if let Some(pointer) = self.input.pointer(index) {
                let group = &self.groups[g];
                let margin = self.mapper.scalar_to_physical(margin);
                let extent = group.size[axis] - 2 * margin;
                if extent > 0 {
                    #[allow(clippy::cast_precision_loss)]
                    let t = (pointer.position[axis] - group.origin[axis] - margin) as f32 / extent as f32;
                    *value = t.clamp(0.0, 1.0);
                }
            }
        }
        if let (true, Some(index)) = (event.has(Event::WENT_UP | Event::END_DRAG), driver) {
            self.interaction.release_pointer_index(index);
        }

        if self.interaction.focus() == Some(hash) && !self.interaction.is_last_event_pointer_type() {
            let (less, more) = if axis == 0 {
                (Key::Left, Key::Right)
            } else {
                (Key::Up, Key::Down)
            };
            if self.input.key_pressed(less) {
                *value = (*value - self.style.slider_step).clamp(0.0, 1.0);
            }
            if self.input.key_pressed(more) {
                *value = (*value + self.style.slider_step).clamp(0.0, 1.0);
            }
        }
    }

    /// Ends the slider of the current group.
    pub fn end_slider(&mut self) {
        let Some(g) = self.open_group("end_slider") else {
            return;
        };
        if !self.groups[g].slider {
            self.fail(UiError::SliderNotStarted);
            return;
        }
        self.groups[g].slider = false;
    }

    // -------------------------------------------------------------------------
    // Interaction
    // -------------------------------------------------------------------------

    fn evaluate(&mut self, id: HashedId, idx: usize, rect: Rect, drag_only: bool) -> Event {
        let target = HitTarget {
            id,
            rect,
            clip: self.draw.current_clip(),
            blocked: self.interaction.is_blocked(self.registry, idx),
            drag_only,
        };
        let event = self
            .interaction
            .evaluate(self.input, &target, self.style.drag_start_threshold);
        self.emit(id, event);
        event
    }

    fn check_group_event(&mut self, g: usize, drag_only: bool) -> Event {
        if let Some(event) = self.groups[g].event {
            return event;
        }
        let Some(idx) = self.groups[g].element_idx else {
            return Event::NONE;
        };
        let event = match self.pass {
            Pass::Layout => {
                if let Some(node) = self.registry.node_mut(idx) {
                    node.interactive = true;
                }
                Event::NONE
            }
            Pass::Interaction => {
                let id = self.registry.node(idx).map_or(HashedId::NULL, |n| n.hash);
                let rect = self.group_rect(g);
                self.evaluate(id, idx, rect, drag_only)
            }
        };
        self.groups[g].event = Some(event);
        event
    }

    /// Events of the current group. Marks the group interactive.
    pub fn check_event(&mut self) -> Event {
        match self.open_group("check_event") {
            Some(g) => self.check_group_event(g, false),
            None => Event::NONE,
        }
    }

    /// Drag events of the current group, ignoring button events.
    pub fn check_event_drag_only(&mut self) -> Event {
        match self.open_group("check_event_drag_only") {
            Some(g) => self.check_group_event(g, true),
            None => Event::NONE,
        }
    }

    /// Makes the current group the focus target of the first keyboard
    /// navigation.
    pub fn set_default_focus(&mut self) {
        let Some(g) = self.open_group("set_default_focus") else {
            return;
        };
        if self.pass == Pass::Layout {
            if let Some(node) = self.groups[g].element_idx.and_then(|idx| self.registry.node(idx)) {
                self.interaction.set_default_focus(node.hash);
            }
        }
    }

    /// Blocks input to every interactive element declared before the
    /// current group, except the groups enclosing it.
    pub fn modal_group(&mut self) {
        let Some(g) = self.open_group("modal_group") else {
            return;
        };
        if self.pass == Pass::Layout {
            if let Some(idx) = self.groups[g].element_idx {
                self.interaction.set_modal_boundary(idx);
            }
        }
    }

    /// Gives `id` exclusive use of the pointer that produced the latest
    /// event.
    pub fn capture_pointer(&mut self, id: &str) {
        if self.pass == Pass::Interaction {
            self.interaction.capture_pointer(HashedId::of(id));
        }
    }

    /// Releases the pointer that produced the latest event.
    pub fn release_pointer(&mut self) {
        if self.pass == Pass::Interaction {
            self.interaction.release_pointer();
        }
    }

    /// Most recently captured pointer while it stays captured.
    #[must_use]
    pub fn captured_pointer_index(&self) -> Option<usize> {
        self.interaction.captured_pointer_index()
    }

    /// Returns true if the latest interaction came from a pointer.
    #[must_use]
    pub fn is_last_event_pointer_type(&self) -> bool {
        self.interaction.is_last_event_pointer_type()
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Top-left of the current group in virtual units. Zero in the layout
    /// pass.
    #[must_use]
    pub fn group_position(&self) -> Vec2 {
        match self.pass {
            Pass::Layout => Vec2::ZERO,
            Pass::Interaction => self.mapper.physical_to_virtual(self.current().origin),
        }
    }

    /// Size of the current group in virtual units, scrollable content
    /// included. In the layout pass this is the size measured so far.
    #[must_use]
    pub fn group_size(&self) -> Vec2 {
        let group = self.current();
        let size = match self.pass {
            Pass::Layout => group.measured_size(),
            Pass::Interaction => group.size + group.extra,
        };
        self.mapper.physical_to_virtual(size)
    }

    /// Screen rect of an element declared earlier in the interaction pass.
    #[must_use]
    pub fn element_rect(&self, id: HashedId) -> Option<Rect> {
        match self.pass {
            Pass::Layout => None,
            Pass::Interaction => self
                .registry
                .find(id)
                .and_then(|i| self.registry.node(i))
                .map(|n| n.rect()),
        }
    }

    // -------------------------------------------------------------------------
    // Settings
    // -------------------------------------------------------------------------

    /// Changes the virtual resolution for the rest of this pass.
    pub fn set_virtual_resolution(&mut self, virtual_resolution: f32) {
        self.mapper.set_virtual_resolution(virtual_resolution);
    }

    /// Canvas size in virtual units.
    #[must_use]
    pub fn virtual_resolution(&self) -> Vec2 {
        self.mapper.virtual_canvas()
    }

    /// Physical pixels per virtual unit.
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.mapper.scale()
    }

    /// Sets drag, wheel and gamepad scroll speeds.
    pub fn set_scroll_speed(&mut self, drag: f32, wheel: f32, gamepad: f32) {
        self.style.scroll_speed_drag = drag;
        self.style.scroll_speed_wheel = wheel;
        self.style.scroll_speed_gamepad = gamepad;
    }

    /// Sets the pointer travel, in physical pixels, that starts a drag.
    pub fn set_drag_start_threshold(&mut self, threshold: i32) {
        self.style.drag_start_threshold = threshold.max(0);
    }

    /// Sets the label and edit text color.
    pub fn set_text_color(&mut self, color: Color) {
        self.style.text_color = color;
    }

    /// Sets the edit caret color.
    pub fn set_caret_color(&mut self, color: Color) {
        self.style.caret_color = color;
    }

    /// Sets the backgrounds stock widgets draw when hovered and pressed.
    pub fn set_hover_click_color(&mut self, hover: Color, click: Color) {
        self.style.hover_color = hover;
        self.style.click_color = click;
    }

    /// Sets the image tint.
    pub fn set_image_color(&mut self, color: Color) {
        self.style.image_color = color;
    }

    /// Sets line advance as a multiple of the font size.
    pub fn set_text_line_height_scale(&mut self, scale: f32) {
        if scale > 0.0 {
            self.style.line_height_scale = scale;
        }
    }

    /// Sets the marker appended to truncated labels.
    pub fn set_text_ellipsis(&mut self, ellipsis: &str) {
        ellipsis.clone_into(&mut self.style.ellipsis);
    }

    // -------------------------------------------------------------------------
    // Animation
    // -------------------------------------------------------------------------

    /// Current value of an animation, `starting` when there is no animator.
    pub fn animatable(&mut self, id: HashedId, starting: &[f32]) -> Vec<f32> {
        match self.collab.animator.as_mut() {
            Some(animator) => animator.value(id, starting),
            None => starting.to_vec(),
        }
    }

    /// Moves an animation towards `target`. No-op without an animator.
    pub fn start_animation(&mut self, id: HashedId, target: &[f32], velocity: &[f32], curve: &AnimCurve) {
        if self.pass != Pass::Interaction {
            return;
        }
        if let Some(animator) = self.collab.animator.as_mut() {
            animator.set_target(id, target, velocity, curve);
        }
    }

    /// Seconds until an animation settles.
    #[must_use]
    pub fn animation_time_remaining(&self, id: HashedId) -> f64 {
        self.collab
            .animator
            .as_ref()
            .map_or(0.0, |a| a.time_remaining(id))
    }
}
