//! UI rendering output.
//!
//! The interaction pass records commands into a [`DrawList`], which splits
//! them into batches whenever the clip rect changes. Batches are handed to
//! the host's [`RenderSink`]; [`tessellate`] turns solid and textured quads
//! into GPU-ready vertices.

use crate::style::Color;
use sigil_shared::{Rect, Vec2i, Vec4};

/// Opaque handle to a host-owned texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureHandle {
    /// Host texture id.
    pub id: u32,
    /// Size in pixels. Zero while the texture is not loaded.
    pub size: Vec2i,
}

impl TextureHandle {
    /// Creates a handle.
    #[must_use]
    pub const fn new(id: u32, size: Vec2i) -> Self {
        Self { id, size }
    }

    /// Returns true if the texture has pixels.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.size.x > 0 && self.size.y > 0
    }
}

/// A render command for the UI. Coordinates are physical pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Filled rectangle.
    Rect {
        /// Bounds.
        bounds: Rect,
        /// Fill color.
        color: Color,
    },
    /// Textured quad.
    Texture {
        /// Bounds.
        bounds: Rect,
        /// Texture ID.
        texture_id: u32,
        /// UV coordinates (u0, v0, u1, v1).
        uv: [f32; 4],
        /// Tint color.
        color: Color,
    },
    /// One line of text, drawn by the host's glyph renderer.
    Text {
        /// Line content.
        text: String,
        /// Top-left of the line.
        position: Vec2i,
        /// Font size in pixels.
        ysize: i32,
        /// Text color.
        color: Color,
    },
}

impl RenderCommand {
    /// Screen area the command covers, if it has one.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rect { bounds, .. } | Self::Texture { bounds, .. } => Some(*bounds),
            Self::Text { .. } => None,
        }
    }
}

/// Commands sharing one clip rect.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UiBatch {
    /// Commands in submission order.
    pub commands: Vec<RenderCommand>,
    /// Scissor rect, `None` for the whole canvas.
    pub clip: Option<Rect>,
}

/// Receives the batches of one frame.
pub trait RenderSink {
    /// Called once at the end of the interaction pass.
    fn submit(&mut self, batches: &[UiBatch]);
}

impl RenderSink for Vec<UiBatch> {
    fn submit(&mut self, batches: &[UiBatch]) {
        self.extend_from_slice(batches);
    }
}

/// Collects commands for one frame.
#[derive(Debug, Default)]
pub struct DrawList {
    /// Clip stack.
    clip_stack: Vec<Rect>,
    /// Finished and in-progress batches.
    batches: Vec<UiBatch>,
    /// Commands recorded this frame.
    command_count: usize,
}

impl DrawList {
    /// Creates an empty draw list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            clip_stack: Vec::with_capacity(16),
            batches: Vec::with_capacity(16),
            command_count: 0,
        }
    }

    /// Clears everything recorded so far.
    pub fn begin_frame(&mut self) {
        self.clip_stack.clear();
        self.batches.clear();
        self.command_count = 0;
    }

    fn open_batch(&mut self) -> &mut UiBatch {
        let clip = self.current_clip();
        let reuse = self
            .batches
            .last()
            .is_some_and(|b| b.clip == clip);
        if !reuse {
            self.batches.push(UiBatch {
                commands: Vec::with_capacity(64),
                clip,
            });
        }
        let last = self.batches.len() - 1;
        &mut self.batches[last]
    }

    /// Adds a render command. Commands fully outside the clip are dropped.
    pub fn push(&mut self, command: RenderCommand) {
        if let (Some(clip), Some(bounds)) = (self.current_clip(), command.bounds()) {
            if !clip.intersects(&bounds) {
                return;
            }
        }
        self.command_count += 1;
        self.open_batch().commands.push(command);
    }

    /// Pushes a clip rect, intersected with the current one.
    pub fn push_clip(&mut self, bounds: Rect) {
        let actual_clip = if let Some(current) = self.clip_stack.last() {
            current
                .intersection(&bounds)
                .unwrap_or(Rect::new(bounds.x, bounds.y, 0, 0))
        } else {
            bounds
        };
        self.clip_stack.push(actual_clip);
    }

    /// Pops the current clip rect.
    pub fn pop_clip(&mut self) {
        self.clip_stack.pop();
    }

    /// Returns the current clip rect.
    #[must_use]
    pub fn current_clip(&self) -> Option<Rect> {
        self.clip_stack.last().copied()
    }

    /// Total commands recorded this frame.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.command_count
    }

    /// Batches recorded so far.
    #[must_use]
    pub fn batches(&self) -> &[UiBatch] {
        &self.batches
    }

    /// Hands the frame's batches to `sink`.
    pub fn flush(&mut self, sink: &mut dyn RenderSink) {
        self.batches.retain(|b| !b.commands.is_empty());
        if !self.batches.is_empty() {
            sink.submit(&self.batches);
        }
    }
}

/// Vertex for UI rendering.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct UiVertex {
    /// Position (x, y).
    pub position: [f32; 2],
    /// UV coordinates.
    pub uv: [f32; 2],
    /// Color (RGBA).
    pub color: [f32; 4],
}

impl UiVertex {
    /// Creates a new vertex.
    #[must_use]
    pub const fn new(x: f32, y: f32, u: f32, v: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            uv: [u, v],
            color,
        }
    }
}

/// Indexed quads for one batch, grouped by texture.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    /// Vertices, four per quad.
    pub vertices: Vec<UiVertex>,
    /// Triangle indices, six per quad.
    pub indices: Vec<u32>,
    /// `(texture_id, first_index, index_count)` runs. `None` is untextured.
    pub draws: Vec<(Option<u32>, u32, u32)>,
}

/// Converts a batch's quads into vertices. Text is left to the host.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn tessellate(batch: &UiBatch) -> Mesh {
    let mut mesh = Mesh::default();
    for command in &batch.commands {
        let (bounds, texture, uv, color) = match command {
            RenderCommand::Rect { bounds, color } => (*bounds, None, [0.0, 0.0, 1.0, 1.0], *color),
            RenderCommand::Texture {
                bounds,
                texture_id,
                uv,
                color,
            } => (*bounds, Some(*texture_id), *uv, *color),
            RenderCommand::Text { .. } => continue,
        };

        let base = mesh.vertices.len() as u32;
        let (x0, y0) = (bounds.x as f32, bounds.y as f32);
        let (x1, y1) = (bounds.right() as f32, bounds.bottom() as f32);
        let rgba = color.to_array();
        mesh.vertices.extend_from_slice(&[
            UiVertex::new(x0, y0, uv[0], uv[1], rgba),
            UiVertex::new(x1, y0, uv[2], uv[1], rgba),
            UiVertex::new(x1, y1, uv[2], uv[3], rgba),
            UiVertex::new(x0, y1, uv[0], uv[3], rgba),
        ]);

        let first = mesh.indices.len() as u32;
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        match mesh.draws.last_mut() {
            Some((tex, _, count)) if *tex == texture => *count += 6,
            _ => mesh.draws.push((texture, first, 6)),
        }
    }
    mesh
}

/// Splits `bounds` into the nine quads of a stretchable texture.
///
/// `patch` is `(x0, y0, x1, y1)` in UV space: the borders outside it keep
/// their pixel size while the middle stretches. Borders shrink to half the
/// target when the target is smaller than the texture's corners.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn nine_patch(
    texture: &TextureHandle,
    patch: Vec4,
    bounds: Rect,
    color: Color,
) -> Vec<RenderCommand> {
    let tex = texture.size.as_vec2();
    let left = ((patch.x * tex.x).round() as i32).min(bounds.width / 2).max(0);
    let right = (((1.0 - patch.z) * tex.x).round() as i32)
        .min(bounds.width / 2)
        .max(0);
    let top = ((patch.y * tex.y).round() as i32).min(bounds.height / 2).max(0);
    let bottom = (((1.0 - patch.w) * tex.y).round() as i32)
        .min(bounds.height / 2)
        .max(0);

    let xs = [bounds.x, bounds.x + left, bounds.right() - right, bounds.right()];
    let ys = [bounds.y, bounds.y + top, bounds.bottom() - bottom, bounds.bottom()];
    let us = [0.0, patch.x, patch.z, 1.0];
    let vs = [0.0, patch.y, patch.w, 1.0];

    let mut commands = Vec::with_capacity(9);
    for row in 0..3 {
        for col in 0..3 {
            let quad = Rect::new(xs[col], ys[row], xs[col + 1] - xs[col], ys[row + 1] - ys[row]);
            if quad.width <= 0 || quad.height <= 0 {
                continue;
            }
            commands.push(RenderCommand::Texture {
                bounds: quad,
                texture_id: texture.id,
                uv: [us[col], vs[row], us[col + 1], vs[row + 1]],
                color,
            });
        }
    }
    commands
}

/// Drawing surface handed to custom element renderers.
pub struct Painter<'a> {
    list: &'a mut DrawList,
    tint: Color,
}

impl<'a> Painter<'a> {
    pub(crate) fn new(list: &'a mut DrawList, tint: Color) -> Self {
        Self { list, tint }
    }

    /// Draws `texture` stretched over `pos`/`size` with the image color.
    pub fn texture(&mut self, texture: &TextureHandle, pos: Vec2i, size: Vec2i) {
        let tint = self.tint;
        self.texture_tinted(texture, pos, size, tint);
    }

    /// Draws `texture` stretched over `pos`/`size` with `color`.
    pub fn texture_tinted(&mut self, texture: &TextureHandle, pos: Vec2i, size: Vec2i, color: Color) {
        if !texture.is_loaded() {
            tracing::warn!("Skipping draw of unloaded texture {}", texture.id);
            return;
        }
        self.list.push(RenderCommand::Texture {
            bounds: Rect::from_pos_size(pos, size.clamp_non_negative()),
            texture_id: texture.id,
            uv: [0.0, 0.0, 1.0, 1.0],
            color,
        });
    }

    /// Draws a nine-patch over `pos`/`size`.
    pub fn nine_patch(&mut self, texture: &TextureHandle, patch: Vec4, pos: Vec2i, size: Vec2i) {
        if !texture.is_loaded() {
            tracing::warn!("Skipping nine-patch of unloaded texture {}", texture.id);
            return;
        }
        let bounds = Rect::from_pos_size(pos, size.clamp_non_negative());
        for command in nine_patch(texture, patch, bounds, self.tint) {
            self.list.push(command);
        }
    }

    /// Fills `pos`/`size` with `color`.
    pub fn rect(&mut self, color: Color, pos: Vec2i, size: Vec2i) {
        self.list.push(RenderCommand::Rect {
            bounds: Rect::from_pos_size(pos, size.clamp_non_negative()),
            color,
        });
    }
}
