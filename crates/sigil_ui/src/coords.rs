//! Virtual/physical coordinate mapping.
//!
//! Callers size everything in virtual units where the smallest canvas
//! dimension measures `virtual_resolution`. Layout, hit-testing and drawing
//! happen in whole physical pixels.

use sigil_shared::{Vec2, Vec2i, DEFAULT_VIRTUAL_RESOLUTION};

/// Converts between virtual units and physical pixels for one canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordMapper {
    canvas_size: Vec2i,
    virtual_resolution: f32,
    pixel_scale: f32,
}

impl CoordMapper {
    /// Creates a mapper for `canvas_size` physical pixels.
    #[must_use]
    pub fn new(canvas_size: Vec2i, virtual_resolution: f32) -> Self {
        let mut mapper = Self {
            canvas_size: canvas_size.clamp_non_negative(),
            virtual_resolution: DEFAULT_VIRTUAL_RESOLUTION,
            pixel_scale: 1.0,
        };
        mapper.set_virtual_resolution(virtual_resolution);
        mapper
    }

    /// Changes the virtual resolution. Non-positive values are ignored.
    pub fn set_virtual_resolution(&mut self, virtual_resolution: f32) {
        if virtual_resolution > 0.0 {
            self.virtual_resolution = virtual_resolution;
        }
        let scale = self.canvas_size.as_vec2() * (1.0 / self.virtual_resolution);
        self.pixel_scale = scale.x.min(scale.y);
    }

    /// Physical pixels per virtual unit.
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.pixel_scale
    }

    /// Canvas size in physical pixels.
    #[must_use]
    pub fn canvas_size(&self) -> Vec2i {
        self.canvas_size
    }

    /// Canvas size in virtual units.
    #[must_use]
    pub fn virtual_canvas(&self) -> Vec2 {
        self.physical_to_virtual(self.canvas_size)
    }

    /// Converts a virtual vector to physical pixels, rounding to nearest.
    #[must_use]
    pub fn virtual_to_physical(&self, v: Vec2) -> Vec2i {
        Vec2i::new(self.scalar_to_physical(v.x), self.scalar_to_physical(v.y))
    }

    /// Converts a virtual length to physical pixels, rounding to nearest.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn scalar_to_physical(&self, v: f32) -> i32 {
        (v * self.pixel_scale).round() as i32
    }

    /// Converts physical pixels to virtual units.
    #[must_use]
    pub fn physical_to_virtual(&self, v: Vec2i) -> Vec2 {
        if self.pixel_scale > 0.0 {
            v.as_vec2() * (1.0 / self.pixel_scale)
        } else {
            Vec2::ZERO
        }
    }
}
