use glam::Vec2;

use crate::error::FieldError;

/// Index of a particle inside a [`crate::particle::ParticleSet`].
///
/// Only meaningful until the next re-initialization of the set.
pub type ParticleId = usize;

/// Size of the drawing surface in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Builds a viewport, rejecting sizes no surface could have.
    ///
    /// A zero, negative or non-finite extent is reported as
    /// [`FieldError::SurfaceUnavailable`].
    pub fn new(width: f32, height: f32) -> Result<Self, FieldError> {
        let usable = |v: f32| v.is_finite() && v > 0.0;
        if !usable(width) || !usable(height) {
            return Err(FieldError::SurfaceUnavailable { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Straight (non-premultiplied) RGBA colour with a float alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub fn from_rgb(rgb: [u8; 3], a: f32) -> Self {
        Self {
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
            a,
        }
    }

    /// Alpha quantized to a byte, as most backends want it.
    pub fn alpha_u8(&self) -> u8 {
        (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}
