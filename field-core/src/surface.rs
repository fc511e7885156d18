//! The 2-D drawing target the field renders onto.

use glam::Vec2;

use crate::types::Rgba;

/// Minimal immediate-mode 2-D drawing surface.
///
/// Coordinates are in surface pixels with the origin at the top-left
/// corner. Implementations are expected to be cheap per call; the field
/// issues one call per particle and one per link every frame.
pub trait Surface {
    /// Erases everything drawn in the previous frame.
    fn clear(&mut self);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);

    fn stroke_line(&mut self, a: Vec2, b: Vec2, width: f32, color: Rgba);
}

/// A [`Surface`] that only records what it was asked to draw.
///
/// `circles` and `lines` hold the current frame; `calls` counts every call
/// ever received, clears included. Handy for headless hosts and for
/// inspecting a frame.
#[derive(Debug, Default)]
pub struct Recorder {
    pub clears: usize,
    pub calls: usize,
    pub circles: Vec<(Vec2, f32, Rgba)>,
    pub lines: Vec<(Vec2, Vec2, f32, Rgba)>,
}

impl Surface for Recorder {
    fn clear(&mut self) {
        self.clears += 1;
        self.calls += 1;
        self.circles.clear();
        self.lines.clear();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.calls += 1;
        self.circles.push((center, radius, color));
    }

    fn stroke_line(&mut self, a: Vec2, b: Vec2, width: f32, color: Rgba) {
        self.calls += 1;
        self.lines.push((a, b, width, color));
    }
}
