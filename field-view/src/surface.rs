//! [`Surface`] implementation on top of the egui painter.

use field_core::{surface::Surface, types::Rgba};
use glam::Vec2;

/// Draws field coordinates into a screen rectangle of an egui painter.
///
/// Field coordinates have their origin at the top-left corner of `rect`.
pub struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    rect: egui::Rect,
    background: egui::Color32,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a egui::Painter, rect: egui::Rect, background: egui::Color32) -> Self {
        Self {
            painter,
            rect,
            background,
        }
    }
}

/// Converts a field-space position to screen-space.
pub fn to_screen(rect: egui::Rect, p: Vec2) -> egui::Pos2 {
    egui::pos2(rect.min.x + p.x, rect.min.y + p.y)
}

/// Converts a screen-space position to field-space. Inverse of [`to_screen`].
pub fn to_field(rect: egui::Rect, p: egui::Pos2) -> Vec2 {
    Vec2::new(p.x - rect.min.x, p.y - rect.min.y)
}

fn color32(c: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.alpha_u8())
}

impl Surface for PainterSurface<'_> {
    fn clear(&mut self) {
        self.painter
            .rect_filled(self.rect, egui::CornerRadius::ZERO, self.background);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.painter
            .circle_filled(to_screen(self.rect, center), radius, color32(color));
    }

    fn stroke_line(&mut self, a: Vec2, b: Vec2, width: f32, color: Rgba) {
        self.painter.line_segment(
            [to_screen(self.rect, a), to_screen(self.rect, b)],
            egui::Stroke::new(width, color32(color)),
        );
    }
}
