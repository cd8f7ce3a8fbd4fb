use eframe::egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, Vec2};

use super::{Surface, SurfaceSize};

/// [`Surface`] over an egui painter clipped to the canvas rectangle.
///
/// egui already sizes the framebuffer as points times `pixels_per_point`, so
/// the surface only translates canvas-local logical coordinates into screen
/// points.
pub struct PainterSurface<'a> {
    painter: &'a Painter,
    origin: Pos2,
    size: SurfaceSize,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a Painter, canvas: Rect) -> Self {
        Self {
            painter,
            origin: canvas.min,
            size: SurfaceSize::new(canvas.size(), 1.0),
        }
    }

    fn to_screen(&self, position: Pos2) -> Pos2 {
        self.origin + position.to_vec2()
    }

    fn to_screen_rect(&self, rect: Rect) -> Rect {
        rect.translate(self.origin.to_vec2())
    }
}

impl Surface for PainterSurface<'_> {
    fn configure(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn clear(&mut self, color: Color32) {
        let canvas = self.to_screen_rect(self.size.logical_rect());
        self.painter.rect_filled(canvas, 0.0, color);
    }

    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke) {
        self.painter
            .line_segment([self.to_screen(from), self.to_screen(to)], stroke);
    }

    fn circle(&mut self, center: Pos2, radius: f32, fill: Color32, stroke: Stroke) {
        self.painter
            .circle(self.to_screen(center), radius, fill, stroke);
    }

    fn rect_filled(&mut self, rect: Rect, fill: Color32) {
        self.painter
            .rect_filled(self.to_screen_rect(rect), 3.0, fill);
    }

    fn measure_text(&self, text: &str, font: &FontId) -> Vec2 {
        self.painter
            .layout_no_wrap(text.to_owned(), font.clone(), Color32::WHITE)
            .size()
    }

    fn text(&mut self, top_left: Pos2, text: &str, font: &FontId, color: Color32) {
        self.painter.text(
            self.to_screen(top_left),
            Align2::LEFT_TOP,
            text,
            font.clone(),
            color,
        );
    }
}
