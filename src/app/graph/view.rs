use std::time::Instant;

use eframe::egui::{Sense, Ui, Vec2};
use tracing::debug;

use crate::layout::layout_graph;
use crate::render::{PainterSurface, SurfaceSize, render};

use super::super::ViewModel;

impl ViewModel {
    fn ensure_layout(&mut self, extent: Vec2) {
        if self.layout_extent == Some(extent) {
            return;
        }

        let started = Instant::now();
        layout_graph(&mut self.graph, extent);
        self.layout_extent = Some(extent);
        debug!(
            nodes = self.graph.node_count(),
            width = extent.x,
            height = extent.y,
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "laid out knowledge graph"
        );
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click());
        self.ensure_layout(rect.size());

        self.update_hover_cursor(ui, rect, &response);
        self.handle_canvas_click(rect, &response);

        let painter = ui.painter_at(rect);
        let size = SurfaceSize::new(rect.size(), ui.ctx().pixels_per_point());
        let mut surface = PainterSurface::new(&painter, rect);
        render(&self.graph, &self.selection, size, &mut surface);
    }
}
