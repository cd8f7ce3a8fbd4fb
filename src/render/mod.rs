//! Draws a positioned [`KnowledgeGraph`] onto any [`Surface`].
//!
//! All coordinates handed to a surface are logical units. The surface maps
//! them onto a backing buffer of `logical size * pixel ratio` physical pixels,
//! so the sequence of draw calls is the same at every device pixel ratio.

mod painter;
pub mod style;

use eframe::egui::{Color32, FontId, Pos2, Rect, Stroke, Vec2, pos2};

use crate::graph::{KnowledgeGraph, Selection};

pub use painter::PainterSurface;

pub const EMPTY_STATE_MESSAGE: &str = "No knowledge sources or memories to show yet.";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSize {
    pub logical: Vec2,
    pub pixel_ratio: f32,
}

impl SurfaceSize {
    pub fn new(logical: Vec2, pixel_ratio: f32) -> Self {
        let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };
        Self {
            logical,
            pixel_ratio,
        }
    }

    /// Physical pixel dimensions of the backing buffer.
    pub fn backing_size(self) -> [u32; 2] {
        let scale = |value: f32| {
            let scaled = (value * self.pixel_ratio).round();
            if scaled.is_finite() && scaled > 0.0 {
                scaled as u32
            } else {
                0
            }
        };
        [scale(self.logical.x), scale(self.logical.y)]
    }

    pub fn logical_rect(self) -> Rect {
        Rect::from_min_size(Pos2::ZERO, self.logical)
    }
}

pub trait Surface {
    /// Sizes the backing buffer for `size` before a frame is drawn.
    fn configure(&mut self, size: SurfaceSize);
    fn size(&self) -> SurfaceSize;
    fn clear(&mut self, color: Color32);
    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke);
    fn circle(&mut self, center: Pos2, radius: f32, fill: Color32, stroke: Stroke);
    fn rect_filled(&mut self, rect: Rect, fill: Color32);
    fn measure_text(&self, text: &str, font: &FontId) -> Vec2;
    fn text(&mut self, top_left: Pos2, text: &str, font: &FontId, color: Color32);
}

pub fn render(
    graph: &KnowledgeGraph,
    selection: &Selection,
    size: SurfaceSize,
    surface: &mut impl Surface,
) {
    surface.configure(size);
    surface.clear(style::BACKGROUND);

    if graph.is_empty() {
        draw_empty_state(surface);
        return;
    }

    let edge_stroke = style::edge_stroke();
    for edge in &graph.edges {
        let (Some(from), Some(to)) = (graph.nodes.get(edge.from), graph.nodes.get(edge.to))
        else {
            continue;
        };
        surface.line(from.position, to.position, edge_stroke);
    }

    let outline = style::node_outline();
    for node in &graph.nodes {
        let is_selected = selection.is_selected(&node.id);
        surface.circle(
            node.position,
            style::node_radius(is_selected),
            style::node_fill(node.kind, is_selected),
            outline,
        );
    }

    if let Some((_, node)) = selection.current(graph) {
        draw_label(surface, node.position, &node.label);
    }
}

fn draw_label(surface: &mut impl Surface, anchor: Pos2, label: &str) {
    let font = style::label_font();
    let text_size = surface.measure_text(label, &font);
    let box_size = text_size + Vec2::splat(style::LABEL_PADDING * 2.0);
    let top = anchor.y + style::SELECTED_NODE_RADIUS + style::LABEL_GAP;
    let rect = Rect::from_min_size(pos2(anchor.x - box_size.x * 0.5, top), box_size);

    surface.rect_filled(rect, style::LABEL_BACKGROUND);
    surface.text(
        rect.min + Vec2::splat(style::LABEL_PADDING),
        label,
        &font,
        style::LABEL_TEXT,
    );
}

fn draw_empty_state(surface: &mut impl Surface) {
    let font = FontId::proportional(14.0);
    let text_size = surface.measure_text(EMPTY_STATE_MESSAGE, &font);
    let center = surface.size().logical_rect().center();
    surface.text(
        center - text_size * 0.5,
        EMPTY_STATE_MESSAGE,
        &font,
        style::EMPTY_STATE_TEXT,
    );
}
