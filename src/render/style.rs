use eframe::egui::{Color32, FontId, Stroke};

use crate::graph::NodeKind;

pub const NODE_RADIUS: f32 = 8.0;
pub const SELECTED_NODE_RADIUS: f32 = 12.0;
pub const NODE_OUTLINE_WIDTH: f32 = 2.0;
pub const EDGE_WIDTH: f32 = 1.0;
pub const LABEL_PADDING: f32 = 4.0;
pub const LABEL_GAP: f32 = 4.0;

pub const BACKGROUND: Color32 = Color32::from_rgb(15, 23, 42);
pub const EDGE_COLOR: Color32 = Color32::from_rgba_premultiplied(44, 49, 55, 77);
pub const LABEL_BACKGROUND: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 191);
pub const LABEL_TEXT: Color32 = Color32::WHITE;
pub const EMPTY_STATE_TEXT: Color32 = Color32::from_gray(148);

pub fn node_fill(kind: NodeKind, is_selected: bool) -> Color32 {
    match (kind, is_selected) {
        (NodeKind::KnowledgeSource, false) => Color32::from_rgb(59, 130, 246),
        (NodeKind::KnowledgeSource, true) => Color32::from_rgb(96, 165, 250),
        (NodeKind::MemoryItem, false) => Color32::from_rgb(168, 85, 247),
        (NodeKind::MemoryItem, true) => Color32::from_rgb(192, 132, 252),
    }
}

pub fn node_radius(is_selected: bool) -> f32 {
    if is_selected {
        SELECTED_NODE_RADIUS
    } else {
        NODE_RADIUS
    }
}

pub fn node_outline() -> Stroke {
    Stroke::new(NODE_OUTLINE_WIDTH, Color32::WHITE)
}

pub fn edge_stroke() -> Stroke {
    Stroke::new(EDGE_WIDTH, EDGE_COLOR)
}

pub fn label_font() -> FontId {
    FontId::proportional(12.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_and_state_has_its_own_fill() {
        let fills = [
            node_fill(NodeKind::KnowledgeSource, false),
            node_fill(NodeKind::KnowledgeSource, true),
            node_fill(NodeKind::MemoryItem, false),
            node_fill(NodeKind::MemoryItem, true),
        ];
        for (i, a) in fills.iter().enumerate() {
            for b in &fills[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn edges_are_translucent() {
        assert!(EDGE_COLOR.a() < 255);
        assert_eq!(edge_stroke().width, 1.0);
    }
}
