use eframe::egui::Pos2;

use super::{KnowledgeGraph, Node, NodeKind, RecordRef};

pub const HIT_RADIUS: f32 = 12.0;

/// Index of the first node, in node order, whose centre lies strictly within
/// [`HIT_RADIUS`] of `point`. Overlapping nodes resolve to the earlier one even
/// when a later node is closer.
pub fn node_at_position(graph: &KnowledgeGraph, point: Pos2) -> Option<usize> {
    graph
        .nodes
        .iter()
        .position(|node| node.position.distance(point) < HIT_RADIUS)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedNode {
    pub node_id: String,
    pub kind: NodeKind,
    pub payload: RecordRef,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionChange {
    Selected(SelectedNode),
    Cleared,
    Unchanged,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    node_id: Option<String>,
}

impl Selection {
    pub fn is_selected(&self, node_id: &str) -> bool {
        self.node_id.as_deref() == Some(node_id)
    }

    pub fn clear(&mut self) -> SelectionChange {
        if self.node_id.take().is_some() {
            SelectionChange::Cleared
        } else {
            SelectionChange::Unchanged
        }
    }

    pub fn select_index(&mut self, graph: &KnowledgeGraph, index: usize) -> SelectionChange {
        let Some(node) = graph.nodes.get(index) else {
            return self.clear();
        };
        if self.is_selected(&node.id) {
            return SelectionChange::Unchanged;
        }

        self.node_id = Some(node.id.clone());
        SelectionChange::Selected(SelectedNode {
            node_id: node.id.clone(),
            kind: node.kind,
            payload: node.payload,
        })
    }

    pub fn click(&mut self, graph: &KnowledgeGraph, point: Pos2) -> SelectionChange {
        match node_at_position(graph, point) {
            Some(index) => self.select_index(graph, index),
            None => self.clear(),
        }
    }

    pub fn current<'a>(&self, graph: &'a KnowledgeGraph) -> Option<(usize, &'a Node)> {
        let index = graph.index_of(self.node_id.as_deref()?)?;
        graph.nodes.get(index).map(|node| (index, node))
    }
}
