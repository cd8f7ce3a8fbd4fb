use std::collections::{BTreeSet, HashMap};

use eframe::egui::Pos2;
use tracing::{debug, warn};

use crate::records::{KnowledgeSource, MemoryItem};
use crate::util::{MEMORY_LABEL_CHARS, truncate_label};

use super::{Edge, KnowledgeGraph, Node, NodeKind, RecordRef};

pub const MEMORY_IMPORTANCE_THRESHOLD: f32 = 6.0;
pub const MAX_MEMORY_NODES: usize = 20;

/// Builds the tag co-occurrence graph.
///
/// Every knowledge source becomes a node. Memories are filtered to
/// `importance >= 6` and then capped at the first 20 in input order, without
/// re-sorting by importance. Edges are found by comparing every pair of nodes,
/// which is quadratic; with at most 20 memory nodes the graph stays in the low
/// hundreds of nodes for realistic knowledge bases.
pub fn build_graph(knowledge: &[KnowledgeSource], memories: &[MemoryItem]) -> KnowledgeGraph {
    let mut nodes = Vec::with_capacity(knowledge.len() + MAX_MEMORY_NODES);
    let mut index_by_id = HashMap::with_capacity(nodes.capacity());

    for (index, source) in knowledge.iter().enumerate() {
        push_node(
            &mut nodes,
            &mut index_by_id,
            NodeKind::KnowledgeSource,
            &source.id,
            source.title.clone(),
            source.tag_set(),
            RecordRef::Knowledge(index),
        );
    }

    let visible_memories = memories
        .iter()
        .enumerate()
        .filter(|(_, memory)| memory.importance >= MEMORY_IMPORTANCE_THRESHOLD)
        .take(MAX_MEMORY_NODES);
    for (index, memory) in visible_memories {
        push_node(
            &mut nodes,
            &mut index_by_id,
            NodeKind::MemoryItem,
            &memory.id,
            truncate_label(&memory.content, MEMORY_LABEL_CHARS),
            memory.tag_set(),
            RecordRef::Memory(index),
        );
    }

    let edges = collect_edges(&nodes);
    debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        "built knowledge graph"
    );

    KnowledgeGraph {
        nodes,
        edges,
        index_by_id,
    }
}

fn push_node(
    nodes: &mut Vec<Node>,
    index_by_id: &mut HashMap<String, usize>,
    kind: NodeKind,
    record_id: &str,
    label: String,
    tags: BTreeSet<String>,
    payload: RecordRef,
) {
    let base_id = format!("{}:{record_id}", kind.id_prefix());
    let mut id = base_id.clone();
    let mut duplicate = 1usize;
    while index_by_id.contains_key(&id) {
        duplicate += 1;
        id = format!("{base_id}~{duplicate}");
    }
    if duplicate > 1 {
        warn!(record_id, node_id = %id, "duplicate record id");
    }

    index_by_id.insert(id.clone(), nodes.len());
    nodes.push(Node {
        id,
        label,
        kind,
        tags,
        position: Pos2::ZERO,
        payload,
    });
}

fn collect_edges(nodes: &[Node]) -> Vec<Edge> {
    let mut edges = Vec::new();
    for (from, a) in nodes.iter().enumerate() {
        for (offset, b) in nodes[from + 1..].iter().enumerate() {
            let shared_tags = a
                .tags
                .intersection(&b.tags)
                .cloned()
                .collect::<BTreeSet<_>>();
            if shared_tags.is_empty() {
                continue;
            }

            edges.push(Edge {
                from,
                to: from + 1 + offset,
                weight: shared_tags.len() as u32,
                shared_tags,
            });
        }
    }
    edges
}
