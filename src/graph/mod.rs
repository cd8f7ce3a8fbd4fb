mod build;
mod interaction;

use std::collections::{BTreeSet, HashMap};

use eframe::egui::Pos2;

use crate::records::{KnowledgeSource, Library, MemoryItem};

pub use build::{MAX_MEMORY_NODES, MEMORY_IMPORTANCE_THRESHOLD, build_graph};
pub use interaction::{Selection, SelectionChange, node_at_position};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    KnowledgeSource,
    MemoryItem,
}

impl NodeKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::KnowledgeSource => "Knowledge source",
            Self::MemoryItem => "Memory",
        }
    }

    fn id_prefix(self) -> &'static str {
        match self {
            Self::KnowledgeSource => "knowledge",
            Self::MemoryItem => "memory",
        }
    }
}

/// Position of the originating record inside the [`Library`] the graph was
/// built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordRef {
    Knowledge(usize),
    Memory(usize),
}

pub enum RecordPayload<'a> {
    Knowledge(&'a KnowledgeSource),
    Memory(&'a MemoryItem),
}

impl RecordRef {
    pub fn resolve(self, library: &Library) -> Option<RecordPayload<'_>> {
        match self {
            Self::Knowledge(index) => library.knowledge.get(index).map(RecordPayload::Knowledge),
            Self::Memory(index) => library.memories.get(index).map(RecordPayload::Memory),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    pub tags: BTreeSet<String>,
    pub position: Pos2,
    pub payload: RecordRef,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub weight: u32,
    pub shared_tags: BTreeSet<String>,
}

#[derive(Clone, Debug, Default)]
pub struct KnowledgeGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    index_by_id: HashMap<String, usize>,
}

impl KnowledgeGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = (usize, &Edge)> + '_ {
        self.edges.iter().filter_map(move |edge| {
            if edge.from == index {
                Some((edge.to, edge))
            } else if edge.to == index {
                Some((edge.from, edge))
            } else {
                None
            }
        })
    }
}
