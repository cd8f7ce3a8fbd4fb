use eframe::egui::{self, RichText, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::graph::{KnowledgeGraph, MAX_MEMORY_NODES, MEMORY_IMPORTANCE_THRESHOLD, NodeKind};
use crate::layout::LAYOUT_ITERATIONS;
use crate::render::SurfaceSize;
use crate::render::style::node_fill;

use super::super::ViewModel;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_lowercase(), &query.to_lowercase()))
}

/// Node indices whose label or tags match `query`, best match first. An empty
/// query keeps every node in graph order.
pub(in crate::app) fn matching_nodes(graph: &KnowledgeGraph, query: &str) -> Vec<usize> {
    let query = query.trim();
    if query.is_empty() {
        return (0..graph.node_count()).collect();
    }

    let matcher = SkimMatcherV2::default();
    let mut scored = graph
        .nodes
        .iter()
        .enumerate()
        .filter_map(|(index, node)| {
            let label_score = fuzzy_match_score(&matcher, &node.label, query);
            let tag_score = node
                .tags
                .iter()
                .filter_map(|tag| fuzzy_match_score(&matcher, tag, query))
                .max();
            label_score.max(tag_score).map(|score| (index, score))
        })
        .collect::<Vec<_>>();
    scored.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    scored.into_iter().map(|(index, _)| index).collect()
}

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Graph");
        ui.add_space(4.0);
        ui.label(format!(
            "Memories shown: importance ≥ {MEMORY_IMPORTANCE_THRESHOLD}, first {MAX_MEMORY_NODES} in order"
        ));
        ui.label(format!("Layout: {LAYOUT_ITERATIONS} force iterations"));
        if let Some(extent) = self.layout_extent {
            let [width, height] =
                SurfaceSize::new(extent, ui.ctx().pixels_per_point()).backing_size();
            ui.small(format!(
                "Canvas: {:.0} × {:.0} ({width} × {height} px)",
                extent.x, extent.y
            ));
        }

        ui.separator();
        ui.horizontal(|ui| {
            ui.label("Search");
            ui.text_edit_singleline(&mut self.search);
            if ui.button("Clear").clicked() {
                self.search.clear();
            }
        });

        let matches = matching_nodes(&self.graph, &self.search);
        ui.small(format!("{} of {} nodes", matches.len(), self.graph.node_count()));
        ui.add_space(4.0);

        if self.graph.is_empty() {
            ui.label("No nodes to list.");
            return;
        }

        let mut clicked = None;
        egui::ScrollArea::vertical()
            .id_salt("node_list_scroll")
            .auto_shrink([false, false])
            .show_rows(ui, 20.0, matches.len(), |ui, row_range| {
                for row in row_range {
                    let Some(&index) = matches.get(row) else {
                        continue;
                    };
                    let node = &self.graph.nodes[index];
                    let is_selected = self.selection.is_selected(&node.id);
                    let marker = match node.kind {
                        NodeKind::KnowledgeSource => "■",
                        NodeKind::MemoryItem => "●",
                    };

                    ui.horizontal(|ui| {
                        ui.label(RichText::new(marker).color(node_fill(node.kind, is_selected)));
                        if ui
                            .selectable_label(is_selected, node.label.as_str())
                            .on_hover_text(node.id.as_str())
                            .clicked()
                        {
                            clicked = Some(index);
                        }
                    });
                }
            });

        if let Some(index) = clicked {
            self.select_node(index);
        }
    }
}
