use eframe::egui::{self, RichText, Ui};

use crate::graph::RecordPayload;
use crate::util::join_tags;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Selection Details");
        ui.add_space(6.0);

        let Some((index, node)) = self.selection.current(&self.graph) else {
            ui.label("Select a node on the canvas or in the node list.");
            return;
        };

        ui.label(RichText::new(node.label.as_str()).strong());
        ui.small(node.id.as_str());
        ui.label(node.kind.label());
        ui.add_space(6.0);

        match node.payload.resolve(&self.library) {
            Some(RecordPayload::Knowledge(source)) => {
                ui.label(format!("Title: {}", source.title));
                ui.label(format!("Type: {}", source.source_kind.label()));
                ui.label(format!("Tags: {}", join_tags(source.tags.iter().flatten())));
                ui.separator();
                ui.label(RichText::new("Summary").strong());
                match source.summary.as_deref() {
                    Some(summary) if !summary.trim().is_empty() => {
                        ui.label(summary);
                    }
                    _ => {
                        ui.label("No summary available.");
                    }
                }
            }
            Some(RecordPayload::Memory(memory)) => {
                ui.label(format!("Importance: {}", memory.importance));
                ui.label(format!("Tags: {}", join_tags(memory.tags.iter().flatten())));
                ui.separator();
                ui.label(RichText::new("Content").strong());
                egui::ScrollArea::vertical()
                    .id_salt("memory_content_scroll")
                    .max_height(200.0)
                    .show(ui, |ui| {
                        ui.label(memory.content.as_str());
                    });
            }
            None => {
                ui.label("The originating record is no longer available.");
            }
        }

        ui.separator();
        ui.label(RichText::new("Connected nodes").strong());
        let mut connected = self
            .graph
            .neighbors(index)
            .map(|(other, edge)| (other, edge.weight, join_tags(&edge.shared_tags)))
            .collect::<Vec<_>>();
        connected.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let mut clicked = None;
        if connected.is_empty() {
            ui.label("No shared tags with other nodes.");
        } else {
            egui::ScrollArea::vertical()
                .id_salt("connected_nodes_scroll")
                .max_height(320.0)
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for (other, weight, shared) in &connected {
                        let Some(other_node) = self.graph.nodes.get(*other) else {
                            continue;
                        };
                        let label = format!("{}  (×{weight}: {shared})", other_node.label);
                        if ui.link(label).on_hover_text(other_node.id.as_str()).clicked() {
                            clicked = Some(*other);
                        }
                    }
                });
        }

        ui.add_space(6.0);
        let clear = ui.button("Clear selection").clicked();

        if let Some(other) = clicked {
            self.select_node(other);
        } else if clear {
            self.clear_selection();
        }
    }
}
