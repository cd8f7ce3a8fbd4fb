use eframe::egui::{self, Align, Context, Layout};
use tracing::debug;

use crate::graph::{RecordPayload, Selection, SelectionChange, build_graph};
use crate::records::Library;

use super::super::{RecordPaths, ViewModel};

impl ViewModel {
    pub(in crate::app) fn new(library: Library) -> Self {
        let graph = build_graph(&library.knowledge, &library.memories);
        Self {
            library,
            graph,
            selection: Selection::default(),
            search: String::new(),
            layout_extent: None,
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        paths: &RecordPaths,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Knowledge graph");
                    ui.separator();
                    ui.label(format!("sources: {}", self.library.knowledge.len()));
                    ui.label(format!("memories: {}", self.library.memories.len()));
                    if let Some(path) = &paths.knowledge {
                        ui.label(format!("knowledge file: {}", path.display()));
                    }
                    if let Some(path) = &paths.memories {
                        ui.label(format!("memory file: {}", path.display()));
                    }
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload records"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(format!(
                            "nodes: {}  edges: {}",
                            self.graph.node_count(),
                            self.graph.edge_count()
                        ));
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            if is_loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Reloading records...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
            } else {
                self.draw_graph(ui);
            }
        });
    }

    pub(in crate::app) fn report_selection_change(&self, change: &SelectionChange) {
        match change {
            SelectionChange::Selected(selected) => {
                let record_id = match selected.payload.resolve(&self.library) {
                    Some(RecordPayload::Knowledge(source)) => source.id.as_str(),
                    Some(RecordPayload::Memory(memory)) => memory.id.as_str(),
                    None => "<missing>",
                };
                debug!(
                    node_id = %selected.node_id,
                    kind = selected.kind.label(),
                    record_id,
                    "node selected"
                );
            }
            SelectionChange::Cleared => debug!("selection cleared"),
            SelectionChange::Unchanged => {}
        }
    }
}
