use eframe::egui::{self, Pos2, Rect, Ui};

use crate::graph::node_at_position;

use super::super::ViewModel;

fn canvas_local(rect: Rect, screen: Pos2) -> Pos2 {
    (screen - rect.min).to_pos2()
}

impl ViewModel {
    pub(in crate::app) fn handle_canvas_click(&mut self, rect: Rect, response: &egui::Response) {
        if !response.clicked_by(egui::PointerButton::Primary) {
            return;
        }

        let Some(pointer) = response.interact_pointer_pos() else {
            return;
        };

        let change = self.selection.click(&self.graph, canvas_local(rect, pointer));
        self.report_selection_change(&change);
    }

    pub(in crate::app) fn update_hover_cursor(&self, ui: &Ui, rect: Rect, response: &egui::Response) {
        if !response.hovered() {
            return;
        }

        let Some(pointer) = ui.input(|input| input.pointer.hover_pos()) else {
            return;
        };

        if node_at_position(&self.graph, canvas_local(rect, pointer)).is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }
    }

    pub(in crate::app) fn select_node(&mut self, index: usize) {
        let change = self.selection.select_index(&self.graph, index);
        self.report_selection_change(&change);
    }

    pub(in crate::app) fn clear_selection(&mut self) {
        let change = self.selection.clear();
        self.report_selection_change(&change);
    }
}
