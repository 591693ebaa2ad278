use eframe::egui::{self, Rect, Ui};
use orgflow_layout::InteractionEvent;

use super::super::ViewModel;
use super::super::render_utils::to_local;

impl ViewModel {
    pub(in crate::app) fn handle_graph_zoom(&self, ui: &Ui, response: &egui::Response) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta);
        if scroll.y.abs() <= f32::EPSILON {
            return;
        }

        // egui reports wheel-up as positive; the engine zooms in on negative deltas.
        self.dispatch(InteractionEvent::Wheel {
            delta_x: -scroll.x,
            delta_y: -scroll.y,
        });
    }

    pub(in crate::app) fn handle_graph_pointer(&self, rect: Rect, response: &egui::Response) {
        let pointer = response.interact_pointer_pos().map(|pointer| to_local(rect, pointer));

        if response.drag_started_by(egui::PointerButton::Primary)
            && let Some(screen) = pointer
        {
            let hit = self
                .engine
                .borrow()
                .hit_test(screen)
                .map(|node| node.id().to_owned());
            if let Some(node_id) = hit {
                self.dispatch(InteractionEvent::DragStart { node_id, screen });
            }
        }

        let dragging_node = self.engine.borrow().interaction().dragged_node().is_some();

        if response.dragged_by(egui::PointerButton::Primary) {
            match pointer {
                Some(screen) if dragging_node => {
                    self.dispatch(InteractionEvent::DragMove { screen });
                }
                _ => self.dispatch(InteractionEvent::Pan {
                    screen_delta: response.drag_delta(),
                }),
            }
        }

        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.dispatch(InteractionEvent::Pan {
                screen_delta: response.drag_delta(),
            });
        }

        if response.drag_stopped() && dragging_node {
            self.dispatch(InteractionEvent::DragEnd);
        }

        if response.clicked_by(egui::PointerButton::Primary)
            && let Some(screen) = pointer
        {
            self.dispatch(InteractionEvent::SelectAt { screen });
        }
    }

    pub(in crate::app) fn hovered_node(&self, ui: &Ui, rect: Rect) -> Option<String> {
        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        if !rect.contains(pointer) {
            return None;
        }

        self.engine
            .borrow()
            .hit_test(to_local(rect, pointer))
            .map(|node| node.id().to_owned())
    }

    pub(in crate::app) fn select_node(&self, node_id: Option<&str>) {
        self.engine.borrow_mut().select(node_id);
    }
}
