use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use eframe::egui::{self, Align, Context, Layout};
use orgflow_layout::LayoutEngine;
use orgflow_layout::model::WorkflowModel;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn new(
        engine: Rc<RefCell<LayoutEngine>>,
        workflow: Option<WorkflowModel>,
    ) -> Self {
        let physics = *engine.borrow().simulation().config();
        Self {
            engine,
            workflow,
            search: String::new(),
            physics,
            show_edge_labels: true,
            show_fps_bar: true,
            fps_current: 0.0,
            frame_times_ms: VecDeque::new(),
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        source: &str,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        self.update_fps_counter(ctx);

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("OrgFlow");
                    ui.separator();
                    ui.label(format!("source: {source}"));
                    {
                        let engine = self.engine.borrow();
                        let simulation = engine.simulation();
                        ui.label(format!("nodes: {}", simulation.nodes().len()));
                        ui.label(format!("edges: {}", simulation.edges().len()));
                        ui.label(format!("tick: {}", simulation.tick_count()));
                    }
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload graph"));
                    if reload_button
                        .on_hover_text("Read the source again; existing nodes keep their positions.")
                        .clicked()
                    {
                        *reload_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(fps_text) = self.fps_display_text() {
                            ui.label(fps_text);
                        }
                        if is_loading {
                            ui.spinner();
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_graph(ui));
    }
}
