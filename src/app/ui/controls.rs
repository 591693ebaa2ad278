use std::ops::RangeInclusive;

use eframe::egui::{self, Ui};
use orgflow_layout::{InteractionEvent, SimulationConfig};

use super::super::ViewModel;
use super::super::render_utils::truncate_label;

const SEARCH_RESULT_ROWS: usize = 12;

fn physics_slider(
    ui: &mut Ui,
    value: &mut f32,
    range: RangeInclusive<f32>,
    text: &str,
    hover: &str,
) -> bool {
    ui.add(
        egui::Slider::new(value, range)
            .text(text)
            .clamping(egui::SliderClamping::Always),
    )
    .on_hover_text(hover)
    .changed()
}

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Layout Controls");
        ui.separator();
        ui.add_space(4.0);

        ui.label("Search (name or id)")
            .on_hover_text("Fuzzy-highlight matching nodes without changing the layout.");
        let search_response = ui
            .text_edit_singleline(&mut self.search)
            .on_hover_text("Type to highlight matching nodes; Enter selects the best match.");
        let submitted = search_response.lost_focus()
            && ui.input(|input| input.key_pressed(egui::Key::Enter));

        let matches = self.search_matches();
        if submitted && let Some(best) = matches.first() {
            self.select_node(Some(&best.id));
        }
        if !self.search.trim().is_empty() {
            if matches.is_empty() {
                ui.weak("No matching nodes.");
            }
            for found in matches.iter().take(SEARCH_RESULT_ROWS) {
                if ui
                    .link(truncate_label(&found.label, 36))
                    .on_hover_text(found.id.as_str())
                    .clicked()
                {
                    self.select_node(Some(&found.id));
                }
            }
            if matches.len() > SEARCH_RESULT_ROWS {
                ui.weak(format!("+{} more", matches.len() - SEARCH_RESULT_ROWS));
            }
        }

        ui.separator();

        let mut live = self.engine.borrow().is_live();
        if ui
            .checkbox(&mut live, "Live physics simulation")
            .on_hover_text("Pause to freeze the layout; dragging still moves pinned nodes.")
            .changed()
        {
            self.engine.borrow_mut().set_live(live);
        }
        ui.checkbox(&mut self.show_edge_labels, "Edge labels");
        ui.checkbox(&mut self.show_fps_bar, "FPS Display");

        ui.horizontal_wrapped(|ui| {
            if ui
                .button("Reset view")
                .on_hover_text("Restore the default pan and zoom.")
                .clicked()
            {
                self.dispatch(InteractionEvent::ResetView);
            }
            if ui
                .add_enabled(
                    self.engine.borrow().selection().is_some(),
                    egui::Button::new("Clear selection"),
                )
                .clicked()
            {
                self.select_node(None);
            }
        });

        ui.separator();

        ui.collapsing("Physics tuning", |ui| {
            let mut changed = false;
            changed |= physics_slider(
                ui,
                &mut self.physics.charge,
                0.0..=200_000.0,
                "Repulsion charge",
                "Strength of the inverse-square push between nearby nodes.",
            );
            changed |= physics_slider(
                ui,
                &mut self.physics.repulsion_cutoff,
                50.0..=2_000.0,
                "Repulsion cutoff",
                "Pairs farther apart than this ignore each other.",
            );
            changed |= physics_slider(
                ui,
                &mut self.physics.spring_strength,
                0.0..=0.25,
                "Spring strength",
                "How hard each edge pulls its endpoints toward the ideal length.",
            );
            changed |= physics_slider(
                ui,
                &mut self.physics.ideal_length,
                50.0..=1_000.0,
                "Ideal edge length",
                "Rest length of every edge spring, in world units.",
            );
            changed |= physics_slider(
                ui,
                &mut self.physics.gravity,
                0.0..=0.02,
                "Center gravity",
                "Pull toward the layout center that keeps components together.",
            );
            changed |= physics_slider(
                ui,
                &mut self.physics.friction,
                0.5..=0.99,
                "Friction",
                "Velocity kept per tick. Lower values settle faster.",
            );
            changed |= physics_slider(
                ui,
                &mut self.physics.max_speed,
                5.0..=200.0,
                "Max speed",
                "Per-tick displacement cap for free nodes.",
            );

            if ui.button("Restore defaults").clicked() {
                self.physics = SimulationConfig::default();
                changed = true;
            }

            if changed {
                self.engine
                    .borrow_mut()
                    .simulation_mut()
                    .set_config(self.physics);
            }
        });
    }
}
