use eframe::egui::{self, RichText, Ui};
use orgflow_layout::model::{Connection, WorkflowModel};
use tracing::warn;

use super::super::ViewModel;

fn join_or_dash(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_owned()
    } else {
        values.join(", ")
    }
}

fn draw_entity_facts(ui: &mut Ui, workflow: &WorkflowModel, node_id: &str) {
    if let Some(level) = workflow.level_of(node_id) {
        ui.label(format!("Level: {}", level.label()));
    }

    if let Some(team) = workflow.teams.iter().find(|team| team.id == node_id) {
        if let Some(team_type) = &team.team_type {
            ui.label(format!("Team type: {team_type}"));
        }
        ui.label(format!("Members: {}", join_or_dash(&team.members)));
        ui.label(format!("Collaborators: {}", join_or_dash(&team.collaborators)));
    } else if let Some(item) = workflow.work_items.iter().find(|item| item.id == node_id) {
        if let Some(source) = &item.source {
            ui.label(format!("Source: {source}"));
        }
        if let Some(status) = &item.status {
            ui.label(format!("Status: {status}"));
        }
        if let Some(owner) = &item.owning_team_id {
            ui.label(format!(
                "Owner: {}",
                workflow.entity_name(owner).unwrap_or(owner.as_str())
            ));
        }
        if let Some(description) = &item.description {
            ui.label(description.as_str());
        }
    } else if let Some(ritual) = workflow.rituals.iter().find(|ritual| ritual.id == node_id) {
        ui.label(format!("Frequency: {}", ritual.ritual_frequency));
        ui.label(format!("Participants: {}", join_or_dash(&ritual.participants)));
        if let Some(owner) = &ritual.owning_team_id {
            ui.label(format!(
                "Owner: {}",
                workflow.entity_name(owner).unwrap_or(owner.as_str())
            ));
        }
        if !ritual.agenda_items.is_empty() {
            ui.label(RichText::new("Agenda").strong());
            for item in &ritual.agenda_items {
                ui.label(format!("- {item}"));
            }
        }
    }
}

fn draw_connection_list(
    ui: &mut Ui,
    workflow: &WorkflowModel,
    heading: &str,
    connections: &[&Connection],
    upstream: bool,
) -> Option<String> {
    let mut clicked = None;

    ui.label(RichText::new(format!("{heading} ({})", connections.len())).strong());
    if connections.is_empty() {
        ui.weak("None");
        return None;
    }

    for connection in connections {
        let other = if upstream {
            &connection.from
        } else {
            &connection.to
        };
        let name = workflow.entity_name(other).unwrap_or(other.as_str());
        let text = match &connection.label {
            Some(label) => format!("{name}  ({label})"),
            None => name.to_owned(),
        };
        if ui.link(text).on_hover_text(other.as_str()).clicked() {
            clicked = Some(other.clone());
        }
    }

    clicked
}

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Inspector");
        ui.add_space(6.0);

        let engine = self.engine.borrow();
        let Some(node) = engine.selected_node() else {
            ui.label("Click a node on the canvas or a search result to inspect it.");
            return;
        };

        let node_id = node.id().to_owned();
        let pinned = node.is_pinned();
        let position = node.position();
        let component_nodes = engine.highlight().node_count().unwrap_or(1);
        let component_edges = engine.highlight().edge_count().unwrap_or(0);

        ui.label(RichText::new(node.label()).strong());
        ui.small(node_id.as_str());
        ui.add_space(6.0);
        ui.label(format!("Kind: {}", node.kind().label()));
        ui.label(format!("Position: ({:.0}, {:.0})", position.x, position.y));
        ui.label(format!(
            "Connected component: {component_nodes} nodes / {component_edges} edges"
        ));
        drop(engine);

        let mut pending_selection = None;

        if let Some(workflow) = &self.workflow {
            ui.separator();
            draw_entity_facts(ui, workflow, &node_id);

            ui.separator();
            let (upstream, downstream) = workflow.connections_of(&node_id);
            egui::ScrollArea::vertical()
                .id_salt("connections_scroll")
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    pending_selection =
                        draw_connection_list(ui, workflow, "Upstream", &upstream, true);
                    ui.add_space(6.0);
                    if let Some(clicked) =
                        draw_connection_list(ui, workflow, "Downstream", &downstream, false)
                    {
                        pending_selection = Some(clicked);
                    }
                });
        }

        ui.separator();
        ui.horizontal(|ui| {
            let (label, hover) = if pinned {
                ("Release", "Let the simulation move this node again.")
            } else {
                ("Pin", "Hold this node at its current position.")
            };
            if ui.button(label).on_hover_text(hover).clicked() {
                let mut engine = self.engine.borrow_mut();
                let result = if pinned {
                    engine.release(&node_id)
                } else {
                    engine.pin(&node_id)
                };
                if let Err(error) = result {
                    warn!(%error, "pin toggle failed");
                }
            }
            if ui.button("Deselect").clicked() {
                pending_selection = None;
                self.select_node(None);
            }
        });

        if let Some(next) = pending_selection {
            self.select_node(Some(&next));
        }
    }
}
