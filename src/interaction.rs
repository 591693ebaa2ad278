use eframe::egui::{Pos2, Vec2};
use tracing::trace;

use crate::config::NodeExtents;
use crate::error::{EngineError, Result};
use crate::physics::{SimNode, SimulationState};
use crate::viewport::Viewport;

#[derive(Clone, Debug, PartialEq)]
struct DragSession {
    node_id: String,
    last_screen: Pos2,
    was_pinned: bool,
}

#[derive(Clone, Debug, Default)]
pub struct InteractionController {
    extents: NodeExtents,
    drag: Option<DragSession>,
    last_touched: Option<String>,
}

fn unknown(node_id: &str) -> EngineError {
    EngineError::UnknownNode {
        node_id: node_id.to_owned(),
    }
}

impl InteractionController {
    pub fn new(extents: NodeExtents) -> Self {
        Self {
            extents,
            drag: None,
            last_touched: None,
        }
    }

    pub fn extents(&self) -> &NodeExtents {
        &self.extents
    }

    pub fn dragged_node(&self) -> Option<&str> {
        self.drag.as_ref().map(|session| session.node_id.as_str())
    }

    /// Node most recently dragged or selected; wins hit-test ties.
    pub fn last_touched(&self) -> Option<&str> {
        self.last_touched.as_deref()
    }

    pub fn mark_touched(&mut self, node_id: &str) {
        if self.last_touched.as_deref() != Some(node_id) {
            self.last_touched = Some(node_id.to_owned());
        }
    }

    pub fn pin(&mut self, simulation: &mut SimulationState, node_id: &str) -> Result<()> {
        let node = simulation
            .node_mut(node_id)
            .ok_or_else(|| unknown(node_id))?;
        node.pin();
        trace!(node = node_id, "pinned node");
        Ok(())
    }

    pub fn drag(
        &mut self,
        simulation: &mut SimulationState,
        node_id: &str,
        world_delta: Vec2,
    ) -> Result<()> {
        let node = simulation
            .node_mut(node_id)
            .ok_or_else(|| unknown(node_id))?;
        if !node.move_pin(world_delta) {
            return Err(EngineError::NotPinned {
                node_id: node_id.to_owned(),
            });
        }
        self.mark_touched(node_id);
        Ok(())
    }

    pub fn release(&mut self, simulation: &mut SimulationState, node_id: &str) -> Result<()> {
        let node = simulation
            .node_mut(node_id)
            .ok_or_else(|| unknown(node_id))?;
        node.release();
        trace!(node = node_id, "released node");
        Ok(())
    }

    /// Pins `node_id` and starts tracking pointer movement for it. An unfinished drag on
    /// another node is ended first. Nodes pinned before the drag stay pinned afterwards.
    pub fn begin_drag(
        &mut self,
        simulation: &mut SimulationState,
        node_id: &str,
        screen: Pos2,
    ) -> Result<()> {
        if simulation.node(node_id).is_none() {
            return Err(unknown(node_id));
        }

        let mut was_pinned = simulation.node(node_id).is_some_and(SimNode::is_pinned);
        if let Some(previous) = self.drag.take() {
            if previous.node_id == node_id {
                was_pinned = previous.was_pinned;
            } else if !previous.was_pinned && simulation.node(&previous.node_id).is_some() {
                self.release(simulation, &previous.node_id)?;
            }
        }

        self.pin(simulation, node_id)?;
        self.mark_touched(node_id);
        self.drag = Some(DragSession {
            node_id: node_id.to_owned(),
            last_screen: screen,
            was_pinned,
        });
        Ok(())
    }

    /// Moves the dragged node's pin by the pointer displacement, converted to world units.
    /// Returns `false` when no drag is active.
    pub fn drag_to(
        &mut self,
        simulation: &mut SimulationState,
        viewport: &Viewport,
        screen: Pos2,
    ) -> Result<bool> {
        let Some(session) = self.drag.as_mut() else {
            return Ok(false);
        };

        let world_delta =
            viewport.screen_to_world(screen) - viewport.screen_to_world(session.last_screen);
        session.last_screen = screen;
        let node_id = session.node_id.clone();
        self.drag(simulation, &node_id, world_delta)?;
        Ok(true)
    }

    /// Ends the drag, returning the node id. The node is released unless it was pinned
    /// before the drag started.
    pub fn end_drag(&mut self, simulation: &mut SimulationState) -> Result<Option<String>> {
        let Some(session) = self.drag.take() else {
            return Ok(None);
        };

        if !session.was_pinned {
            self.release(simulation, &session.node_id)?;
        }
        Ok(Some(session.node_id))
    }

    fn contains(&self, node: &SimNode, world: Vec2) -> bool {
        let half = self.extents.half_extent(node.kind());
        let offset = world - node.position();
        offset.x.abs() <= half.x && offset.y.abs() <= half.y
    }

    /// Topmost node whose bounding box contains `screen`. Overlaps resolve to the most
    /// recently touched node, then to the highest insertion index.
    pub fn hit_test<'a>(
        &self,
        simulation: &'a SimulationState,
        viewport: &Viewport,
        screen: Pos2,
    ) -> Option<&'a SimNode> {
        let world = viewport.screen_to_world(screen);
        if !world.is_finite() {
            return None;
        }

        let mut topmost = None;
        for node in simulation.nodes().iter().rev() {
            if !self.contains(node, world) {
                continue;
            }
            if self.last_touched.as_deref() == Some(node.id()) {
                return Some(node);
            }
            topmost.get_or_insert(node);
        }
        topmost
    }

    /// Node indices in paint order: insertion order with the last touched node on top.
    pub fn draw_order(&self, simulation: &SimulationState) -> Vec<usize> {
        let touched = self
            .last_touched
            .as_deref()
            .and_then(|id| simulation.index_of(id));
        let mut order = (0..simulation.nodes().len())
            .filter(|&index| Some(index) != touched)
            .collect::<Vec<_>>();
        order.extend(touched);
        order
    }

    /// Drops references to nodes that disappeared in the latest snapshot.
    pub(crate) fn forget_missing(&mut self, simulation: &SimulationState) {
        if let Some(session) = &self.drag
            && simulation.node(&session.node_id).is_none()
        {
            self.drag = None;
        }
        if let Some(id) = &self.last_touched
            && simulation.node(id).is_none()
        {
            self.last_touched = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use super::*;
    use crate::config::SimulationConfig;
    use crate::graph::{GraphSnapshot, NodeKind, SnapshotNode};

    fn simulation_with(ids: &[&str]) -> SimulationState {
        let mut simulation = SimulationState::new(SimulationConfig {
            initial_radius: 0.0,
            ..SimulationConfig::default()
        });
        simulation.sync(&GraphSnapshot::new(
            ids.iter()
                .map(|id| SnapshotNode::new(*id, NodeKind::Team))
                .collect(),
            Vec::new(),
        ));
        simulation
    }

    #[test]
    fn pin_is_idempotent_and_zeroes_velocity() {
        let mut simulation = simulation_with(&["a", "b"]);
        simulation.tick();
        let mut controller = InteractionController::default();

        controller.pin(&mut simulation, "a").unwrap();
        let target = simulation.node("a").unwrap().pinned_position();
        controller.pin(&mut simulation, "a").unwrap();

        let node = simulation.node("a").unwrap();
        assert_eq!(node.pinned_position(), target);
        assert_eq!(node.pinned_position(), Some(node.position()));
        assert_eq!(node.velocity(), Vec2::ZERO);
    }

    #[test]
    fn drag_requires_pin() {
        let mut simulation = simulation_with(&["a"]);
        let mut controller = InteractionController::default();

        assert_eq!(
            controller.drag(&mut simulation, "a", vec2(1.0, 1.0)),
            Err(EngineError::NotPinned {
                node_id: "a".to_owned()
            })
        );
        assert_eq!(
            controller.pin(&mut simulation, "missing"),
            Err(EngineError::UnknownNode {
                node_id: "missing".to_owned()
            })
        );
    }

    #[test]
    fn drag_moves_pin_by_exact_delta() {
        let mut simulation = simulation_with(&["a", "b"]);
        let mut controller = InteractionController::default();
        controller.pin(&mut simulation, "a").unwrap();
        let start = simulation.node("a").unwrap().pinned_position().unwrap();

        controller.drag(&mut simulation, "a", vec2(50.0, -20.0)).unwrap();
        for _ in 0..10 {
            simulation.tick();
        }

        let node = simulation.node("a").unwrap();
        assert_eq!(node.pinned_position(), Some(start + vec2(50.0, -20.0)));
        assert_eq!(node.position(), start + vec2(50.0, -20.0));
    }

    #[test]
    fn release_resumes_from_current_position() {
        let mut simulation = simulation_with(&["a"]);
        let mut controller = InteractionController::default();
        controller.pin(&mut simulation, "a").unwrap();
        controller.drag(&mut simulation, "a", vec2(10.0, 0.0)).unwrap();
        simulation.tick();
        controller.release(&mut simulation, "a").unwrap();

        let node = simulation.node("a").unwrap();
        assert!(!node.is_pinned());
        assert_eq!(node.position(), vec2(10.0, 0.0));
        assert_eq!(node.velocity(), Vec2::ZERO);
    }

    #[test]
    fn pointer_drag_converts_screen_motion_through_scale() {
        let mut simulation = simulation_with(&["a"]);
        let mut viewport = Viewport::default();
        viewport.zoom(-1000.0);
        let mut controller = InteractionController::default();

        controller
            .begin_drag(&mut simulation, "a", pos2(0.0, 0.0))
            .unwrap();
        assert!(
            controller
                .drag_to(&mut simulation, &viewport, pos2(40.0, 10.0))
                .unwrap()
        );
        assert_eq!(
            simulation.node("a").unwrap().pinned_position(),
            Some(vec2(20.0, 5.0))
        );

        assert_eq!(
            controller.end_drag(&mut simulation).unwrap(),
            Some("a".to_owned())
        );
        assert!(!simulation.node("a").unwrap().is_pinned());
        assert!(
            !controller
                .drag_to(&mut simulation, &viewport, pos2(90.0, 90.0))
                .unwrap()
        );
    }

    #[test]
    fn drag_keeps_an_existing_pin() {
        let mut simulation = simulation_with(&["a"]);
        let viewport = Viewport::default();
        let mut controller = InteractionController::default();
        controller.pin(&mut simulation, "a").unwrap();

        controller
            .begin_drag(&mut simulation, "a", pos2(0.0, 0.0))
            .unwrap();
        controller
            .drag_to(&mut simulation, &viewport, pos2(30.0, 0.0))
            .unwrap();
        controller.end_drag(&mut simulation).unwrap();

        let node = simulation.node("a").unwrap();
        assert!(node.is_pinned());
        assert_eq!(node.pinned_position(), Some(vec2(30.0, 0.0)));
    }

    #[test]
    fn hit_test_prefers_last_added_then_last_touched() {
        let simulation = simulation_with(&["a", "b", "c"]);
        let viewport = Viewport::default();
        let mut controller = InteractionController::default();

        let hit = controller.hit_test(&simulation, &viewport, pos2(5.0, 5.0));
        assert_eq!(hit.map(SimNode::id), Some("c"));

        controller.mark_touched("a");
        let hit = controller.hit_test(&simulation, &viewport, pos2(5.0, 5.0));
        assert_eq!(hit.map(SimNode::id), Some("a"));

        assert!(
            controller
                .hit_test(&simulation, &viewport, pos2(500.0, 500.0))
                .is_none()
        );
    }

    #[test]
    fn hit_test_maps_through_viewport() {
        let simulation = simulation_with(&["a"]);
        let mut viewport = Viewport::default();
        viewport.pan(vec2(300.0, 200.0));
        let controller = InteractionController::default();

        assert!(
            controller
                .hit_test(&simulation, &viewport, pos2(300.0, 200.0))
                .is_some()
        );
        assert!(
            controller
                .hit_test(&simulation, &viewport, pos2(0.0, 0.0))
                .is_none()
        );
    }

    #[test]
    fn draw_order_puts_last_touched_on_top() {
        let simulation = simulation_with(&["a", "b", "c"]);
        let mut controller = InteractionController::default();
        assert_eq!(controller.draw_order(&simulation), [0, 1, 2]);
        controller.mark_touched("a");
        assert_eq!(controller.draw_order(&simulation), [1, 2, 0]);
    }
}
