use eframe::egui::vec2;
use proptest::prelude::*;

use crate::config::{SimulationConfig, ViewportConfig};
use crate::graph::{GraphSnapshot, NodeKind, SnapshotEdge, SnapshotNode};
use crate::highlight::compute_reachable;
use crate::interaction::InteractionController;
use crate::physics::SimulationState;
use crate::viewport::Viewport;

fn node_name(index: u8) -> String {
    format!("n{index}")
}

fn edge_list_strategy() -> impl Strategy<Value = Vec<SnapshotEdge>> {
    prop::collection::vec((0u8..12, 0u8..12), 0..24).prop_map(|pairs| {
        pairs
            .into_iter()
            .enumerate()
            .map(|(index, (from, to))| {
                SnapshotEdge::new(format!("e{index}"), node_name(from), node_name(to))
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn screen_world_round_trip(
        x in -5_000.0f32..5_000.0,
        y in -5_000.0f32..5_000.0,
        pan_x in -2_000.0f32..2_000.0,
        pan_y in -2_000.0f32..2_000.0,
        wheel in -5_000.0f32..5_000.0,
    ) {
        let mut viewport = Viewport::default();
        viewport.pan(vec2(pan_x, pan_y));
        viewport.zoom(wheel);

        let world = vec2(x, y);
        let back = viewport.screen_to_world(viewport.world_to_screen(world));
        let tolerance = 1e-3 * (1.0 + world.length() + vec2(pan_x, pan_y).length());
        prop_assert!((back - world).length() <= tolerance);
    }

    #[test]
    fn zoom_never_leaves_bounds(deltas in prop::collection::vec(-1e7f32..1e7, 1..64)) {
        let config = ViewportConfig::default();
        let (min, max) = config.scale_bounds();
        let mut viewport = Viewport::new(config);
        for delta in deltas {
            viewport.zoom(delta);
            prop_assert!(viewport.scale() >= min && viewport.scale() <= max);
        }
    }

    #[test]
    fn reachability_is_symmetric(edges in edge_list_strategy(), a in 0u8..12, b in 0u8..12) {
        let a = node_name(a);
        let b = node_name(b);
        let from_a = compute_reachable(Some(a.as_str()), &edges);
        let from_b = compute_reachable(Some(b.as_str()), &edges);
        prop_assert_eq!(from_a.contains_node(&b), from_b.contains_node(&a));
        prop_assert!(from_a.contains_node(&a));
    }

    #[test]
    fn empty_selection_is_unrestricted(edges in edge_list_strategy()) {
        prop_assert!(compute_reachable(None, &edges).is_all());
    }

    #[test]
    fn pinned_node_ignores_forces(
        edges in edge_list_strategy(),
        pinned in 0u8..12,
        ticks in 1usize..80,
    ) {
        let nodes = (0..12)
            .map(|index| SnapshotNode::new(node_name(index), NodeKind::Story))
            .collect();
        let mut simulation = SimulationState::new(SimulationConfig::default());
        simulation.sync(&GraphSnapshot::new(nodes, edges));

        let pinned = node_name(pinned);
        let mut controller = InteractionController::default();
        controller.pin(&mut simulation, &pinned).unwrap();
        let target = simulation.position(&pinned).unwrap();

        for _ in 0..ticks {
            simulation.tick();
            prop_assert_eq!(simulation.position(&pinned), Some(target));
        }
        for node in simulation.nodes() {
            prop_assert!(node.position().is_finite());
            prop_assert!(node.velocity().is_finite());
        }
    }
}
