use eframe::egui::{Vec2, vec2};
use orgflow_layout::model::{LoadedGraph, parse_graph_document};
use orgflow_layout::{
    EngineConfig, EngineError, GraphSnapshot, InteractionEvent, LayoutEngine, NodeKind,
    SimulationConfig, SimulationState, SnapshotEdge, SnapshotNode, compute_reachable,
};

fn nodes(ids: &[&str]) -> Vec<SnapshotNode> {
    ids.iter()
        .map(|id| SnapshotNode::new(*id, NodeKind::Team))
        .collect()
}

fn separation(simulation: &SimulationState, a: &str, b: &str) -> f32 {
    let a = simulation.position(a).unwrap();
    let b = simulation.position(b).unwrap();
    (a - b).length()
}

#[test]
fn connected_pair_settles_near_ideal_length() {
    let config = SimulationConfig {
        initial_radius: 500.0,
        ..SimulationConfig::default()
    };
    let mut simulation = SimulationState::new(config);
    simulation.sync(&GraphSnapshot::new(
        nodes(&["a", "b"]),
        vec![SnapshotEdge::new("ab", "a", "b")],
    ));
    assert!((separation(&simulation, "a", "b") - 1000.0).abs() < 1e-2);

    for _ in 0..1_000 {
        simulation.tick();
    }

    let distance = separation(&simulation, "a", "b");
    assert!((distance - 400.0).abs() < 5.0, "settled at {distance}");
    assert!(simulation.kinetic_energy() < 1e-3);
}

#[test]
fn unconnected_pair_stays_bounded_and_stable() {
    let mut simulation = SimulationState::new(SimulationConfig::default());
    simulation.sync(&GraphSnapshot::new(nodes(&["a", "b"]), Vec::new()));

    for _ in 0..3_000 {
        simulation.tick();
    }
    let settled = separation(&simulation, "a", "b");
    assert!(settled > 300.0 && settled < 700.0, "settled at {settled}");

    for _ in 0..100 {
        simulation.tick();
    }
    let later = separation(&simulation, "a", "b");
    assert!((later - settled).abs() < 1.0);

    let midpoint = (simulation.position("a").unwrap() + simulation.position("b").unwrap()) * 0.5;
    assert!(midpoint.length() < 1.0);
}

#[test]
fn chain_selection_highlights_component_only() {
    let edges = vec![
        SnapshotEdge::new("ab", "A", "B"),
        SnapshotEdge::new("bc", "B", "C"),
    ];

    let from_a = compute_reachable(Some("A"), &edges);
    for id in ["A", "B", "C"] {
        assert!(from_a.contains_node(id));
    }
    assert!(!from_a.contains_node("D"));
    assert!(from_a.contains_edge("ab") && from_a.contains_edge("bc"));

    let from_c = compute_reachable(Some("C"), &edges);
    assert_eq!(from_a, from_c);

    let isolated = compute_reachable(Some("D"), &edges);
    assert!(isolated.contains_node("D"));
    assert_eq!(isolated.node_count(), Some(1));
    assert_eq!(isolated.edge_count(), Some(0));

    assert!(compute_reachable(None, &edges).is_all());
}

#[test]
fn dragged_node_follows_pointer_exactly() {
    let mut engine = LayoutEngine::default();
    engine.submit_snapshot(GraphSnapshot::new(nodes(&["a", "b"]), Vec::new()));
    engine.apply_pending_snapshot();

    let start = engine.simulation().position("a").unwrap();
    let screen = engine.viewport().world_to_screen(start);

    engine
        .handle_event(InteractionEvent::DragStart {
            node_id: "a".to_owned(),
            screen,
        })
        .unwrap();
    engine
        .handle_event(InteractionEvent::DragMove {
            screen: screen + vec2(50.0, -20.0),
        })
        .unwrap();

    for _ in 0..30 {
        engine.frame();
        assert_eq!(
            engine.simulation().position("a"),
            Some(start + vec2(50.0, -20.0))
        );
    }
    assert_ne!(
        engine.simulation().node("b").unwrap().velocity(),
        Vec2::ZERO
    );

    engine.handle_event(InteractionEvent::DragEnd).unwrap();
    assert!(!engine.simulation().node("a").unwrap().is_pinned());
}

#[test]
fn pinned_node_ignores_neighbors() {
    let mut engine = LayoutEngine::default();
    engine.submit_snapshot(GraphSnapshot::new(
        nodes(&["hub", "x", "y", "z"]),
        vec![
            SnapshotEdge::new("hx", "hub", "x"),
            SnapshotEdge::new("hy", "hub", "y"),
            SnapshotEdge::new("hz", "hub", "z").emphasized(),
        ],
    ));
    engine.frame();

    engine.pin("hub").unwrap();
    let held = engine.simulation().position("hub").unwrap();
    for _ in 0..200 {
        engine.frame();
    }
    assert_eq!(engine.simulation().position("hub"), Some(held));

    assert_eq!(
        engine.drag("x", vec2(1.0, 1.0)),
        Err(EngineError::NotPinned {
            node_id: "x".to_owned()
        })
    );
    assert_eq!(
        engine.pin("ghost"),
        Err(EngineError::UnknownNode {
            node_id: "ghost".to_owned()
        })
    );
}

#[test]
fn resync_keeps_positions_of_surviving_nodes() {
    let mut engine = LayoutEngine::new(EngineConfig::default());
    engine.submit_snapshot(GraphSnapshot::new(
        nodes(&["a", "b", "c"]),
        vec![SnapshotEdge::new("ab", "a", "b")],
    ));
    for _ in 0..50 {
        engine.frame();
    }
    engine.select(Some("c"));
    let a_before = engine.simulation().position("a").unwrap();

    engine.submit_snapshot(GraphSnapshot::new(
        nodes(&["a", "b", "d"]),
        vec![
            SnapshotEdge::new("ab", "a", "b"),
            SnapshotEdge::new("bd", "b", "d"),
        ],
    ));
    engine.apply_pending_snapshot();

    assert_eq!(engine.simulation().position("a"), Some(a_before));
    assert!(engine.simulation().node("c").is_none());
    assert_eq!(engine.selection(), None);
    assert!(engine.highlight().is_all());

    let ids = engine
        .simulation()
        .nodes()
        .iter()
        .map(|node| node.id())
        .collect::<Vec<_>>();
    assert_eq!(ids, ["a", "b", "d"]);
}

#[test]
fn workflow_document_feeds_the_engine() {
    let LoadedGraph { snapshot, workflow } = parse_graph_document(
        r#"{
            "teams": [{"id": "t1", "name": "Platform Squad", "level": "team"}],
            "workItems": [{"id": "w1", "title": "Latency Complaints", "type": "input"}],
            "rituals": [{"id": "r1", "title": "Daily Standup", "ritualFrequency": "Daily"}],
            "connections": [
                {"id": "c1", "from": "w1", "to": "r1", "style": "dashed"},
                {"id": "c2", "from": "r1", "to": "ghost"}
            ]
        }"#,
    )
    .unwrap();
    assert!(workflow.is_some());

    let mut engine = LayoutEngine::default();
    engine.submit_snapshot(snapshot);
    let report = engine.frame().unwrap();
    assert_eq!(report.added, 3);
    assert_eq!(report.dangling_edges, 1);

    engine.select(Some("w1"));
    assert!(engine.highlight().contains_node("r1"));
    assert!(!engine.highlight().contains_node("t1"));
}
