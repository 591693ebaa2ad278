mod forces;

use std::collections::{HashMap, HashSet};

use eframe::egui::{Vec2, vec2};
use tracing::{debug, warn};

use crate::config::SimulationConfig;
use crate::graph::{GraphSnapshot, NodeKind, SnapshotEdge};
use crate::util::clamp_length;
use forces::{accumulate_gravity, accumulate_repulsion, accumulate_springs};

/// Kinematic state of one laid-out entity.
#[derive(Clone, Debug, PartialEq)]
pub struct SimNode {
    id: String,
    kind: NodeKind,
    payload_ref: String,
    label: String,
    position: Vec2,
    velocity: Vec2,
    pinned: Option<Vec2>,
}

impl SimNode {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn payload_ref(&self) -> &str {
        &self.payload_ref
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn pinned_position(&self) -> Option<Vec2> {
        self.pinned
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned.is_some()
    }

    pub(crate) fn pin(&mut self) {
        if self.pinned.is_none() {
            self.pinned = Some(self.position);
        }
        self.velocity = Vec2::ZERO;
    }

    /// Moves the pin target and the node with it. Returns `false` when the node is not pinned.
    pub(crate) fn move_pin(&mut self, world_delta: Vec2) -> bool {
        let Some(target) = self.pinned.as_mut() else {
            return false;
        };

        if world_delta.is_finite() {
            *target += world_delta;
            self.position = *target;
        }
        true
    }

    pub(crate) fn release(&mut self) {
        self.pinned = None;
        self.velocity = Vec2::ZERO;
    }
}

/// Outcome of applying one snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub added: usize,
    pub kept: usize,
    pub removed: usize,
    pub duplicate_nodes: usize,
    pub dangling_edges: usize,
    pub edges_changed: bool,
}

#[derive(Default)]
struct PhysicsScratch {
    positions: Vec<Vec2>,
    free: Vec<bool>,
    deltas: Vec<Vec2>,
}

/// Layout state for one session: nodes in insertion order plus the edges that resolved
/// against them in the latest snapshot.
pub struct SimulationState {
    config: SimulationConfig,
    nodes: Vec<SimNode>,
    index_by_id: HashMap<String, usize>,
    edges: Vec<SnapshotEdge>,
    springs: Vec<(usize, usize)>,
    scratch: PhysicsScratch,
    tick_count: u64,
}

impl SimulationState {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            nodes: Vec::new(),
            index_by_id: HashMap::new(),
            edges: Vec::new(),
            springs: Vec::new(),
            scratch: PhysicsScratch::default(),
            tick_count: 0,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SimulationConfig) {
        self.config = config;
    }

    pub fn nodes(&self) -> &[SimNode] {
        &self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&SimNode> {
        self.index_of(id).map(|index| &self.nodes[index])
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    pub(crate) fn node_mut(&mut self, id: &str) -> Option<&mut SimNode> {
        let index = self.index_of(id)?;
        self.nodes.get_mut(index)
    }

    /// Edges whose endpoints both exist, in snapshot order.
    pub fn edges(&self) -> &[SnapshotEdge] {
        &self.edges
    }

    pub fn position(&self, id: &str) -> Option<Vec2> {
        self.node(id).map(SimNode::position)
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn initial_position(&self, index: usize, count: usize) -> Vec2 {
        let config = self.config.sanitized();
        let angle = std::f32::consts::TAU * index as f32 / count.max(1) as f32;
        config.center() + vec2(angle.cos(), angle.sin()) * config.initial_radius
    }

    /// Reconciles tracked nodes with `snapshot`. Nodes that survive keep their kinematic
    /// state and insertion order; new ids are appended and seeded on the placement circle.
    pub fn sync(&mut self, snapshot: &GraphSnapshot) -> SyncReport {
        let mut report = SyncReport::default();

        let mut incoming = HashMap::with_capacity(snapshot.nodes.len());
        let mut ordered = Vec::with_capacity(snapshot.nodes.len());
        for node in &snapshot.nodes {
            if incoming.contains_key(node.id.as_str()) {
                report.duplicate_nodes += 1;
                continue;
            }
            incoming.insert(node.id.as_str(), ordered.len());
            ordered.push(node);
        }
        let count = ordered.len();

        let previous = std::mem::take(&mut self.nodes);
        let mut nodes = Vec::with_capacity(count);
        for mut node in previous {
            let Some(&source_index) = incoming.get(node.id.as_str()) else {
                report.removed += 1;
                continue;
            };

            let source = ordered[source_index];
            node.kind = source.kind;
            node.payload_ref.clone_from(&source.payload_ref);
            node.label = source.display_label().to_owned();
            nodes.push(node);
        }
        report.kept = nodes.len();

        let retained = nodes
            .iter()
            .map(|node| node.id.clone())
            .collect::<HashSet<_>>();
        for (index, source) in ordered.iter().enumerate() {
            if retained.contains(&source.id) {
                continue;
            }

            nodes.push(SimNode {
                id: source.id.clone(),
                kind: source.kind,
                payload_ref: source.payload_ref.clone(),
                label: source.display_label().to_owned(),
                position: self.initial_position(index, count),
                velocity: Vec2::ZERO,
                pinned: None,
            });
            report.added += 1;
        }

        self.index_by_id = nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (node.id.clone(), index))
            .collect();
        self.nodes = nodes;

        let mut edges = Vec::with_capacity(snapshot.edges.len());
        let mut springs = Vec::with_capacity(snapshot.edges.len());
        for edge in &snapshot.edges {
            let (Some(from), Some(to)) = (self.index_of(&edge.from), self.index_of(&edge.to))
            else {
                report.dangling_edges += 1;
                continue;
            };
            edges.push(edge.clone());
            springs.push((from, to));
        }

        report.edges_changed = edges != self.edges;
        self.edges = edges;
        self.springs = springs;

        debug!(
            added = report.added,
            kept = report.kept,
            removed = report.removed,
            duplicate_nodes = report.duplicate_nodes,
            dangling_edges = report.dangling_edges,
            "applied graph snapshot"
        );

        report
    }

    /// Advances every node by one fixed step: repulsion, springs, gravity, then
    /// friction-damped explicit Euler integration. Free-node speed is additionally capped
    /// at `max_speed` per tick, which plain Euler does not do.
    pub fn tick(&mut self) {
        let node_count = self.nodes.len();
        self.tick_count = self.tick_count.wrapping_add(1);
        if node_count == 0 {
            return;
        }

        let config = self.config.sanitized();
        let scratch = &mut self.scratch;
        scratch.positions.clear();
        scratch.free.clear();
        scratch.deltas.clear();
        scratch.deltas.resize(node_count, Vec2::ZERO);
        for node in &self.nodes {
            scratch.positions.push(node.position);
            scratch.free.push(node.pinned.is_none());
        }

        accumulate_repulsion(
            &scratch.positions,
            &scratch.free,
            config.charge,
            config.repulsion_cutoff,
            &mut scratch.deltas,
        );
        accumulate_springs(
            &scratch.positions,
            &scratch.free,
            &self.springs,
            config.spring_strength,
            config.ideal_length,
            &mut scratch.deltas,
        );
        accumulate_gravity(
            &scratch.positions,
            &scratch.free,
            config.center(),
            config.gravity,
            &mut scratch.deltas,
        );

        for (node, delta) in self.nodes.iter_mut().zip(scratch.deltas.iter().copied()) {
            if let Some(target) = node.pinned {
                node.position = target;
                node.velocity = Vec2::ZERO;
                continue;
            }

            let velocity = clamp_length((node.velocity + delta) * config.friction, config.max_speed);
            let position = node.position + velocity;
            if velocity.is_finite() && position.is_finite() {
                node.velocity = velocity;
                node.position = position;
            } else {
                warn!(node = node.id.as_str(), "discarding non-finite integration step");
                node.velocity = Vec2::ZERO;
                if !node.position.is_finite() {
                    node.position = config.center();
                }
            }
        }
    }

    /// Total kinetic energy, handy for deciding whether the layout has settled.
    pub fn kinetic_energy(&self) -> f32 {
        self.nodes
            .iter()
            .map(|node| node.velocity.length_sq() * 0.5)
            .sum()
    }
}
