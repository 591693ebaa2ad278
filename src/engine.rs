use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use eframe::egui::{Pos2, Vec2};
use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::error::Result;
use crate::graph::GraphSnapshot;
use crate::highlight::{HighlightSet, compute_reachable};
use crate::interaction::InteractionController;
use crate::physics::{SimNode, SimulationState, SyncReport};
use crate::viewport::Viewport;

#[derive(Clone, Debug, PartialEq)]
pub enum InteractionEvent {
    DragStart { node_id: String, screen: Pos2 },
    DragMove { screen: Pos2 },
    DragEnd,
    Wheel { delta_x: f32, delta_y: f32 },
    SelectAt { screen: Pos2 },
    Pan { screen_delta: Vec2 },
    ResetView,
}

pub struct LayoutEngine {
    config: EngineConfig,
    simulation: SimulationState,
    viewport: Viewport,
    interaction: InteractionController,
    selection: Option<String>,
    highlight: HighlightSet,
    pending: Option<GraphSnapshot>,
    inbox: Receiver<GraphSnapshot>,
    outbox: Sender<GraphSnapshot>,
    live: bool,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl LayoutEngine {
    pub fn new(config: EngineConfig) -> Self {
        let (outbox, inbox) = mpsc::channel();
        Self {
            simulation: SimulationState::new(config.simulation),
            viewport: Viewport::new(config.viewport),
            interaction: InteractionController::new(config.node_extents),
            config,
            selection: None,
            highlight: HighlightSet::All,
            pending: None,
            inbox,
            outbox,
            live: true,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn simulation(&self) -> &SimulationState {
        &self.simulation
    }

    pub fn simulation_mut(&mut self) -> &mut SimulationState {
        &mut self.simulation
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn interaction(&self) -> &InteractionController {
        &self.interaction
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn selected_node(&self) -> Option<&SimNode> {
        self.selection
            .as_deref()
            .and_then(|id| self.simulation.node(id))
    }

    pub fn highlight(&self) -> &HighlightSet {
        &self.highlight
    }

    pub fn draw_order(&self) -> Vec<usize> {
        self.interaction.draw_order(&self.simulation)
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Pauses or resumes `tick()` inside [`Self::frame`]. Snapshots still apply.
    pub fn set_live(&mut self, live: bool) {
        self.live = live;
    }

    /// Sender for producers on other threads. Snapshots are drained at the next frame.
    pub fn snapshot_sender(&self) -> Sender<GraphSnapshot> {
        self.outbox.clone()
    }

    /// Buffers `snapshot` until the next tick boundary. A later snapshot replaces an earlier
    /// one that has not been applied yet, whichever path either arrived through.
    pub fn submit_snapshot(&mut self, snapshot: GraphSnapshot) {
        self.drain_inbox();
        self.pending = Some(snapshot);
    }

    pub fn has_pending_snapshot(&self) -> bool {
        self.pending.is_some()
    }

    fn drain_inbox(&mut self) {
        loop {
            match self.inbox.try_recv() {
                Ok(snapshot) => self.pending = Some(snapshot),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
    }

    /// Applies the newest buffered snapshot, if any.
    pub fn apply_pending_snapshot(&mut self) -> Option<SyncReport> {
        self.drain_inbox();
        let snapshot = self.pending.take()?;
        let report = self.simulation.sync(&snapshot);
        self.interaction.forget_missing(&self.simulation);

        let selection_lost = self
            .selection
            .as_deref()
            .is_some_and(|id| self.simulation.node(id).is_none());
        if selection_lost {
            debug!("selected node left the graph; clearing selection");
            self.selection = None;
        }
        if selection_lost || report.edges_changed {
            self.refresh_highlight();
        }

        Some(report)
    }

    /// One frame at a tick boundary: apply buffered snapshots, then advance the layout.
    pub fn frame(&mut self) -> Option<SyncReport> {
        let report = self.apply_pending_snapshot();
        if self.live {
            self.simulation.tick();
        }
        report
    }

    fn refresh_highlight(&mut self) {
        self.highlight = compute_reachable(self.selection.as_deref(), self.simulation.edges());
    }

    /// Sets the selection and recomputes the highlight. Unknown ids clear the selection.
    pub fn select(&mut self, node_id: Option<&str>) {
        let next = node_id
            .filter(|id| self.simulation.node(id).is_some())
            .map(str::to_owned);
        if let Some(id) = &next {
            self.interaction.mark_touched(id);
        }
        if next == self.selection {
            return;
        }

        trace!(selection = ?next, "selection changed");
        self.selection = next;
        self.refresh_highlight();
    }

    pub fn pin(&mut self, node_id: &str) -> Result<()> {
        self.interaction.pin(&mut self.simulation, node_id)
    }

    pub fn drag(&mut self, node_id: &str, world_delta: Vec2) -> Result<()> {
        self.interaction
            .drag(&mut self.simulation, node_id, world_delta)
    }

    pub fn release(&mut self, node_id: &str) -> Result<()> {
        self.interaction.release(&mut self.simulation, node_id)
    }

    pub fn hit_test(&self, screen: Pos2) -> Option<&SimNode> {
        self.interaction
            .hit_test(&self.simulation, &self.viewport, screen)
    }

    pub fn handle_event(&mut self, event: InteractionEvent) -> Result<()> {
        match event {
            InteractionEvent::DragStart { node_id, screen } => {
                self.interaction
                    .begin_drag(&mut self.simulation, &node_id, screen)?;
            }
            InteractionEvent::DragMove { screen } => {
                self.interaction
                    .drag_to(&mut self.simulation, &self.viewport, screen)?;
            }
            InteractionEvent::DragEnd => {
                self.interaction.end_drag(&mut self.simulation)?;
            }
            InteractionEvent::Wheel { delta_y, .. } => {
                self.viewport.zoom(delta_y);
            }
            InteractionEvent::SelectAt { screen } => {
                let hit = self.hit_test(screen).map(|node| node.id().to_owned());
                self.select(hit.as_deref());
            }
            InteractionEvent::Pan { screen_delta } => {
                self.viewport.pan(screen_delta);
            }
            InteractionEvent::ResetView => {
                self.viewport.reset();
            }
        }
        Ok(())
    }
}
