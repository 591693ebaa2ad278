#![forbid(unsafe_code)]

//! Interactive force-directed layout and connectivity engine for organizational graphs.
//!
//! The crate consumes read-only [`GraphSnapshot`]s, keeps per-node kinematic state in a
//! [`SimulationState`], maps pointer input through a [`Viewport`] and highlights the
//! connected component of the current selection. [`LayoutEngine`] ties the pieces together
//! for a single-threaded, frame-driven render loop. [`model`] turns organization workflow
//! documents into snapshots.

pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod highlight;
pub mod interaction;
pub mod model;
pub mod physics;
pub mod scheduler;
pub mod viewport;

mod util;

#[cfg(test)]
mod proptests;

pub use config::{EngineConfig, NodeExtents, SimulationConfig, ViewportConfig};
pub use engine::{InteractionEvent, LayoutEngine};
pub use error::{EngineError, Result};
pub use graph::{EdgeStyle, GraphSnapshot, NodeKind, SnapshotEdge, SnapshotNode};
pub use highlight::{HighlightSet, compute_reachable};
pub use interaction::InteractionController;
pub use physics::{SimNode, SimulationState, SyncReport};
pub use scheduler::{CancelHandle, FrameLoop, FrameScheduler, FrameTask, ManualScheduler};
pub use viewport::Viewport;
