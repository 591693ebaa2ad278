use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::graph::GraphSnapshot;

mod demo;
mod parse;
mod workflow;

pub use demo::demo_model;
pub use workflow::{
    Connection, LevelId, OrgLevel, Ritual, Team, WorkItem, WorkItemType, WorkflowModel,
};

/// A snapshot ready for the engine plus the workflow document it came from, if any.
#[derive(Clone, Debug)]
pub struct LoadedGraph {
    pub snapshot: GraphSnapshot,
    pub workflow: Option<WorkflowModel>,
}

impl LoadedGraph {
    pub fn demo() -> Self {
        let workflow = demo_model();
        Self {
            snapshot: workflow.to_snapshot(),
            workflow: Some(workflow),
        }
    }
}

pub fn parse_graph_document(raw: &str) -> Result<LoadedGraph> {
    parse::parse_graph_document(raw)
}

pub fn load_graph_file(path: &Path) -> Result<LoadedGraph> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read graph file {}", path.display()))?;
    let loaded = parse_graph_document(&raw)
        .with_context(|| format!("failed to parse graph file {}", path.display()))?;
    info!(
        path = %path.display(),
        nodes = loaded.snapshot.nodes.len(),
        edges = loaded.snapshot.edges.len(),
        "loaded graph"
    );
    Ok(loaded)
}
