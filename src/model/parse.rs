use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::Value;

use super::LoadedGraph;
use super::workflow::WorkflowModel;
use crate::graph::GraphSnapshot;

const WORKFLOW_KEYS: [&str; 4] = ["teams", "workItems", "rituals", "connections"];

/// Parses either a bare graph snapshot (`nodes`/`edges`) or an editor workflow document.
pub(super) fn parse_graph_document(raw: &str) -> Result<LoadedGraph> {
    let parsed: Value = serde_json::from_str(raw).context("invalid graph JSON")?;
    let object = parsed
        .as_object()
        .ok_or_else(|| anyhow!("expected a JSON object at the top level"))?;

    if object.contains_key("nodes") {
        let snapshot = GraphSnapshot::deserialize(&parsed).context("invalid graph snapshot")?;
        return Ok(LoadedGraph {
            snapshot,
            workflow: None,
        });
    }

    if WORKFLOW_KEYS.iter().any(|key| object.contains_key(*key)) {
        let workflow =
            WorkflowModel::deserialize(&parsed).context("invalid workflow model document")?;
        return Ok(LoadedGraph {
            snapshot: workflow.to_snapshot(),
            workflow: Some(workflow),
        });
    }

    Err(anyhow!(
        "could not recognize graph document; expected `nodes` or one of {WORKFLOW_KEYS:?}"
    ))
}
