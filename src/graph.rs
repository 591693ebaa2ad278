use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Team,
    Ritual,
    Input,
    Initiative,
    Epic,
    #[default]
    Story,
}

impl NodeKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Team => "team",
            Self::Ritual => "ritual",
            Self::Input => "input",
            Self::Initiative => "initiative",
            Self::Epic => "epic",
            Self::Story => "story",
        }
    }

    pub fn is_work_item(self) -> bool {
        matches!(self, Self::Initiative | Self::Epic | Self::Story)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStyle {
    #[default]
    #[serde(alias = "solid")]
    Plain,
    #[serde(alias = "dashed")]
    Emphasized,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawSnapshotNode")]
pub struct SnapshotNode {
    pub id: String,
    pub kind: NodeKind,
    /// Lookup key into the editor's entity store. Never dereferenced by the engine.
    pub payload_ref: String,
    pub label: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSnapshotNode {
    id: String,
    #[serde(default)]
    kind: NodeKind,
    #[serde(default)]
    payload_ref: Option<String>,
    #[serde(default)]
    label: Option<String>,
}

impl From<RawSnapshotNode> for SnapshotNode {
    fn from(raw: RawSnapshotNode) -> Self {
        Self {
            payload_ref: raw.payload_ref.unwrap_or_else(|| raw.id.clone()),
            id: raw.id,
            kind: raw.kind,
            label: raw.label,
        }
    }
}

impl SnapshotNode {
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        let id = id.into();
        Self {
            payload_ref: id.clone(),
            id,
            kind,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEdge {
    pub id: String,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub style: EdgeStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl SnapshotEdge {
    pub fn new(id: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            style: EdgeStyle::Plain,
            label: None,
        }
    }

    pub fn emphasized(mut self) -> Self {
        self.style = EdgeStyle::Emphasized;
        self
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    #[serde(default)]
    pub nodes: Vec<SnapshotNode>,
    #[serde(default)]
    pub edges: Vec<SnapshotEdge>,
}

impl GraphSnapshot {
    pub fn new(nodes: Vec<SnapshotNode>, edges: Vec<SnapshotEdge>) -> Self {
        Self { nodes, edges }
    }

    pub fn node(&self, id: &str) -> Option<&SnapshotNode> {
        self.nodes.iter().find(|node| node.id == id)
    }
}
