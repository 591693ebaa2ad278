use serde::{Deserialize, Serialize};

use crate::graph::{EdgeStyle, GraphSnapshot, NodeKind, SnapshotEdge, SnapshotNode};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelId {
    Strategic,
    Portfolio,
    #[default]
    Team,
}

impl LevelId {
    pub fn label(self) -> &'static str {
        match self {
            Self::Strategic => "Strategic",
            Self::Portfolio => "Portfolio",
            Self::Team => "Team",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgLevel {
    pub id: LevelId,
    pub label: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkItemType {
    Initiative,
    Epic,
    #[default]
    Story,
    Input,
}

impl From<WorkItemType> for NodeKind {
    fn from(value: WorkItemType) -> Self {
        match value {
            WorkItemType::Initiative => Self::Initiative,
            WorkItemType::Epic => Self::Epic,
            WorkItemType::Story => Self::Story,
            WorkItemType::Input => Self::Input,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub level: LevelId,
    #[serde(default)]
    pub team_type: Option<String>,
    #[serde(default)]
    pub collaborators: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ritual {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub level: LevelId,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub agenda_items: Vec<String>,
    #[serde(default)]
    pub ritual_frequency: String,
    #[serde(default)]
    pub owning_team_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    pub id: String,
    pub title: String,
    #[serde(rename = "type", default)]
    pub item_type: WorkItemType,
    #[serde(default)]
    pub level: LevelId,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub owning_team_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: String,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub style: EdgeStyle,
    #[serde(default)]
    pub interaction_mode: Option<String>,
}

/// Entity document maintained by the organization editor.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowModel {
    #[serde(default)]
    pub levels: Vec<OrgLevel>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub work_items: Vec<WorkItem>,
    #[serde(default)]
    pub rituals: Vec<Ritual>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl WorkflowModel {
    pub fn entity_name(&self, id: &str) -> Option<&str> {
        self.teams
            .iter()
            .find(|team| team.id == id)
            .map(|team| team.name.as_str())
            .or_else(|| {
                self.work_items
                    .iter()
                    .find(|item| item.id == id)
                    .map(|item| item.title.as_str())
            })
            .or_else(|| {
                self.rituals
                    .iter()
                    .find(|ritual| ritual.id == id)
                    .map(|ritual| ritual.title.as_str())
            })
    }

    pub fn level_of(&self, id: &str) -> Option<LevelId> {
        self.teams
            .iter()
            .find(|team| team.id == id)
            .map(|team| team.level)
            .or_else(|| {
                self.work_items
                    .iter()
                    .find(|item| item.id == id)
                    .map(|item| item.level)
            })
            .or_else(|| {
                self.rituals
                    .iter()
                    .find(|ritual| ritual.id == id)
                    .map(|ritual| ritual.level)
            })
    }

    /// Connections ending at `id` (upstream) and starting at `id` (downstream).
    pub fn connections_of(&self, id: &str) -> (Vec<&Connection>, Vec<&Connection>) {
        let upstream = self
            .connections
            .iter()
            .filter(|connection| connection.to == id)
            .collect();
        let downstream = self
            .connections
            .iter()
            .filter(|connection| connection.from == id)
            .collect();
        (upstream, downstream)
    }

    pub fn to_snapshot(&self) -> GraphSnapshot {
        let mut nodes = Vec::with_capacity(
            self.teams.len() + self.work_items.len() + self.rituals.len(),
        );

        nodes.extend(
            self.teams
                .iter()
                .map(|team| SnapshotNode::new(&team.id, NodeKind::Team).with_label(&team.name)),
        );
        nodes.extend(self.work_items.iter().map(|item| {
            SnapshotNode::new(&item.id, item.item_type.into()).with_label(&item.title)
        }));
        nodes.extend(self.rituals.iter().map(|ritual| {
            SnapshotNode::new(&ritual.id, NodeKind::Ritual).with_label(&ritual.title)
        }));

        let edges = self
            .connections
            .iter()
            .map(|connection| SnapshotEdge {
                id: connection.id.clone(),
                from: connection.from.clone(),
                to: connection.to.clone(),
                style: connection.style,
                label: connection.label.clone(),
            })
            .collect();

        GraphSnapshot::new(nodes, edges)
    }
}
