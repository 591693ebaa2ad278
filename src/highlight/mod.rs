use std::collections::HashSet;

mod collect;

use self::collect::collect_component;
use crate::graph::SnapshotEdge;

/// Nodes and edges the render layer should emphasize.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum HighlightSet {
    /// No selection: everything is highlighted.
    #[default]
    All,
    Component {
        nodes: HashSet<String>,
        edges: HashSet<String>,
    },
}

impl HighlightSet {
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Component { nodes, .. } => nodes.contains(id),
        }
    }

    pub fn contains_edge(&self, id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Component { edges, .. } => edges.contains(id),
        }
    }

    /// Size of the component, or `None` for the unrestricted set.
    pub fn node_count(&self) -> Option<usize> {
        match self {
            Self::All => None,
            Self::Component { nodes, .. } => Some(nodes.len()),
        }
    }

    pub fn edge_count(&self) -> Option<usize> {
        match self {
            Self::All => None,
            Self::Component { edges, .. } => Some(edges.len()),
        }
    }
}

/// Connected component of `selection` over the undirected view of `edges`.
///
/// `edges` should already be filtered to edges whose endpoints exist; the selected node is
/// always part of its own component even when it has no edges.
pub fn compute_reachable(selection: Option<&str>, edges: &[SnapshotEdge]) -> HighlightSet {
    let Some(selected_id) = selection else {
        return HighlightSet::All;
    };

    let (nodes, edges) = collect_component(selected_id, edges);
    HighlightSet::Component { nodes, edges }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(id: &str, from: &str, to: &str) -> SnapshotEdge {
        SnapshotEdge::new(id, from, to)
    }

    fn ids(values: &[&str]) -> HashSet<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn no_selection_highlights_everything() {
        assert!(compute_reachable(None, &[]).is_all());
        let highlight = compute_reachable(None, &[edge("ab", "a", "b")]);
        assert!(highlight.contains_node("anything"));
        assert!(highlight.contains_edge("ab"));
        assert_eq!(highlight.node_count(), None);
    }

    #[test]
    fn chain_component_is_the_same_from_any_member() {
        let edges = [edge("ab", "a", "b"), edge("bc", "b", "c")];
        let from_b = compute_reachable(Some("b"), &edges);
        let from_a = compute_reachable(Some("a"), &edges);

        assert_eq!(
            from_b,
            HighlightSet::Component {
                nodes: ids(&["a", "b", "c"]),
                edges: ids(&["ab", "bc"]),
            }
        );
        assert_eq!(from_a, from_b);
    }

    #[test]
    fn traversal_ignores_edge_direction() {
        let edges = [edge("ba", "b", "a"), edge("cb", "c", "b")];
        let highlight = compute_reachable(Some("a"), &edges);
        assert_eq!(highlight.node_count(), Some(3));
    }

    #[test]
    fn isolated_node_is_its_own_component() {
        let edges = [edge("ab", "a", "b")];
        assert_eq!(
            compute_reachable(Some("d"), &edges),
            HighlightSet::Component {
                nodes: ids(&["d"]),
                edges: HashSet::new(),
            }
        );
    }

    #[test]
    fn cycles_and_self_loops_terminate() {
        let edges = [
            edge("ab", "a", "b"),
            edge("bc", "b", "c"),
            edge("ca", "c", "a"),
            edge("cc", "c", "c"),
            edge("xy", "x", "y"),
        ];
        let highlight = compute_reachable(Some("b"), &edges);
        assert_eq!(
            highlight,
            HighlightSet::Component {
                nodes: ids(&["a", "b", "c"]),
                edges: ids(&["ab", "bc", "ca", "cc"]),
            }
        );
        assert!(!highlight.contains_node("x"));
        assert!(!highlight.contains_edge("xy"));
    }

    #[test]
    fn long_chain_does_not_recurse() {
        let names = (0..50_000).map(|index| format!("n{index}")).collect::<Vec<_>>();
        let edges = names
            .windows(2)
            .enumerate()
            .map(|(index, pair)| edge(&format!("e{index}"), &pair[0], &pair[1]))
            .collect::<Vec<_>>();

        let highlight = compute_reachable(Some("n49999"), &edges);
        assert_eq!(highlight.node_count(), Some(50_000));
        assert_eq!(highlight.edge_count(), Some(49_999));
    }
}
