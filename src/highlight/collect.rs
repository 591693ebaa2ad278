use std::collections::{HashMap, HashSet, VecDeque};

use crate::graph::SnapshotEdge;

pub(super) fn collect_component(
    selected_id: &str,
    edges: &[SnapshotEdge],
) -> (HashSet<String>, HashSet<String>) {
    let mut neighbors: HashMap<&str, Vec<(&str, &str)>> = HashMap::new();
    for edge in edges {
        neighbors
            .entry(edge.from.as_str())
            .or_default()
            .push((edge.to.as_str(), edge.id.as_str()));
        if !edge.is_self_loop() {
            neighbors
                .entry(edge.to.as_str())
                .or_default()
                .push((edge.from.as_str(), edge.id.as_str()));
        }
    }

    let mut queue = VecDeque::from([selected_id]);
    let mut visited = HashSet::from([selected_id]);
    let mut component_edges = HashSet::new();

    while let Some(node_id) = queue.pop_front() {
        let Some(adjacent) = neighbors.get(node_id) else {
            continue;
        };

        for &(next_id, edge_id) in adjacent {
            component_edges.insert(edge_id.to_owned());
            if visited.insert(next_id) {
                queue.push_back(next_id);
            }
        }
    }

    let component_nodes = visited.into_iter().map(str::to_owned).collect();
    (component_nodes, component_edges)
}
