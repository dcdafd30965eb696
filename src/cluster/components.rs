//! Connected component discovery over the filtered graph

use crate::graph::WeightedAdjacency;
use std::collections::VecDeque;

/// Partition all nodes into connected components.
///
/// Breadth-first from every unvisited node in ascending index order. Besides
/// the symmetric adjacency, each dequeued node also pulls in the source of
/// every kept edge pointing at it, so connectivity still holds if the
/// adjacency ever stops being symmetric.
///
/// Members of each component are sorted ascending; components come out
/// ordered by their smallest member.
pub fn find_components(adjacency: &WeightedAdjacency) -> Vec<Vec<u32>> {
    let node_count = adjacency.node_count;
    let mut visited = vec![false; node_count];
    let mut components = Vec::new();
    let mut queue = VecDeque::new();

    for start in 0..node_count as u32 {
        if visited[start as usize] {
            continue;
        }

        let mut component = Vec::new();
        queue.push_back(start);

        while let Some(u) = queue.pop_front() {
            if visited[u as usize] {
                continue;
            }
            visited[u as usize] = true;
            component.push(u);

            for (v, _) in adjacency.neighbors(u) {
                if !visited[v as usize] {
                    queue.push_back(v);
                }
            }
            for &src in adjacency.incoming_sources(u) {
                if !visited[src as usize] {
                    queue.push_back(src);
                }
            }
        }

        component.sort_unstable();
        components.push(component);
    }

    log::debug!("Found {} connected components", components.len());

    components
}

/// Map every node to the position of its component
pub fn component_index(node_count: usize, components: &[Vec<u32>]) -> Vec<u32> {
    let mut index = vec![0u32; node_count];
    for (comp_idx, members) in components.iter().enumerate() {
        for &node in members {
            index[node as usize] = comp_idx as u32;
        }
    }
    index
}
